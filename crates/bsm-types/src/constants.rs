//! Limits and defaults shared by the pricer and its front ends.

/// Upper bound (exclusive) for any underlying or strike price.
pub const MAX_PRICE: f64 = 99_999.99;
/// Lower bound (exclusive) for any underlying or strike price.
pub const MIN_PRICE: f64 = 0.0;

/// Percentages are modelled as ratios in `[MIN_PERCENTAGE, MAX_PERCENTAGE)`.
pub const MIN_PERCENTAGE: f64 = 0.0;
pub const MAX_PERCENTAGE: f64 = 1.0;

/// ACT/365: the only day count the pricer understands.
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Ten year horizon, in calendar days.
pub const MAX_EXPIRY_DAYS: f64 = DAYS_PER_YEAR * 10.0;

/// Implied volatility assumed when none is supplied.
pub const DEFAULT_VOLATILITY: f64 = 0.18;
/// Risk free rate assumed when none is supplied.
pub const DEFAULT_INTEREST: f64 = 0.02;
pub const DEFAULT_DIVIDEND_YIELD: f64 = 0.0;

/// Expiry dates are accepted as `YYYY-mm-dd`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Two and three decimal place tolerances.
pub const DP2: f64 = 1e-2;
pub const DP3: f64 = 1e-3;
