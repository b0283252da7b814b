//! Validated market parameters for a single European option.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DAYS_PER_YEAR, MAX_EXPIRY_DAYS, MAX_PERCENTAGE, MAX_PRICE, MIN_PERCENTAGE, MIN_PRICE,
};
use crate::errors::ValidationError;

/// Raw market parameters as they arrive from a CLI, a CSV row or JSON.
///
/// Nothing here is validated; convert into [`OptionInputs`] before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Spot price of the underlying asset.
    pub underlying_price: f64,
    /// Strike price of the contract.
    pub strike_price: f64,
    /// Time to expiry in years (ACT/365).
    pub time_to_expiry: f64,
    /// Annualised implied volatility (e.g. 0.18 = 18 %).
    pub volatility: f64,
    /// Annualised risk-free rate (e.g. 0.05 = 5 %).
    pub risk_free_interest: f64,
    /// Continuous dividend yield (e.g. 0.02 = 2 %).
    #[serde(default)]
    pub dividend_yield: f64,
}

/// Immutable, validated inputs for one priced option.
///
/// The terms every formula shares (`sqrt(T)`, both discount factors and the
/// volatility potential) are computed once here and reused downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarketParameters", into = "MarketParameters")]
pub struct OptionInputs {
    underlying_price: f64,
    strike_price: f64,
    time_to_expiry: f64,
    volatility: f64,
    risk_free_interest: f64,
    dividend_yield: f64,

    sqrt_time: f64,
    volatility_potential: f64,
    interest_discount: f64,
    dividend_discount: f64,
}

impl OptionInputs {
    /// Validate and build a record. The first violated invariant is returned,
    /// checked in order: prices, expiry, percentages.
    ///
    /// Both prices must be strictly positive; zero is rejected as `InvalidPrice`.
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        volatility: f64,
        risk_free_interest: f64,
        dividend_yield: f64,
    ) -> Result<Self, ValidationError> {
        validate_price("underlying_price", underlying_price)?;
        validate_price("strike_price", strike_price)?;
        validate_expiry(time_to_expiry)?;
        validate_volatility(volatility)?;
        validate_rate("risk_free_interest", risk_free_interest)?;
        validate_rate("dividend_yield", dividend_yield)?;

        let sqrt_time = time_to_expiry.sqrt();

        Ok(Self {
            underlying_price,
            strike_price,
            time_to_expiry,
            volatility,
            risk_free_interest,
            dividend_yield,
            sqrt_time,
            volatility_potential: volatility / (2.0 * sqrt_time),
            interest_discount: (-risk_free_interest * time_to_expiry).exp(),
            dividend_discount: (-dividend_yield * time_to_expiry).exp(),
        })
    }

    /// Inputs for an underlying that pays no dividend.
    pub fn without_dividend(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        volatility: f64,
        risk_free_interest: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            underlying_price,
            strike_price,
            time_to_expiry,
            volatility,
            risk_free_interest,
            0.0,
        )
    }

    /// Inputs with expiry given as a raw number of calendar days.
    pub fn from_days(
        underlying_price: f64,
        strike_price: f64,
        days_to_expiry: f64,
        volatility: f64,
        risk_free_interest: f64,
        dividend_yield: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            underlying_price,
            strike_price,
            days_to_expiry / DAYS_PER_YEAR,
            volatility,
            risk_free_interest,
            dividend_yield,
        )
    }

    pub fn underlying_price(&self) -> f64 {
        self.underlying_price
    }

    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    /// Years to expiry.
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn risk_free_interest(&self) -> f64 {
        self.risk_free_interest
    }

    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// `sqrt(T)`
    pub fn sqrt_time(&self) -> f64 {
        self.sqrt_time
    }

    /// `σ / (2·sqrt(T))`, the time decay weight of the density term in theta.
    pub fn volatility_potential(&self) -> f64 {
        self.volatility_potential
    }

    /// `e^(-rT)`
    pub fn interest_discount(&self) -> f64 {
        self.interest_discount
    }

    /// `e^(-qT)`
    pub fn dividend_discount(&self) -> f64 {
        self.dividend_discount
    }

    /// The unvalidated parameters this record was built from.
    pub fn parameters(&self) -> MarketParameters {
        MarketParameters {
            underlying_price: self.underlying_price,
            strike_price: self.strike_price,
            time_to_expiry: self.time_to_expiry,
            volatility: self.volatility,
            risk_free_interest: self.risk_free_interest,
            dividend_yield: self.dividend_yield,
        }
    }

    /// New validated inputs with a different spot price.
    pub fn with_underlying_price(&self, underlying_price: f64) -> Result<Self, ValidationError> {
        MarketParameters {
            underlying_price,
            ..self.parameters()
        }
        .try_into()
    }

    pub fn with_strike_price(&self, strike_price: f64) -> Result<Self, ValidationError> {
        MarketParameters {
            strike_price,
            ..self.parameters()
        }
        .try_into()
    }

    pub fn with_time_to_expiry(&self, time_to_expiry: f64) -> Result<Self, ValidationError> {
        MarketParameters {
            time_to_expiry,
            ..self.parameters()
        }
        .try_into()
    }

    pub fn with_volatility(&self, volatility: f64) -> Result<Self, ValidationError> {
        MarketParameters {
            volatility,
            ..self.parameters()
        }
        .try_into()
    }

    pub fn with_risk_free_interest(&self, risk_free_interest: f64) -> Result<Self, ValidationError> {
        MarketParameters {
            risk_free_interest,
            ..self.parameters()
        }
        .try_into()
    }

    pub fn with_dividend_yield(&self, dividend_yield: f64) -> Result<Self, ValidationError> {
        MarketParameters {
            dividend_yield,
            ..self.parameters()
        }
        .try_into()
    }
}

impl TryFrom<MarketParameters> for OptionInputs {
    type Error = ValidationError;

    fn try_from(p: MarketParameters) -> Result<Self, Self::Error> {
        OptionInputs::new(
            p.underlying_price,
            p.strike_price,
            p.time_to_expiry,
            p.volatility,
            p.risk_free_interest,
            p.dividend_yield,
        )
    }
}

impl From<OptionInputs> for MarketParameters {
    fn from(inputs: OptionInputs) -> Self {
        inputs.parameters()
    }
}

// Range checks are written so that NaN fails them.

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > MIN_PRICE && value < MAX_PRICE {
        Ok(())
    } else {
        Err(ValidationError::InvalidPrice { field, value })
    }
}

fn validate_expiry(time_to_expiry: f64) -> Result<(), ValidationError> {
    if time_to_expiry.is_nan() || time_to_expiry <= 0.0 {
        return Err(ValidationError::AlreadyExpired { time_to_expiry });
    }
    let days = time_to_expiry * DAYS_PER_YEAR;
    if days > MAX_EXPIRY_DAYS {
        return Err(ValidationError::ExpiryTooFar { days });
    }
    Ok(())
}

fn validate_volatility(value: f64) -> Result<(), ValidationError> {
    if value > MIN_PERCENTAGE && value < MAX_PERCENTAGE {
        Ok(())
    } else {
        Err(ValidationError::InvalidPercentage {
            field: "volatility",
            value,
        })
    }
}

fn validate_rate(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value >= MIN_PERCENTAGE && value < MAX_PERCENTAGE {
        Ok(())
    } else {
        Err(ValidationError::InvalidPercentage { field, value })
    }
}
