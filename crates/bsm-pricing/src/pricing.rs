//! Black-Scholes-Merton closed form pricing for European options.

use std::f64::consts::{PI, SQRT_2};

use bsm_types::{OptionInputs, OptionVariant};

// ---------- normal distribution helpers ----------

/// Standard normal cumulative distribution function, `0.5 · erfc(-x / √2)`.
pub fn cumulative_normal(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// Standard normal probability density function,
/// i.e. the first derivative of [`cumulative_normal`].
pub fn standard_normal_density(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}

// ---------- Black-Scholes core ----------

/// Pricing engine. Stateless; every method is a pure function of validated
/// [`OptionInputs`], so a single instance can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholes;

impl BlackScholes {
    pub fn new() -> Self {
        Self
    }

    /// `(ln(S/K) + (r - q + σ²/2)·T) / (σ·√T)`
    pub fn d1(&self, inputs: &OptionInputs) -> f64 {
        let s = inputs.underlying_price();
        let k = inputs.strike_price();
        let r = inputs.risk_free_interest();
        let q = inputs.dividend_yield();
        let sigma = inputs.volatility();
        let t = inputs.time_to_expiry();

        ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / (sigma * inputs.sqrt_time())
    }

    /// `d1 - σ·√T`
    pub fn d2(&self, d1: f64, inputs: &OptionInputs) -> f64 {
        d1 - inputs.volatility() * inputs.sqrt_time()
    }

    /// Standard normal CDF; see [`cumulative_normal`].
    pub fn cumulative_normal(&self, x: f64) -> f64 {
        cumulative_normal(x)
    }

    /// `S·e^(-qT)·N(d1) - K·e^(-rT)·N(d2)`
    pub fn call_value(&self, inputs: &OptionInputs) -> f64 {
        self.value_from_d1(inputs, self.d1(inputs), OptionVariant::Call)
    }

    /// `K·e^(-rT)·N(-d2) - S·e^(-qT)·N(-d1)`
    pub fn put_value(&self, inputs: &OptionInputs) -> f64 {
        self.value_from_d1(inputs, self.d1(inputs), OptionVariant::Put)
    }

    pub fn value(&self, inputs: &OptionInputs, variant: OptionVariant) -> f64 {
        self.value_from_d1(inputs, self.d1(inputs), variant)
    }

    /// Value of the option given an already computed `d1`, so callers that
    /// also need the greeks derive `d1` only once.
    ///
    /// The raw formula output is returned; it is never clamped at zero.
    pub fn value_from_d1(&self, inputs: &OptionInputs, d1: f64, variant: OptionVariant) -> f64 {
        let d2 = self.d2(d1, inputs);
        let spot = inputs.underlying_price() * inputs.dividend_discount();
        let strike = inputs.strike_price() * inputs.interest_discount();

        match variant {
            OptionVariant::Call => {
                spot * self.cumulative_normal(d1) - strike * self.cumulative_normal(d2)
            }
            OptionVariant::Put => {
                strike * self.cumulative_normal(-d2) - spot * self.cumulative_normal(-d1)
            }
        }
    }
}
