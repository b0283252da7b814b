//! Option greeks built on terms memoized once per option.

use serde::{Deserialize, Serialize};

use bsm_types::{OptionInputs, OptionVariant};

use crate::pricing::{standard_normal_density, BlackScholes};

/// The five sensitivities of one option, as raw model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensitivities {
    /// Rate of change of option value w.r.t. underlying price.
    pub delta: f64,
    /// Rate of change of delta w.r.t. underlying price.
    pub gamma: f64,
    /// Rate of change of option value w.r.t. time (per year).
    pub theta: f64,
    /// Rate of change of option value w.r.t. volatility (per unit of vol).
    pub vega: f64,
    /// Rate of change of option value w.r.t. the risk-free rate (per unit of rate).
    pub rho: f64,
}

/// Greeks engine.
///
/// Holds plain copies of the inputs it needs alongside the shared terms
/// (d1, the four probabilities and the density at d1), so it never borrows
/// from the record it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Greeks {
    spot: f64,
    strike: f64,
    volatility: f64,
    risk_free_interest: f64,
    dividend_yield: f64,
    sqrt_time: f64,
    volatility_potential: f64,
    interest_discount: f64,
    dividend_discount: f64,

    d1: f64,
    /// N(d1): probability of exercise at the current spot
    prob_exercised: f64,
    /// N(-d1)
    prob_expires: f64,
    /// N(d2)
    prob_returns: f64,
    /// N(-d2)
    prob_cost: f64,
    /// n(d1)
    nd1: f64,
}

impl Greeks {
    pub fn new(inputs: &OptionInputs, bsm: &BlackScholes) -> Self {
        let d1 = bsm.d1(inputs);
        let vol_time = inputs.volatility() * inputs.sqrt_time();

        Self {
            spot: inputs.underlying_price(),
            strike: inputs.strike_price(),
            volatility: inputs.volatility(),
            risk_free_interest: inputs.risk_free_interest(),
            dividend_yield: inputs.dividend_yield(),
            sqrt_time: inputs.sqrt_time(),
            volatility_potential: inputs.volatility_potential(),
            interest_discount: inputs.interest_discount(),
            dividend_discount: inputs.dividend_discount(),
            d1,
            prob_exercised: bsm.cumulative_normal(d1),
            prob_expires: bsm.cumulative_normal(-d1),
            prob_returns: bsm.cumulative_normal(d1 - vol_time),
            prob_cost: bsm.cumulative_normal(-d1 + vol_time),
            nd1: standard_normal_density(d1),
        }
    }

    /// The d1 every greek was derived from.
    pub fn d1(&self) -> f64 {
        self.d1
    }

    pub fn delta(&self, variant: OptionVariant) -> f64 {
        match variant {
            OptionVariant::Call => self.dividend_discount * self.prob_exercised,
            OptionVariant::Put => -self.dividend_discount * self.prob_expires,
        }
    }

    // Same formula for calls and puts
    pub fn gamma(&self) -> f64 {
        let returns = self.spot * self.volatility * self.sqrt_time;
        (self.dividend_discount / returns) * self.nd1
    }

    /// Annual time decay.
    pub fn theta(&self, variant: OptionVariant) -> f64 {
        let spot = self.spot * self.dividend_discount;
        let strike = self.strike * self.interest_discount;
        let decay = spot * self.volatility_potential * self.nd1;

        match variant {
            OptionVariant::Call => {
                let returns = spot * self.dividend_yield * self.prob_exercised;
                let cost = strike * self.risk_free_interest * self.prob_returns;
                returns - cost - decay
            }
            OptionVariant::Put => {
                let returns = spot * self.dividend_yield * self.prob_expires;
                let cost = strike * self.risk_free_interest * self.prob_cost;
                -returns + cost - decay
            }
        }
    }

    // Same formula for calls and puts
    pub fn vega(&self) -> f64 {
        self.spot * self.dividend_discount * self.sqrt_time * self.nd1
    }

    pub fn rho(&self, variant: OptionVariant) -> f64 {
        let cost = self.strike * self.interest_discount;
        match variant {
            OptionVariant::Call => cost * self.prob_returns,
            OptionVariant::Put => -cost * self.prob_cost,
        }
    }

    pub fn sensitivities(&self, variant: OptionVariant) -> Sensitivities {
        Sensitivities {
            delta: self.delta(variant),
            gamma: self.gamma(),
            theta: self.theta(variant),
            vega: self.vega(),
            rho: self.rho(variant),
        }
    }
}
