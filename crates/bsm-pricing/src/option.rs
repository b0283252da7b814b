use serde::{Deserialize, Serialize};
use std::fmt;

use bsm_types::{OptionInputs, OptionVariant};

use crate::greeks::{Greeks, Sensitivities};
use crate::pricing::BlackScholes;

/// Result of pricing one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub variant: OptionVariant,
    /// Theoretical option value.
    pub value: f64,
    pub greeks: Sensitivities,
}

/// A European option bound to its inputs.
///
/// Owns its inputs for its whole lifetime; pricing another scenario means
/// building another option. d1, the value and all shared greek terms are
/// computed once in [`EuropeanOption::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanOption {
    inputs: OptionInputs,
    variant: OptionVariant,
    greeks: Greeks,
    value: f64,
}

impl EuropeanOption {
    pub fn new(inputs: OptionInputs, variant: OptionVariant) -> Self {
        let bsm = BlackScholes::new();
        let greeks = Greeks::new(&inputs, &bsm);
        let value = bsm.value_from_d1(&inputs, greeks.d1(), variant);

        tracing::debug!(
            %variant,
            spot = inputs.underlying_price(),
            strike = inputs.strike_price(),
            time_to_expiry = inputs.time_to_expiry(),
            value,
            "priced option"
        );

        Self {
            inputs,
            variant,
            greeks,
            value,
        }
    }

    pub fn call(inputs: OptionInputs) -> Self {
        Self::new(inputs, OptionVariant::Call)
    }

    pub fn put(inputs: OptionInputs) -> Self {
        Self::new(inputs, OptionVariant::Put)
    }

    pub fn inputs(&self) -> &OptionInputs {
        &self.inputs
    }

    pub fn variant(&self) -> OptionVariant {
        self.variant
    }

    pub fn d1(&self) -> f64 {
        self.greeks.d1()
    }

    pub fn d2(&self) -> f64 {
        BlackScholes::new().d2(self.greeks.d1(), &self.inputs)
    }

    /// Theoretical value, unclamped.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn delta(&self) -> f64 {
        self.greeks.delta(self.variant)
    }

    pub fn gamma(&self) -> f64 {
        self.greeks.gamma()
    }

    pub fn theta(&self) -> f64 {
        self.greeks.theta(self.variant)
    }

    pub fn vega(&self) -> f64 {
        self.greeks.vega()
    }

    pub fn rho(&self) -> f64 {
        self.greeks.rho(self.variant)
    }

    pub fn greeks(&self) -> Sensitivities {
        self.greeks.sensitivities(self.variant)
    }

    pub fn result(&self) -> PricingResult {
        PricingResult {
            variant: self.variant,
            value: self.value,
            greeks: self.greeks(),
        }
    }
}

impl fmt::Display for EuropeanOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} S={} K={} T={:.4}y vol={} r={} q={}",
            self.variant.label(),
            self.inputs.underlying_price(),
            self.inputs.strike_price(),
            self.inputs.time_to_expiry(),
            self.inputs.volatility(),
            self.inputs.risk_free_interest(),
            self.inputs.dividend_yield(),
        )
    }
}
