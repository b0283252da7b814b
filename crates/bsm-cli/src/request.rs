use chrono::NaiveDate;

use bsm_pricing::EuropeanOption;
use bsm_types::{BsmResult, MarketParameters, OptionInputs, OptionVariant};

use crate::config::PricingDefaults;
use crate::expiry::Expiry;

/// One option as requested on the command line or in a CSV row, before
/// defaults are filled in and the inputs are validated.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRequest {
    pub variant: OptionVariant,
    pub underlying_price: f64,
    pub strike_price: f64,
    pub expiry: Expiry,
    pub volatility: Option<f64>,
    pub risk_free_interest: Option<f64>,
    pub dividend_yield: Option<f64>,
}

impl OptionRequest {
    /// Fill omitted fields from `defaults` and resolve the expiry against `today`.
    pub fn parameters(
        &self,
        defaults: &PricingDefaults,
        today: NaiveDate,
    ) -> BsmResult<MarketParameters> {
        Ok(MarketParameters {
            underlying_price: self.underlying_price,
            strike_price: self.strike_price,
            time_to_expiry: self.expiry.year_fraction(today)?,
            volatility: self.volatility.unwrap_or(defaults.volatility),
            risk_free_interest: self.risk_free_interest.unwrap_or(defaults.risk_free_interest),
            dividend_yield: self.dividend_yield.unwrap_or(defaults.dividend_yield),
        })
    }

    pub fn price(
        &self,
        defaults: &PricingDefaults,
        today: NaiveDate,
    ) -> BsmResult<EuropeanOption> {
        let inputs = OptionInputs::try_from(self.parameters(defaults, today)?)?;
        Ok(EuropeanOption::new(inputs, self.variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsm_types::{BsmError, ValidationError};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()
    }

    fn request(expiry: Expiry) -> OptionRequest {
        OptionRequest {
            variant: OptionVariant::Call,
            underlying_price: 100.0,
            strike_price: 95.0,
            expiry,
            volatility: None,
            risk_free_interest: Some(0.05),
            dividend_yield: None,
        }
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let params = request(Expiry::Days(365.0))
            .parameters(&PricingDefaults::default(), today())
            .unwrap();
        assert_eq!(params.volatility, 0.18);
        assert_eq!(params.risk_free_interest, 0.05);
        assert_eq!(params.dividend_yield, 0.0);
        assert_eq!(params.time_to_expiry, 1.0);
    }

    #[test]
    fn test_price_from_date() {
        let expiry = Expiry::Date(NaiveDate::from_ymd_opt(2027, 3, 20).unwrap());
        let option = request(expiry)
            .price(&PricingDefaults::default(), today())
            .unwrap();
        assert!((option.value() - 12.69).abs() <= 0.01);
    }

    #[test]
    fn test_validation_failure_propagates() {
        let mut req = request(Expiry::Days(365.0));
        req.underlying_price = -1.0;
        let err = req.price(&PricingDefaults::default(), today()).unwrap_err();
        assert!(matches!(
            err,
            BsmError::Validation(ValidationError::InvalidPrice { .. })
        ));
    }
}
