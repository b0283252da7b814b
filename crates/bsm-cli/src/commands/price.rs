//! Price command implementation
//!
//! Prices a single option described by command line flags.

use std::io::Write;

use clap::Args;
use tracing::info;

use bsm_types::OptionVariant;

use super::RunContext;
use crate::expiry::Expiry;
use crate::report::ReportWriter;
use crate::request::OptionRequest;

#[derive(Args, Debug, Clone)]
pub struct PriceArgs {
    /// Type of option ('call' or 'put')
    #[arg(short = 'o', long = "option-type")]
    pub option_type: OptionVariant,

    /// Price of the underlying asset
    #[arg(short = 'u', long = "underlying-price", allow_negative_numbers = true)]
    pub underlying_price: f64,

    /// Strike price of the options contract
    #[arg(short = 's', long = "strike-price", allow_negative_numbers = true)]
    pub strike_price: f64,

    /// Expiry date (YYYY-mm-dd) or number of days to expiry
    #[arg(short = 't', long = "time-to-expiry", allow_negative_numbers = true)]
    pub time_to_expiry: Expiry,

    /// Implied volatility of the underlying, as a ratio (default from config)
    #[arg(short = 'v', long, allow_negative_numbers = true)]
    pub volatility: Option<f64>,

    /// Risk free interest rate, as a ratio (default from config)
    #[arg(short = 'r', long = "rate-of-interest", allow_negative_numbers = true)]
    pub rate_of_interest: Option<f64>,

    /// Continuous dividend yield, as a ratio (default from config)
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub dividend: Option<f64>,
}

impl From<&PriceArgs> for OptionRequest {
    fn from(args: &PriceArgs) -> Self {
        OptionRequest {
            variant: args.option_type,
            underlying_price: args.underlying_price,
            strike_price: args.strike_price,
            expiry: args.time_to_expiry,
            volatility: args.volatility,
            risk_free_interest: args.rate_of_interest,
            dividend_yield: args.dividend,
        }
    }
}

/// Run the price command
pub fn run<W: Write>(args: &PriceArgs, ctx: &RunContext, out: W) -> anyhow::Result<()> {
    info!(
        "Pricing {} option, expiry {}",
        args.option_type, args.time_to_expiry
    );

    let option = OptionRequest::from(args).price(&ctx.defaults, ctx.today)?;

    let mut writer = ReportWriter::new(out, ctx.format, ctx.precision);
    writer.write(&option)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingDefaults;
    use crate::report::OutputFormat;
    use bsm_types::{BsmError, ValidationError};
    use chrono::NaiveDate;

    fn ctx(format: OutputFormat) -> RunContext {
        RunContext {
            defaults: PricingDefaults::default(),
            format,
            precision: 2,
            today: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
        }
    }

    fn args(option_type: OptionVariant, underlying_price: f64) -> PriceArgs {
        PriceArgs {
            option_type,
            underlying_price,
            strike_price: 95.0,
            time_to_expiry: Expiry::Days(365.0),
            volatility: Some(0.18),
            rate_of_interest: Some(0.05),
            dividend: None,
        }
    }

    #[test]
    fn test_price_call_table() {
        let mut out = Vec::new();
        run(&args(OptionVariant::Call, 100.0), &ctx(OutputFormat::Table), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Call Option Value: 12.69\n"), "{text}");
    }

    #[test]
    fn test_price_put_json() {
        let mut out = Vec::new();
        run(&args(OptionVariant::Put, 100.0), &ctx(OutputFormat::Json), &mut out).unwrap();
        let row: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(row["option_type"], "put");
        assert!((row["value"].as_f64().unwrap() - 3.06).abs() < 1e-9);
        assert!((row["delta"].as_f64().unwrap() - -0.26).abs() < 1e-9);
    }

    #[test]
    fn test_defaults_applied() {
        let mut a = args(OptionVariant::Call, 100.0);
        a.volatility = None;
        a.rate_of_interest = None;
        let request = OptionRequest::from(&a);
        let params = request
            .parameters(&PricingDefaults::default(), ctx(OutputFormat::Table).today)
            .unwrap();
        assert_eq!(params.volatility, 0.18);
        assert_eq!(params.risk_free_interest, 0.02);
    }

    #[test]
    fn test_invalid_price_propagates() {
        let mut out = Vec::new();
        let err = run(&args(OptionVariant::Call, -1.0), &ctx(OutputFormat::Table), &mut out)
            .unwrap_err();
        let bsm = err.downcast_ref::<BsmError>().unwrap();
        assert!(matches!(
            bsm,
            BsmError::Validation(ValidationError::InvalidPrice { .. })
        ));
        assert!(out.is_empty());
    }
}
