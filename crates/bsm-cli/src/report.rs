//! Output formatting for priced options.

use std::io::Write;

use clap::ValueEnum;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use bsm_pricing::EuropeanOption;
use bsm_types::{BsmError, BsmResult, OptionVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable value and greeks
    #[default]
    Table,
    /// One JSON object per option
    Json,
    /// CSV with a header row
    Csv,
}

/// Flat, display-rounded view of one priced option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub option_type: OptionVariant,
    pub underlying: f64,
    pub strike: f64,
    pub time_to_expiry: f64,
    pub volatility: f64,
    pub interest: f64,
    pub dividend: f64,
    pub value: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl ReportRow {
    pub fn new(option: &EuropeanOption, precision: u32) -> Self {
        let inputs = option.inputs();
        let greeks = option.greeks();
        let round = |v: f64| rounded(v, precision);

        Self {
            option_type: option.variant(),
            underlying: inputs.underlying_price(),
            strike: inputs.strike_price(),
            time_to_expiry: inputs.time_to_expiry(),
            volatility: inputs.volatility(),
            interest: inputs.risk_free_interest(),
            dividend: inputs.dividend_yield(),
            value: round(option.value()),
            delta: round(greeks.delta),
            gamma: round(greeks.gamma),
            theta: round(greeks.theta),
            vega: round(greeks.vega),
            rho: round(greeks.rho),
        }
    }
}

/// `value` rounded half away from zero to `dp` places, or `None` when not finite.
pub fn round_decimal(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

/// Finite values outside `Decimal`'s range are passed through unrounded.
fn rounded(value: f64, dp: u32) -> f64 {
    round_decimal(value, dp)
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Fixed point rendering with exactly `dp` decimals; non-finite values print as `NaN`.
pub fn format_value(value: f64, dp: u32) -> String {
    match round_decimal(value, dp) {
        Some(d) => format!("{:.*}", dp as usize, d),
        None if value.is_finite() => format!("{:.*}", dp as usize, value),
        None => "NaN".to_string(),
    }
}

enum Sink<W: Write> {
    Text(W),
    Csv(csv::Writer<W>),
}

/// Writes priced options to `W` in the chosen format, in the order given.
pub struct ReportWriter<W: Write> {
    sink: Sink<W>,
    format: OutputFormat,
    precision: u32,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, format: OutputFormat, precision: u32) -> Self {
        let sink = match format {
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(out)),
            OutputFormat::Table | OutputFormat::Json => Sink::Text(out),
        };
        Self {
            sink,
            format,
            precision,
        }
    }

    pub fn write(&mut self, option: &EuropeanOption) -> BsmResult<()> {
        let p = self.precision;
        match (&mut self.sink, self.format) {
            (Sink::Csv(writer), _) => {
                writer.serialize(ReportRow::new(option, p))?;
            }
            (Sink::Text(out), OutputFormat::Json) => {
                serde_json::to_writer(&mut *out, &ReportRow::new(option, p))?;
                writeln!(out)?;
            }
            (Sink::Text(out), _) => {
                let greeks = option.greeks();
                writeln!(
                    out,
                    "{} Option Value: {}",
                    option.variant().label(),
                    format_value(option.value(), p)
                )?;
                for (name, value) in [
                    ("delta", greeks.delta),
                    ("gamma", greeks.gamma),
                    ("theta", greeks.theta),
                    ("vega", greeks.vega),
                    ("rho", greeks.rho),
                ] {
                    writeln!(out, "  {:<6} {}", format!("{name}:"), format_value(value, p))?;
                }
            }
        }
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> BsmResult<W> {
        match self.sink {
            Sink::Text(mut out) => {
                out.flush()?;
                Ok(out)
            }
            Sink::Csv(writer) => writer
                .into_inner()
                .map_err(|e| BsmError::Io(e.into_error())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsm_types::OptionInputs;
    use rust_decimal_macros::dec;

    fn call() -> EuropeanOption {
        let inputs = OptionInputs::without_dividend(100.0, 95.0, 1.0, 0.18, 0.05).unwrap();
        EuropeanOption::call(inputs)
    }

    fn render(format: OutputFormat, options: &[EuropeanOption]) -> String {
        let mut writer = ReportWriter::new(Vec::new(), format, 3);
        for option in options {
            writer.write(option).unwrap();
        }
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_round_decimal() {
        assert_eq!(round_decimal(12.691_68, 3), Some(dec!(12.692)));
        assert_eq!(round_decimal(-5.982_24, 2), Some(dec!(-5.98)));
        assert_eq!(round_decimal(f64::NAN, 2), None);
        assert_eq!(round_decimal(f64::INFINITY, 2), None);
    }

    #[test]
    fn test_format_value_pads() {
        assert_eq!(format_value(3.0, 2), "3.00");
        assert_eq!(format_value(0.040_9, 3), "0.041");
        assert_eq!(format_value(f64::NAN, 3), "NaN");
    }

    #[test]
    fn test_format_value_beyond_decimal_range() {
        assert_eq!(round_decimal(4.2e29, 3), None);
        assert_eq!(format_value(4.2e29, 1), format!("{:.1}", 4.2e29));
        assert_eq!(format_value(-6.9e31, 0), format!("{:.0}", -6.9e31));
        assert_eq!(rounded(4.2e29, 3), 4.2e29);
        assert_eq!(format_value(f64::INFINITY, 3), "NaN");
    }

    #[test]
    fn test_tiny_expiry_greeks_stay_numeric() {
        let inputs = OptionInputs::from_days(100.0, 100.0, 1e-60, 0.18, 0.02, 0.0).unwrap();
        let option = EuropeanOption::call(inputs);
        assert!(option.gamma() > 1e29 && option.gamma().is_finite());
        assert!(option.theta() < -1e31 && option.theta().is_finite());

        let table = render(OutputFormat::Table, &[option.clone()]);
        assert!(!table.contains("NaN"), "{table}");

        let json = render(OutputFormat::Json, &[option.clone()]);
        let row: serde_json::Value = serde_json::from_str(json.trim()).unwrap();
        assert_eq!(row["gamma"].as_f64(), Some(option.gamma()));
        assert_eq!(row["theta"].as_f64(), Some(option.theta()));
    }

    #[test]
    fn test_time_to_expiry_echoed_raw() {
        let inputs = OptionInputs::from_days(100.0, 95.0, 30.0, 0.18, 0.05, 0.0).unwrap();
        let mut writer = ReportWriter::new(Vec::new(), OutputFormat::Json, 0);
        writer.write(&EuropeanOption::call(inputs)).unwrap();
        let out = writer.finish().unwrap();
        let row: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(row["time_to_expiry"].as_f64(), Some(30.0 / 365.0));
    }

    #[test]
    fn test_table_output() {
        let text = render(OutputFormat::Table, &[call()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Call Option Value: 12.692");
        assert_eq!(lines[1], "  delta: 0.743");
        assert!(lines[3].contains("-5.982"));
        assert!(lines[4].contains("32.240"));
        assert!(lines[5].contains("61.612"));
    }

    #[test]
    fn test_json_output() {
        let put = EuropeanOption::put(call().inputs().clone());
        let text = render(OutputFormat::Json, &[call(), put]);
        let rows: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["option_type"], "call");
        assert!((rows[0]["value"].as_f64().unwrap() - 12.692).abs() < 1e-9);
        assert_eq!(rows[1]["option_type"], "put");
        assert!((rows[1]["value"].as_f64().unwrap() - 3.058).abs() < 1e-9);
    }

    #[test]
    fn test_csv_output() {
        let text = render(OutputFormat::Csv, &[call(), call()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("option_type,underlying,strike"));
        assert!(lines[1].starts_with("call,100.0,95.0,1.0,"));
        assert_eq!(lines[1], lines[2]);
    }
}
