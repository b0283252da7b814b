//! Streaming CSV reader for batch pricing.
//!
//! Rows are `option_type,underlying,strike,expiry,volatility,interest,dividend`.
//! A header row (first field `option_type`) is skipped wherever it appears and
//! empty volatility/interest/dividend cells fall back to the configured
//! defaults. Every row is handled on its own so callers can choose to skip or
//! abort on a bad one.

use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use bsm_pricing::EuropeanOption;
use bsm_types::{BsmError, BsmResult, InputError, OptionVariant};

use crate::config::PricingDefaults;
use crate::expiry::Expiry;
use crate::request::OptionRequest;

pub const CSV_COLUMNS: usize = 7;
const HEADER_MARKER: &str = "option_type";

/// One priced (or rejected) CSV row.
#[derive(Debug)]
pub struct BatchEntry {
    /// 1-based line number in the input.
    pub line: u64,
    pub result: BsmResult<EuropeanOption>,
}

pub struct CsvOptionReader {
    defaults: PricingDefaults,
    today: NaiveDate,
}

impl CsvOptionReader {
    pub fn new(defaults: &PricingDefaults, today: NaiveDate) -> Self {
        Self {
            defaults: defaults.clone(),
            today,
        }
    }

    /// Lazily price every data row of `source`, in input order.
    pub fn entries<R: Read>(&self, source: R) -> impl Iterator<Item = BatchEntry> {
        let defaults = self.defaults.clone();
        let today = self.today;
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source)
            .into_records();

        records.enumerate().filter_map(move |(index, record)| {
            let fallback_line = index as u64 + 1;
            match record {
                Ok(record) => {
                    let line = record
                        .position()
                        .map(|p| p.line())
                        .unwrap_or(fallback_line);
                    if is_header(&record) {
                        tracing::debug!("Skipping CSV header at line {}", line);
                        return None;
                    }
                    let result = parse_record(&record)
                        .and_then(|request| request.price(&defaults, today));
                    Some(BatchEntry { line, result })
                }
                Err(e) => {
                    let line = e
                        .position()
                        .map(|p| p.line())
                        .unwrap_or(fallback_line);
                    Some(BatchEntry {
                        line,
                        result: Err(BsmError::from(e)),
                    })
                }
            }
        })
    }
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|field| field.eq_ignore_ascii_case(HEADER_MARKER))
}

/// Parse one CSV record into a request. Does not touch defaults.
pub fn parse_record(record: &StringRecord) -> BsmResult<OptionRequest> {
    if record.len() != CSV_COLUMNS {
        return Err(InputError::ColumnCount {
            expected: CSV_COLUMNS,
            found: record.len(),
        }
        .into());
    }

    let variant: OptionVariant = required(record, 0, "option_type")?.parse()?;
    let underlying_price = parse_number(required(record, 1, "underlying")?, "underlying")?;
    let strike_price = parse_number(required(record, 2, "strike")?, "strike")?;
    let expiry: Expiry = required(record, 3, "expiry")?.parse()?;

    Ok(OptionRequest {
        variant,
        underlying_price,
        strike_price,
        expiry,
        volatility: optional_number(record, 4, "volatility")?,
        risk_free_interest: optional_number(record, 5, "interest")?,
        dividend_yield: optional_number(record, 6, "dividend")?,
    })
}

fn required<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &'static str,
) -> Result<&'r str, InputError> {
    match record.get(index) {
        Some(field) if !field.is_empty() => Ok(field),
        _ => Err(InputError::MissingColumn { column }),
    }
}

fn optional_number(
    record: &StringRecord,
    index: usize,
    field: &'static str,
) -> Result<Option<f64>, InputError> {
    match record.get(index) {
        Some(raw) if !raw.is_empty() => parse_number(raw, field).map(Some),
        _ => Ok(None),
    }
}

pub fn parse_number(raw: &str, field: &'static str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| InputError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
