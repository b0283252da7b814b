//! Expiry parsing: a calendar date or a raw day count, converted to an
//! ACT/365 year fraction.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use bsm_types::{InputError, ValidationError, DATE_FORMAT, DAYS_PER_YEAR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expiry {
    /// Expiry date, `YYYY-mm-dd`.
    Date(NaiveDate),
    /// Calendar days to expiry.
    Days(f64),
}

impl Expiry {
    /// Years from `today` to expiry.
    ///
    /// A date on or before `today` has already expired.
    pub fn year_fraction(&self, today: NaiveDate) -> Result<f64, ValidationError> {
        match self {
            Expiry::Date(date) => {
                let days = (*date - today).num_days();
                let time_to_expiry = days as f64 / DAYS_PER_YEAR;
                if days <= 0 {
                    return Err(ValidationError::AlreadyExpired { time_to_expiry });
                }
                Ok(time_to_expiry)
            }
            Expiry::Days(days) => Ok(days / DAYS_PER_YEAR),
        }
    }
}

impl FromStr for Expiry {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            return Ok(Expiry::Date(date));
        }
        match raw.parse::<f64>() {
            Ok(days) if days.is_finite() => Ok(Expiry::Days(days)),
            _ => Err(InputError::InvalidDate {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Expiry::Days(days) => write!(f, "{days} days"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsm_types::{BsmError, BsmResult};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()
    }

    fn year_fraction(raw: &str, today: NaiveDate) -> BsmResult<f64> {
        let expiry: Expiry = raw.parse()?;
        Ok(expiry.year_fraction(today)?)
    }

    #[test]
    fn test_parse_date_and_days() {
        assert_eq!(
            "2026-06-18".parse::<Expiry>().unwrap(),
            Expiry::Date(NaiveDate::from_ymd_opt(2026, 6, 18).unwrap())
        );
        assert_eq!("91".parse::<Expiry>().unwrap(), Expiry::Days(91.0));
        assert_eq!(" 30.5 ".parse::<Expiry>().unwrap(), Expiry::Days(30.5));
    }

    #[test]
    fn test_parse_garbage() {
        let err = "next friday".parse::<Expiry>().unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidDate {
                value: "next friday".to_string()
            }
        );
        assert!("2026-13-01".parse::<Expiry>().is_err());
        assert!("inf".parse::<Expiry>().is_err());
    }

    #[test]
    fn test_one_year_out() {
        let t = year_fraction("2027-03-20", today()).unwrap();
        assert_eq!(t, 1.0);
    }

    #[test]
    fn test_day_count() {
        let t = year_fraction("73", today()).unwrap();
        assert!((t - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_already_expired() {
        for raw in ["2026-03-20", "2025-12-31"] {
            let err = year_fraction(raw, today()).unwrap_err();
            assert!(
                matches!(
                    err,
                    BsmError::Validation(ValidationError::AlreadyExpired { .. })
                ),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Expiry::Days(10.0).to_string(), "10 days");
        assert_eq!(
            Expiry::Date(NaiveDate::from_ymd_opt(2026, 6, 18).unwrap()).to_string(),
            "2026-06-18"
        );
    }
}
