use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Option variant, call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionVariant {
    Call,
    Put,
}

impl OptionVariant {
    /// Label used in human readable reports.
    pub fn label(&self) -> &'static str {
        match self {
            OptionVariant::Call => "Call",
            OptionVariant::Put => "Put",
        }
    }
}

impl fmt::Display for OptionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionVariant::Call => write!(f, "call"),
            OptionVariant::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionVariant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionVariant::Call),
            "put" | "p" => Ok(OptionVariant::Put),
            _ => Err(ValidationError::InvalidVariant { tag: s.to_string() }),
        }
    }
}
