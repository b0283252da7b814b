//! Pricing defaults used when a flag or CSV cell is omitted.
//!
//! Built once at start up (built-in constants, then an optional JSON file,
//! then `BSM_*` environment variables) and passed by reference afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use bsm_types::{
    config_error, BsmResult, DEFAULT_DIVIDEND_YIELD, DEFAULT_INTEREST, DEFAULT_VOLATILITY,
    MAX_PERCENTAGE, MIN_PERCENTAGE,
};

pub const ENV_VOLATILITY: &str = "BSM_VOLATILITY";
pub const ENV_INTEREST: &str = "BSM_INTEREST";
pub const ENV_DIVIDEND: &str = "BSM_DIVIDEND";

const MAX_PRECISION: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingDefaults {
    pub volatility: f64,
    pub risk_free_interest: f64,
    pub dividend_yield: f64,
    /// Decimal places shown in reports.
    pub precision: u32,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            volatility: DEFAULT_VOLATILITY,
            risk_free_interest: DEFAULT_INTEREST,
            dividend_yield: DEFAULT_DIVIDEND_YIELD,
            precision: 3,
        }
    }
}

impl PricingDefaults {
    /// Defaults from `path` (when given) overlaid with the process environment.
    pub fn load(path: Option<&Path>) -> BsmResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let defaults = base.with_overrides(|key| std::env::var(key).ok())?;
        defaults.validate()?;
        debug!(?defaults, "loaded pricing defaults");
        Ok(defaults)
    }

    pub fn from_file(path: &Path) -> BsmResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            config_error!("failed to read config file {}: {}", path.display(), e)
        })?;
        let defaults: Self = serde_json::from_str(&text)?;
        Ok(defaults)
    }

    /// Apply `BSM_*` overrides looked up through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> BsmResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| -> BsmResult<Option<f64>> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| config_error!("{} is not a number: {:?}", key, raw)),
                None => Ok(None),
            }
        };

        if let Some(v) = parse(ENV_VOLATILITY)? {
            self.volatility = v;
        }
        if let Some(r) = parse(ENV_INTEREST)? {
            self.risk_free_interest = r;
        }
        if let Some(q) = parse(ENV_DIVIDEND)? {
            self.dividend_yield = q;
        }
        Ok(self)
    }

    pub fn validate(&self) -> BsmResult<()> {
        if !(self.volatility > MIN_PERCENTAGE && self.volatility < MAX_PERCENTAGE) {
            return Err(config_error!(
                "default volatility must be in (0, 1), got {}",
                self.volatility
            ));
        }
        for (name, value) in [
            ("risk_free_interest", self.risk_free_interest),
            ("dividend_yield", self.dividend_yield),
        ] {
            if !(value >= MIN_PERCENTAGE && value < MAX_PERCENTAGE) {
                return Err(config_error!("default {} must be in [0, 1), got {}", name, value));
            }
        }
        if self.precision > MAX_PRECISION {
            return Err(config_error!(
                "precision must be at most {}, got {}",
                MAX_PRECISION,
                self.precision
            ));
        }
        Ok(())
    }
}
