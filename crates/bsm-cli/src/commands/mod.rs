//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod batch;
pub mod price;

use chrono::NaiveDate;

use crate::config::PricingDefaults;
use crate::report::OutputFormat;

/// Everything a command needs besides its own arguments. Built once in `main`.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub defaults: PricingDefaults,
    pub format: OutputFormat,
    pub precision: u32,
    /// Date expiries are measured from.
    pub today: NaiveDate,
}
