pub mod greeks;
pub mod option;
pub mod pricing;

pub use greeks::*;
pub use option::*;
pub use pricing::*;

pub use bsm_types::{BsmError, BsmResult, OptionInputs, OptionVariant, ValidationError};
