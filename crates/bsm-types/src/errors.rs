use thiserror::Error;

/// Main error type for the pricer and its front ends
#[derive(Error, Debug)]
pub enum BsmError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(String),
}

/// Invariant violations raised while constructing option inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid price: {field} must be greater than 0 and less than 99999.99, got {value}")]
    InvalidPrice { field: &'static str, value: f64 },

    #[error("Invalid percentage: {field} must be a decimal ratio below 1, got {value}")]
    InvalidPercentage { field: &'static str, value: f64 },

    #[error("Expiry too far: {days} days to expiry exceeds the 10 year limit")]
    ExpiryTooFar { days: f64 },

    #[error("Option has already expired: time to expiry is {time_to_expiry} years")]
    AlreadyExpired { time_to_expiry: f64 },

    #[error("Invalid option variant: {tag:?} is neither call nor put")]
    InvalidVariant { tag: String },
}

/// Errors raised while turning raw text (flags, CSV cells) into option inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Missing column: {column}")]
    MissingColumn { column: &'static str },

    #[error("CSV record has {found} columns, expected {expected}")]
    ColumnCount { expected: usize, found: usize },

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid date {value:?}: expected YYYY-mm-dd or a number of days")]
    InvalidDate { value: String },
}

impl ValidationError {
    /// Short category name, stable across message wording changes.
    pub fn category(&self) -> &'static str {
        match self {
            ValidationError::InvalidPrice { .. } => "InvalidPrice",
            ValidationError::InvalidPercentage { .. } => "InvalidPercentage",
            ValidationError::ExpiryTooFar { .. } => "ExpiryTooFar",
            ValidationError::AlreadyExpired { .. } => "AlreadyExpired",
            ValidationError::InvalidVariant { .. } => "InvalidVariant",
        }
    }
}

/// Result type alias for pricer operations
pub type BsmResult<T> = Result<T, BsmError>;

impl From<csv::Error> for BsmError {
    fn from(err: csv::Error) -> Self {
        BsmError::Csv(err.to_string())
    }
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::BsmError::Config(format!($($arg)*))
    };
}
