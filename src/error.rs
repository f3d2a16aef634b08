//! Errors raised at the edges of the quoting system
//!
//! The pricing core is total and never fails; only loading reference data,
//! reading client files and resolving ids can produce a `QuoteError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A selected condition id is not present in the catalog
    #[error("unknown condition id: {0}")]
    UnknownCondition(String),

    /// A text field did not name a known enum value
    #[error("unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

impl QuoteError {
    pub(crate) fn unknown(field: &'static str, value: &str) -> Self {
        QuoteError::UnknownValue {
            field,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
