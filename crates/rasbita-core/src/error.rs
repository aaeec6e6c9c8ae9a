//! Error types for RASBITA scoring

use thiserror::Error;

/// Scoring error type
#[derive(Error, Debug)]
pub enum ScoringError {
    /// Required field missing or numeric field out of range
    #[error("invalid input: {field}")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
    },

    /// Reference tables or engine settings failed validation
    #[error("config error: {0}")]
    Config(String),

    /// Reference tables file could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoringError {
    /// Shorthand for [`ScoringError::InvalidInput`]
    pub fn invalid(field: &'static str) -> Self {
        Self::InvalidInput { field }
    }

    /// Field name carried by an input error
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field } => Some(field),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ScoringError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for ScoringError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Result type for RASBITA scoring
pub type ScoringResult<T> = Result<T, ScoringError>;
