use generation::GenerationError;
use thiserror::Error;

use crate::Stage;

/// Errors that fail a whole recommendation request.
///
/// Lookup failures never show up here; they are absorbed per item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// A required credential is missing.
    #[error("configuration error: {0}")]
    Config(String),
    /// The submitted preferences cannot be served.
    #[error("invalid preferences: {0}")]
    InvalidPreferences(String),
    /// The generation call failed or returned unusable output.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl RecommendError {
    /// Stage in which the request failed.
    pub fn stage(&self) -> Stage {
        match self {
            RecommendError::Config(_) | RecommendError::InvalidPreferences(_) => Stage::Validating,
            RecommendError::Generation(_) => Stage::Generating,
        }
    }

    /// Raw generation output, when the failure was a parse/schema problem.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            RecommendError::Generation(err) => err.raw_output(),
            _ => None,
        }
    }
}
