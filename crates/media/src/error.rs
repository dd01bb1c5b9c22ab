use std::time::Duration;

use thiserror::Error;

/// Why a lookup produced nothing. Adapters log it and return their degraded
/// value; it never reaches the recommendation caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("lookup is not configured")]
    NotConfigured,
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("search service returned HTTP {0}")]
    Status(u16),
    #[error("malformed search response: {0}")]
    Malformed(String),
    #[error("search returned no usable result")]
    NoResults,
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::Malformed(err.to_string())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}
