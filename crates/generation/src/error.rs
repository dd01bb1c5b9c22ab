use thiserror::Error;

/// Failures of the generation stage. Every variant is fatal to a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No API key was supplied for the generation service.
    #[error("generation API key is not configured")]
    MissingApiKey,
    /// The HTTP client could not be built or the request never completed.
    #[error("generation request failed: {0}")]
    Request(String),
    /// The service answered with a non-success status.
    #[error("generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The service answered but produced no text.
    #[error("generation service returned no text")]
    EmptyResponse,
    /// The text was not a JSON array.
    #[error("generated output is not a JSON array: {reason}")]
    Parse { reason: String, raw: String },
    /// The array parsed but no entry matched the candidate shape.
    #[error("generated output does not match the candidate schema: {reason}")]
    Schema { reason: String, raw: String },
}

impl GenerationError {
    /// Raw model output attached to parse failures, for diagnostics.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            GenerationError::Parse { raw, .. } | GenerationError::Schema { raw, .. } => {
                Some(raw.as_str())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_and_body() {
        let err = GenerationError::Status {
            status: 403,
            body: "API key not valid".into(),
        };
        let text = err.to_string();
        assert!(text.contains("403"));
        assert!(text.contains("API key not valid"));
        assert!(err.raw_output().is_none());
    }

    #[test]
    fn parse_errors_expose_raw_output() {
        let err = GenerationError::Parse {
            reason: "expected value at line 1 column 1".into(),
            raw: "Sure! Here are some gifts".into(),
        };
        assert_eq!(err.raw_output(), Some("Sure! Here are some gifts"));
        assert!(err.to_string().contains("not a JSON array"));

        let schema = GenerationError::Schema {
            reason: "entry 0: missing `price`".into(),
            raw: "[{}]".into(),
        };
        assert_eq!(schema.raw_output(), Some("[{}]"));
    }
}
