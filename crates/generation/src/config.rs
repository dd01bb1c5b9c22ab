use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the generation service client and the prompt it receives.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Gemini API key. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model id, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// Service root; overridden in tests to point at a local server.
    pub base_url: String,
    /// Overall timeout for one generation call.
    pub timeout_secs: u64,
    /// Currency label shown next to prices in the prompt.
    pub currency: String,
    /// Language the model must answer in.
    pub language: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
            timeout_secs: 60,
            currency: "JPY".into(),
            language: "Japanese".into(),
        }
    }
}

impl GenerationConfig {
    /// Whether a non-blank API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("currency", &self.currency)
            .field("language", &self.language)
            .finish()
    }
}
