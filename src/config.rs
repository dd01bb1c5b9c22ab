//! YAML configuration for the recommendation pipeline.
//!
//! Tuning knobs for every stage (budget band, generation model and locale,
//! lookup timeouts, placeholder images) can live in one YAML file. Credentials
//! are normally injected from the environment with
//! [`ConciergeConfig::with_credentials`] rather than written to disk.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! budget:
//!   lower_percent: 80
//!   upper_percent: 120
//!   high_budget_threshold: 30000
//!
//! generation:
//!   model: "gemini-2.0-flash"
//!   timeout_secs: 60
//!   currency: "JPY"
//!   language: "Japanese"
//!
//! media:
//!   video_timeout_ms: 3000
//!   image_timeout_ms: 2000
//!   retailer_site: "amazon.co.jp"
//!   image_query_qualifier: "商品画像"
//!
//! enrichment:
//!   placeholder_image_url: "https://placehold.co/600x400?text=Gift"
//!   missing_image_url: "https://placehold.co/600x400?text=No+Image"
//!   max_item_count: 10
//! ```

use std::fs;
use std::path::Path;

use budget::BudgetPolicy;
use generation::GenerationConfig;
use media::MediaConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for the whole recommendation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConciergeConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub budget: BudgetPolicy,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl Default for ConciergeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            budget: BudgetPolicy::default(),
            generation: GenerationConfig::default(),
            media: MediaConfig::default(),
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl ConciergeConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ConciergeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Fill in credentials. `None` leaves the current value untouched.
    pub fn with_credentials(
        mut self,
        generation_key: Option<String>,
        search_key: Option<String>,
        search_engine_id: Option<String>,
    ) -> Self {
        if generation_key.is_some() {
            self.generation.api_key = generation_key;
        }
        if search_key.is_some() {
            self.media.api_key = search_key;
        }
        if search_engine_id.is_some() {
            self.media.search_engine_id = search_engine_id;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.budget
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("budget: {e}")))?;

        if self.generation.model.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "generation.model must not be empty".to_string(),
            ));
        }
        if self.generation.timeout_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "generation.timeout_secs must be >= 1".to_string(),
            ));
        }
        if self.media.video_timeout_ms == 0 || self.media.image_timeout_ms == 0 {
            return Err(ConfigLoadError::Validation(
                "media timeouts must be >= 1ms".to_string(),
            ));
        }
        if self.media.video_candidates == 0 {
            return Err(ConfigLoadError::Validation(
                "media.video_candidates must be >= 1".to_string(),
            ));
        }

        self.enrichment.validate()
    }
}

/// How enriched items are finalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Image used until (or unless) an item's enrichment completes.
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// Image used when the image lookup ran but found nothing.
    #[serde(default = "default_missing_image_url")]
    pub missing_image_url: String,

    /// Upper bound on the requested item count.
    #[serde(default = "default_max_item_count")]
    pub max_item_count: u32,
}

impl EnrichmentConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.placeholder_image_url.trim().is_empty()
            || self.missing_image_url.trim().is_empty()
        {
            return Err(ConfigLoadError::Validation(
                "enrichment placeholder image URLs must not be empty".to_string(),
            ));
        }
        if self.max_item_count == 0 {
            return Err(ConfigLoadError::Validation(
                "enrichment.max_item_count must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            placeholder_image_url: default_placeholder_image_url(),
            missing_image_url: default_missing_image_url(),
            max_item_count: default_max_item_count(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}
fn default_placeholder_image_url() -> String {
    "https://placehold.co/600x400?text=Gift".to_string()
}
fn default_missing_image_url() -> String {
    "https://placehold.co/600x400?text=No+Image".to_string()
}
fn default_max_item_count() -> u32 {
    10
}
