use concierge::ConciergeConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds. Must cover the generation call plus enrichment.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Path to the pipeline YAML (`ConciergeConfig`)
    #[serde(default)]
    pub concierge_config: Option<String>,

    /// Gemini API key
    #[serde(default, skip_serializing)]
    pub gemini_api_key: Option<String>,

    /// YouTube Data / Custom Search API key
    #[serde(default, skip_serializing)]
    pub youtube_api_key: Option<String>,

    /// Custom Search engine id (`cx`)
    #[serde(default, skip_serializing)]
    pub google_search_engine_id: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            concierge_config: None,
            gemini_api_key: None,
            youtube_api_key: None,
            google_search_engine_id: None,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_body_size_kb", &self.max_body_size_kb)
            .field("enable_cors", &self.enable_cors)
            .field("log_level", &self.log_level)
            .field("metrics_enabled", &self.metrics_enabled)
            .field("concierge_config", &self.concierge_config)
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .field(
                "google_search_engine_id",
                &redact(&self.google_search_engine_id),
            )
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from `.env` files, an optional `server` config
    /// file and `GIFT_SERVER__*` environment variables.
    ///
    /// Credentials fall back to the plain `GEMINI_API_KEY`,
    /// `YOUTUBE_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID` variables.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("GIFT_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config.with_env_fallbacks(|name| std::env::var(name).ok()))
    }

    /// Fills unset credentials from `lookup`. Blank values count as unset.
    pub fn with_env_fallbacks(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fill = |slot: Option<String>, name: &str| {
            non_blank(slot).or_else(|| non_blank(lookup(name)))
        };
        self.gemini_api_key = fill(self.gemini_api_key.take(), "GEMINI_API_KEY");
        self.youtube_api_key = fill(self.youtube_api_key.take(), "YOUTUBE_API_KEY");
        self.google_search_engine_id = fill(
            self.google_search_engine_id.take(),
            "GOOGLE_SEARCH_ENGINE_ID",
        );
        self
    }

    /// Pipeline configuration with this server's credentials applied.
    pub fn concierge(&self) -> anyhow::Result<ConciergeConfig> {
        let base = match &self.concierge_config {
            Some(path) => ConciergeConfig::from_file(path)?,
            None => ConciergeConfig::default(),
        };
        Ok(base.with_credentials(
            self.gemini_api_key.clone(),
            self.youtube_api_key.clone(),
            self.google_search_engine_id.clone(),
        ))
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    90
}

fn default_max_body_size_kb() -> usize {
    64
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
