use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use concierge::{GeminiClient, Recommender};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Recommendation pipeline (shared across requests)
    pub recommender: Recommender,

    /// Direct client for model listing
    pub models: Arc<GeminiClient>,

    /// Prometheus render handle, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state with the live Gemini and search adapters
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let pipeline = config.concierge()?;
        let recommender = Recommender::from_config(pipeline)?;
        Self::with_recommender(config, recommender)
    }

    /// Create server state around an existing recommender
    pub fn with_recommender(config: ServerConfig, recommender: Recommender) -> ServerResult<Self> {
        let models = GeminiClient::new(recommender.config().generation.clone())
            .map_err(|e| ServerError::Internal(format!("failed to build model client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            recommender,
            models: Arc::new(models),
            metrics: None,
        })
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
