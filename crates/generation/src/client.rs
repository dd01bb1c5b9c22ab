use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{GenerationConfig, GenerationError, Generator};

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    config: GenerationConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(8)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerationError::MissingApiKey)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1beta/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Lists the models visible to the configured key. Used for diagnostics.
    pub async fn list_models(&self) -> Result<Value, GenerationError> {
        let key = self.api_key()?;
        let response = self
            .http
            .get(self.endpoint("models"))
            .query(&[("key", key)])
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let key = self.api_key()?;
        let url = self.endpoint(&format!("models/{}:generateContent", self.config.model));
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        tracing::debug!(model = %self.config.model, prompt_chars = prompt.chars().count(), "calling generation service");

        let response = self
            .http
            .post(url)
            .query(&[("key", key)])
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Request(format!("invalid response body: {e}")))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GenerationError::Status {
        status: status.as_u16(),
        body,
    })
}
