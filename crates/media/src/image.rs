use async_trait::async_trait;
use serde::Deserialize;

use crate::{http_client, ImageLookup, LookupError, MediaConfig};

/// Product-photo lookup backed by the Custom Search JSON API in image mode.
#[derive(Clone)]
pub struct ProductImageSearch {
    config: MediaConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ImageSearchResponse {
    #[serde(default)]
    items: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
struct ImageResult {
    #[serde(default)]
    link: String,
}

impl ProductImageSearch {
    pub fn new(config: MediaConfig) -> Self {
        Self::with_client(config, http_client())
    }

    pub fn with_client(config: MediaConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// The query actually sent, with the retailer restriction appended.
    pub fn scoped_query(&self, query: &str) -> String {
        match self.config.retailer_site.trim() {
            "" => query.to_string(),
            site => format!("{query} site:{site}"),
        }
    }

    /// Like [`ImageLookup::lookup_image`], but reports why nothing came back.
    pub async fn try_lookup(&self, query: &str) -> Result<String, LookupError> {
        let (Some(key), Some(engine)) = (self.config.api_key(), self.config.search_engine_id())
        else {
            return Err(LookupError::NotConfigured);
        };
        let deadline = self.config.image_timeout();
        tokio::time::timeout(deadline, self.search(key, engine, query))
            .await
            .map_err(|_| LookupError::Timeout(deadline))?
    }

    async fn search(&self, key: &str, engine: &str, query: &str) -> Result<String, LookupError> {
        let scoped = self.scoped_query(query);
        let safe = if self.config.safe_search { "active" } else { "off" };
        let response = self
            .http
            .get(&self.config.custom_search_base_url)
            .query(&[
                ("q", scoped.as_str()),
                ("cx", engine),
                ("searchType", "image"),
                ("key", key),
                ("num", "1"),
                ("safe", safe),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let body: ImageSearchResponse = response.json().await?;
        body.items
            .into_iter()
            .map(|item| item.link)
            .find(|link| !link.trim().is_empty())
            .ok_or(LookupError::NoResults)
    }
}

#[async_trait]
impl ImageLookup for ProductImageSearch {
    fn is_enabled(&self) -> bool {
        self.config.image_enabled()
    }

    async fn lookup_image(&self, query: &str) -> Option<String> {
        match self.try_lookup(query).await {
            Ok(link) => Some(link),
            Err(LookupError::NotConfigured) => None,
            Err(LookupError::NoResults) => {
                tracing::debug!(query, "image lookup found nothing");
                None
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "image lookup failed");
                None
            }
        }
    }
}
