use async_trait::async_trait;
use serde::Deserialize;

use crate::relevance::RelevanceFilter;
use crate::{http_client, LookupError, MediaConfig, VideoLookup};

/// Short-video lookup backed by the YouTube Data API `search` endpoint.
#[derive(Clone)]
pub struct YouTubeSearch {
    config: MediaConfig,
    http: reqwest::Client,
    relevance: RelevanceFilter,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: ItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
}

impl YouTubeSearch {
    pub fn new(config: MediaConfig) -> Self {
        Self::with_client(config, http_client())
    }

    pub fn with_client(config: MediaConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            relevance: RelevanceFilter::default(),
        }
    }

    pub fn with_relevance(mut self, relevance: RelevanceFilter) -> Self {
        self.relevance = relevance;
        self
    }

    /// Like [`VideoLookup::lookup_videos`], but reports why nothing came back.
    pub async fn try_lookup(&self, query: &str) -> Result<Vec<String>, LookupError> {
        let key = self.config.api_key().ok_or(LookupError::NotConfigured)?;
        let deadline = self.config.video_timeout();
        let items = tokio::time::timeout(deadline, self.search(key, query))
            .await
            .map_err(|_| LookupError::Timeout(deadline))??;
        Ok(self.select(query, items))
    }

    async fn search(&self, key: &str, query: &str) -> Result<Vec<SearchItem>, LookupError> {
        let url = format!("{}/search", self.config.youtube_base_url.trim_end_matches('/'));
        let max_results = self.config.video_candidates.to_string();
        let response = self
            .http
            .get(url)
            .query(&[
                ("part", "snippet"),
                ("maxResults", max_results.as_str()),
                ("q", query),
                ("type", "video"),
                ("videoDuration", "short"),
                ("key", key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let body: SearchResponse = response.json().await?;
        Ok(body.items)
    }

    /// Keeps relevant results in service order, capped at `max_videos`.
    fn select(&self, query: &str, items: Vec<SearchItem>) -> Vec<String> {
        let relevance = self.relevance.query(query);
        items
            .into_iter()
            .take(self.config.video_candidates)
            .filter(|item| {
                let text = format!("{} {}", item.snippet.title, item.snippet.channel_title);
                relevance.matches(&text)
            })
            .filter_map(|item| item.id.video_id.filter(|id| !id.is_empty()))
            .take(self.config.max_videos)
            .collect()
    }
}

#[async_trait]
impl VideoLookup for YouTubeSearch {
    fn is_enabled(&self) -> bool {
        self.config.video_enabled()
    }

    async fn lookup_videos(&self, query: &str) -> Vec<String> {
        match self.try_lookup(query).await {
            Ok(ids) => {
                tracing::debug!(query, found = ids.len(), "video lookup finished");
                ids
            }
            Err(LookupError::NotConfigured) => Vec::new(),
            Err(err) => {
                tracing::warn!(query, error = %err, "video lookup failed");
                Vec::new()
            }
        }
    }
}
