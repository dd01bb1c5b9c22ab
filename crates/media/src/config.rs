use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Credentials and tuning for the video and image lookups.
///
/// Both lookups share one search API key. Image search additionally needs a
/// search engine id; without it only video lookups run.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    #[serde(skip_serializing)]
    pub search_engine_id: Option<String>,
    pub youtube_base_url: String,
    pub custom_search_base_url: String,
    pub video_timeout_ms: u64,
    pub image_timeout_ms: u64,
    /// How many videos to request from the service before filtering.
    pub video_candidates: usize,
    /// How many relevant video ids to keep.
    pub max_videos: usize,
    /// Retailer domain image results are restricted to. Empty disables it.
    pub retailer_site: String,
    /// Qualifier appended to item names for image queries.
    pub image_query_qualifier: String,
    pub safe_search: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            search_engine_id: None,
            youtube_base_url: "https://www.googleapis.com/youtube/v3".into(),
            custom_search_base_url: "https://www.googleapis.com/customsearch/v1".into(),
            video_timeout_ms: 3000,
            image_timeout_ms: 2000,
            video_candidates: 5,
            max_videos: 3,
            retailer_site: "amazon.co.jp".into(),
            image_query_qualifier: "商品画像".into(),
            safe_search: true,
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl MediaConfig {
    pub fn api_key(&self) -> Option<&str> {
        present(&self.api_key)
    }

    pub fn search_engine_id(&self) -> Option<&str> {
        present(&self.search_engine_id)
    }

    pub fn video_enabled(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn image_enabled(&self) -> bool {
        self.api_key().is_some() && self.search_engine_id().is_some()
    }

    pub fn video_timeout(&self) -> Duration {
        Duration::from_millis(self.video_timeout_ms)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }

    /// Query sent to the image lookup for a given item name.
    pub fn image_query(&self, item_name: &str) -> String {
        match self.image_query_qualifier.trim() {
            "" => item_name.to_string(),
            qualifier => format!("{item_name} {qualifier}"),
        }
    }
}

impl fmt::Debug for MediaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("search_engine_id", &self.search_engine_id)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("custom_search_base_url", &self.custom_search_base_url)
            .field("video_timeout_ms", &self.video_timeout_ms)
            .field("image_timeout_ms", &self.image_timeout_ms)
            .field("video_candidates", &self.video_candidates)
            .field("max_videos", &self.max_videos)
            .field("retailer_site", &self.retailer_site)
            .field("image_query_qualifier", &self.image_query_qualifier)
            .field("safe_search", &self.safe_search)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = MediaConfig::default();
        assert_eq!(cfg.video_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.image_timeout(), Duration::from_secs(2));
        assert_eq!(cfg.video_candidates, 5);
        assert_eq!(cfg.max_videos, 3);
        assert!(!cfg.video_enabled());
        assert!(!cfg.image_enabled());
    }

    #[test]
    fn image_needs_engine_id() {
        let cfg = MediaConfig {
            api_key: Some("key".into()),
            ..Default::default()
        };
        assert!(cfg.video_enabled());
        assert!(!cfg.image_enabled());

        let cfg = MediaConfig {
            search_engine_id: Some("cx".into()),
            ..cfg
        };
        assert!(cfg.image_enabled());
    }

    #[test]
    fn image_query_appends_qualifier() {
        let cfg = MediaConfig::default();
        assert_eq!(cfg.image_query("JBL Clip 4"), "JBL Clip 4 商品画像");

        let bare = MediaConfig {
            image_query_qualifier: String::new(),
            ..Default::default()
        };
        assert_eq!(bare.image_query("JBL Clip 4"), "JBL Clip 4");
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = MediaConfig {
            api_key: Some("very-secret".into()),
            ..Default::default()
        };
        assert!(!format!("{cfg:?}").contains("very-secret"));
    }
}
