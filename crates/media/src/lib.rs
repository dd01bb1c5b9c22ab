//! Media enrichment lookups.
//!
//! Two adapters live here, both best-effort:
//!
//! - [`YouTubeSearch`] finds up to three short videos for a product name and
//!   drops results whose title/channel don't mention enough of the name
//!   (see [`relevance`]).
//! - [`ProductImageSearch`] finds one product photo, biased toward a retailer
//!   domain.
//!
//! Neither adapter returns an error to its caller. Missing credentials,
//! timeouts, HTTP failures and junk responses all collapse to an empty list or
//! `None`. The `try_lookup` methods expose the underlying [`LookupError`] for
//! logging and tests.
//!
//! Each call carries its own deadline (3s for video, 2s for images by
//! default). A slow lookup only ever cancels itself.

pub mod config;
pub mod error;
pub mod relevance;

mod image;
mod video;

use std::time::Duration;

use async_trait::async_trait;

pub use config::MediaConfig;
pub use error::LookupError;
pub use image::ProductImageSearch;
pub use relevance::{is_relevant, relevance_tokens, RelevanceFilter, RelevanceQuery};
pub use video::YouTubeSearch;

/// Finds short-video identifiers for a query. Never fails; empty means nothing usable.
#[async_trait]
pub trait VideoLookup: Send + Sync {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn lookup_videos(&self, query: &str) -> Vec<String>;
}

/// Finds one direct image link for a query. Never fails; `None` means nothing usable.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn lookup_image(&self, query: &str) -> Option<String>;
}

/// Shared client settings for both adapters. Per-call deadlines are applied
/// separately around each request.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(2))
        .pool_max_idle_per_host(32)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default HTTP client");
            reqwest::Client::new()
        })
}
