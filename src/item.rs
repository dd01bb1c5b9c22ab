use generation::RawCandidate;
use serde::{Deserialize, Serialize};

/// A finished suggestion as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftItem {
    /// Unique within one response only.
    pub id: String,
    pub name: String,
    pub price: u64,
    pub description: String,
    pub reason: String,
    pub category: String,
    /// Never empty; falls back to a placeholder.
    pub image_url: String,
    /// 1..=3 ids when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_ids: Option<Vec<String>>,
}

impl GiftItem {
    /// Builds an un-enriched item from a surviving candidate.
    pub fn skeleton(candidate: RawCandidate, id: String, placeholder_image_url: &str) -> Self {
        Self {
            id,
            name: candidate.name,
            price: candidate.price,
            description: candidate.description,
            reason: candidate.reason,
            category: candidate.category,
            image_url: placeholder_image_url.to_string(),
            youtube_ids: None,
        }
    }
}

/// `ai-<seed>-<index>`; the seed is the request's start time in millis.
pub fn item_id(seed: i64, index: usize) -> String {
    format!("ai-{seed}-{index}")
}
