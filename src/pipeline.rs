use std::fmt;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use generation::{
    build_prompt, parse_candidates, GeminiClient, GenerationError, Generator, UserPreferences,
};
use media::{ImageLookup, ProductImageSearch, VideoLookup, YouTubeSearch};

use crate::config::ConciergeConfig;
use crate::error::RecommendError;
use crate::item::{item_id, GiftItem};

/// Per-request lifecycle. Only `Generating` can end in failure once
/// validation has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Generating,
    Filtering,
    Enriching,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Generating => "generating",
            Stage::Filtering => "filtering",
            Stage::Enriching => "enriching",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Items plus what happened to them on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub items: Vec<GiftItem>,
    /// The budget band rejected everything and the unfiltered list was used.
    pub budget_relaxed: bool,
    /// Valid candidates the generator produced, before budget filtering.
    pub generated: usize,
}

/// Which external collaborators are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ComponentStatus {
    pub generation: bool,
    pub video_lookup: bool,
    pub image_lookup: bool,
}

/// Top-level coordinator: generate, filter, enrich.
#[derive(Clone)]
pub struct Recommender {
    config: Arc<ConciergeConfig>,
    generator: Arc<dyn Generator>,
    videos: Arc<dyn VideoLookup>,
    images: Arc<dyn ImageLookup>,
}

impl Recommender {
    pub fn new(
        config: ConciergeConfig,
        generator: Arc<dyn Generator>,
        videos: Arc<dyn VideoLookup>,
        images: Arc<dyn ImageLookup>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            generator,
            videos,
            images,
        }
    }

    /// Wires the Gemini client and the search adapters from `config`.
    pub fn from_config(config: ConciergeConfig) -> Result<Self, RecommendError> {
        let generator = GeminiClient::new(config.generation.clone())?;
        let videos = YouTubeSearch::new(config.media.clone());
        let images = ProductImageSearch::new(config.media.clone());
        Ok(Self::new(
            config,
            Arc::new(generator),
            Arc::new(videos),
            Arc::new(images),
        ))
    }

    pub fn config(&self) -> &ConciergeConfig {
        &self.config
    }

    pub fn status(&self) -> ComponentStatus {
        ComponentStatus {
            generation: self.generator.is_configured(),
            video_lookup: self.videos.is_enabled(),
            image_lookup: self.images.is_enabled(),
        }
    }

    /// Produces enriched suggestions for `prefs`.
    pub async fn enrich(&self, prefs: &UserPreferences) -> Result<Vec<GiftItem>, RecommendError> {
        self.recommend_with_report(prefs).await.map(|r| r.items)
    }

    /// Same as [`enrich`](Self::enrich), also reporting whether the budget
    /// fallback fired.
    pub async fn recommend_with_report(
        &self,
        prefs: &UserPreferences,
    ) -> Result<Recommendation, RecommendError> {
        trace_stage(Stage::Validating, prefs);
        self.validate(prefs)?;

        trace_stage(Stage::Generating, prefs);
        let prompt = build_prompt(prefs, &self.config.budget, &self.config.generation);
        let text = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(GenerationError::MissingApiKey) => {
                return Err(RecommendError::Config(
                    "generation API key is not configured".to_string(),
                ))
            }
            Err(err) => {
                tracing::error!(error = %err, "generation call failed");
                return Err(err.into());
            }
        };
        let candidates = parse_candidates(&text).map_err(|err| {
            tracing::error!(error = %err, "generation output rejected");
            RecommendError::from(err)
        })?;
        let generated = candidates.len();

        trace_stage(Stage::Filtering, prefs);
        let outcome = self.config.budget.filter(candidates, prefs.budget);
        if outcome.relaxed {
            tracing::warn!(
                budget = prefs.budget,
                candidates = generated,
                "budget constraints not honored; serving unfiltered candidates"
            );
        }
        let mut survivors = outcome.items;
        survivors.truncate(prefs.item_count as usize);

        let seed = chrono::Utc::now().timestamp_millis();
        let placeholder = self.config.enrichment.placeholder_image_url.as_str();
        let skeletons: Vec<GiftItem> = survivors
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| GiftItem::skeleton(candidate, item_id(seed, index), placeholder))
            .collect();

        trace_stage(Stage::Enriching, prefs);
        let items = self.enrich_items(skeletons).await;

        trace_stage(Stage::Done, prefs);
        tracing::info!(
            items = items.len(),
            generated,
            budget_relaxed = outcome.relaxed,
            "recommendation complete"
        );

        Ok(Recommendation {
            items,
            budget_relaxed: outcome.relaxed,
            generated,
        })
    }

    fn validate(&self, prefs: &UserPreferences) -> Result<(), RecommendError> {
        if !self.generator.is_configured() {
            return Err(RecommendError::Config(
                "generation API key is not configured".to_string(),
            ));
        }
        if prefs.budget == 0 {
            return Err(RecommendError::InvalidPreferences(
                "budget must be greater than zero".to_string(),
            ));
        }
        let max = self.config.enrichment.max_item_count;
        if prefs.item_count == 0 || prefs.item_count > max {
            return Err(RecommendError::InvalidPreferences(format!(
                "itemCount must be between 1 and {max}"
            )));
        }
        Ok(())
    }

    /// Runs every item's lookups at once and merges results back in input order.
    async fn enrich_items(&self, items: Vec<GiftItem>) -> Vec<GiftItem> {
        let width = items.len().max(1);

        let mut enriched: Vec<(usize, GiftItem)> =
            stream::iter(items.into_iter().enumerate().map(|(idx, item)| {
                let this = self.clone();
                async move { (idx, this.enrich_one(item).await) }
            }))
            .buffer_unordered(width)
            .collect()
            .await;

        enriched.sort_by_key(|(idx, _)| *idx);
        enriched.into_iter().map(|(_, item)| item).collect()
    }

    /// Both lookups for one item run as separate tasks. If either task dies,
    /// the item keeps its skeleton defaults.
    async fn enrich_one(&self, mut item: GiftItem) -> GiftItem {
        let video_query = item.name.clone();
        let image_query = self.config.media.image_query(&item.name);

        let videos = Arc::clone(&self.videos);
        let video_task = tokio::spawn(async move { videos.lookup_videos(&video_query).await });
        let images = Arc::clone(&self.images);
        let image_task = tokio::spawn(async move { images.lookup_image(&image_query).await });

        let (video_ids, image_url) = match tokio::join!(video_task, image_task) {
            (Ok(video_ids), Ok(image_url)) => (video_ids, image_url),
            (videos, images) => {
                let error = videos.err().or(images.err());
                tracing::warn!(
                    item = %item.name,
                    error = ?error,
                    "media enrichment task failed; keeping defaults"
                );
                return item;
            }
        };

        let max_videos = self.config.media.max_videos;
        let video_ids: Vec<String> = video_ids
            .into_iter()
            .filter(|id| !id.is_empty())
            .take(max_videos)
            .collect();
        if !video_ids.is_empty() {
            item.youtube_ids = Some(video_ids);
        }

        item.image_url = match image_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => url,
            None => self.config.enrichment.missing_image_url.clone(),
        };
        item
    }
}

fn trace_stage(stage: Stage, prefs: &UserPreferences) {
    tracing::debug!(
        %stage,
        budget = prefs.budget,
        item_count = prefs.item_count,
        occasion = %prefs.situation,
        "recommendation stage"
    );
}
