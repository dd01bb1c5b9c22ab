//! Stub collaborators shared by the pipeline integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use concierge::{
    AgeBracket, ConciergeConfig, Gender, GenerationError, Generator, ImageLookup, Occasion,
    Recommender, UserPreferences, VideoLookup,
};

pub fn prefs(budget: u64, item_count: u32) -> UserPreferences {
    UserPreferences {
        recipient_gender: Gender::Female,
        recipient_age: AgeBracket::Twenties,
        relation: "friend".into(),
        budget,
        vibe: vec!["stylish".into()],
        situation: Occasion::Birthday,
        is_bulk_order: false,
        item_count,
    }
}

pub fn candidates_json(items: &[(&str, u64)]) -> String {
    let entries: Vec<serde_json::Value> = items
        .iter()
        .map(|(name, price)| {
            serde_json::json!({
                "name": name,
                "price": price,
                "description": format!("{name} description"),
                "reason": "because",
                "category": "Gadget",
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

/// Tracks how many lookups are running at the same time.
#[derive(Default)]
pub struct Gauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl Gauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

pub struct StubGenerator {
    pub configured: bool,
    pub reply: Result<String, GenerationError>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            configured: true,
            reply: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: GenerationError) -> Self {
        Self {
            configured: true,
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::replying("[]")
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for StubGenerator {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

type VideoAnswer = Box<dyn Fn(&str) -> Vec<String> + Send + Sync>;
type ImageAnswer = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;
type Delay = Box<dyn Fn(&str) -> Duration + Send + Sync>;

fn no_delay() -> Delay {
    Box::new(|_| Duration::ZERO)
}

async fn stall(gauge: &Gauge, delay: Duration) {
    gauge.enter();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    gauge.leave();
}

pub struct StubVideos {
    answer: VideoAnswer,
    delay: Delay,
    gauge: Arc<Gauge>,
    pub queries: Mutex<Vec<String>>,
}

impl StubVideos {
    pub fn new(answer: impl Fn(&str) -> Vec<String> + Send + Sync + 'static) -> Self {
        Self {
            answer: Box::new(answer),
            delay: no_delay(),
            gauge: Arc::new(Gauge::default()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn none() -> Self {
        Self::new(|_| Vec::new())
    }

    pub fn with_delay(self, delay: Duration, gauge: Arc<Gauge>) -> Self {
        self.with_delay_by(move |_| delay, gauge)
    }

    /// Delay chosen per query.
    pub fn with_delay_by(
        mut self,
        delay: impl Fn(&str) -> Duration + Send + Sync + 'static,
        gauge: Arc<Gauge>,
    ) -> Self {
        self.delay = Box::new(delay);
        self.gauge = gauge;
        self
    }
}

#[async_trait]
impl VideoLookup for StubVideos {
    async fn lookup_videos(&self, query: &str) -> Vec<String> {
        self.queries.lock().unwrap().push(query.to_string());
        stall(&self.gauge, (self.delay)(query)).await;
        (self.answer)(query)
    }
}

pub struct StubImages {
    answer: ImageAnswer,
    delay: Delay,
    gauge: Arc<Gauge>,
    pub queries: Mutex<Vec<String>>,
}

impl StubImages {
    pub fn new(answer: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            answer: Box::new(answer),
            delay: no_delay(),
            gauge: Arc::new(Gauge::default()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn none() -> Self {
        Self::new(|_| None)
    }

    pub fn with_delay(self, delay: Duration, gauge: Arc<Gauge>) -> Self {
        self.with_delay_by(move |_| delay, gauge)
    }

    /// Delay chosen per query.
    pub fn with_delay_by(
        mut self,
        delay: impl Fn(&str) -> Duration + Send + Sync + 'static,
        gauge: Arc<Gauge>,
    ) -> Self {
        self.delay = Box::new(delay);
        self.gauge = gauge;
        self
    }
}

#[async_trait]
impl ImageLookup for StubImages {
    async fn lookup_image(&self, query: &str) -> Option<String> {
        self.queries.lock().unwrap().push(query.to_string());
        stall(&self.gauge, (self.delay)(query)).await;
        (self.answer)(query)
    }
}

pub fn recommender(
    generator: Arc<StubGenerator>,
    videos: Arc<StubVideos>,
    images: Arc<StubImages>,
) -> Recommender {
    Recommender::new(ConciergeConfig::default(), generator, videos, images)
}
