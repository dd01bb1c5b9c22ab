//! Gift Concierge recommendation pipeline.
//!
//! This crate stitches the stage crates together behind one entry point,
//! [`Recommender`]. A request flows through four stages:
//!
//! 1. **Generate** - [`generation`] builds a prompt from the user's
//!    [`UserPreferences`] and parses the model's JSON reply into candidates.
//! 2. **Filter** - [`budget`] keeps candidates inside the budget band, or all
//!    of them if none fit.
//! 3. **Enrich** - [`media`] looks up short videos and a product image for
//!    every surviving candidate. All lookups run concurrently, each with its
//!    own timeout, and a failed lookup only affects its own item.
//! 4. **Merge** - results are folded back into [`GiftItem`]s in candidate
//!    order.
//!
//! Only the generation stage can fail a request. Everything after it is
//! best-effort.
//!
//! ```no_run
//! use concierge::{ConciergeConfig, Recommender};
//! # use concierge::{AgeBracket, Gender, Occasion, UserPreferences};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConciergeConfig::default().with_credentials(
//!     std::env::var("GEMINI_API_KEY").ok(),
//!     std::env::var("YOUTUBE_API_KEY").ok(),
//!     std::env::var("GOOGLE_SEARCH_ENGINE_ID").ok(),
//! );
//! let recommender = Recommender::from_config(config)?;
//! # let prefs = UserPreferences {
//! #     recipient_gender: Gender::Female, recipient_age: AgeBracket::Twenties,
//! #     relation: "friend".into(), budget: 5000, vibe: vec![],
//! #     situation: Occasion::Birthday, is_bulk_order: false, item_count: 3,
//! # };
//! for item in recommender.enrich(&prefs).await? {
//!     println!("{} ({}): {}", item.name, item.price, item.image_url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod item;
pub mod pipeline;

pub use budget::{BudgetBand, BudgetOutcome, BudgetPolicy};
pub use generation::{
    AgeBracket, GeminiClient, Gender, GenerationConfig, GenerationError, Generator, Occasion,
    RawCandidate, UserPreferences,
};
pub use media::{ImageLookup, MediaConfig, VideoLookup};

pub use config::{ConciergeConfig, ConfigLoadError, EnrichmentConfig};
pub use error::RecommendError;
pub use item::GiftItem;
pub use pipeline::{ComponentStatus, Recommendation, Recommender, Stage};
