//! Candidate generation for gift recommendations.
//!
//! This crate owns the conversation with the generative model: turning a
//! [`UserPreferences`] into a prompt, sending it, and turning the reply back
//! into typed [`RawCandidate`]s.
//!
//! The model's reply is treated as untrusted text. [`parse_candidates`]
//! accepts a JSON array (optionally wrapped in a Markdown fence), checks each
//! entry against the expected shape, and drops the ones that don't fit. Only a
//! reply with nothing usable in it is an error.
//!
//! ```no_run
//! use budget::BudgetPolicy;
//! use generation::{build_prompt, parse_candidates, GeminiClient, GenerationConfig, Generator};
//! # use generation::{AgeBracket, Gender, Occasion, UserPreferences};
//!
//! # async fn run() -> Result<(), generation::GenerationError> {
//! # let prefs = UserPreferences {
//! #     recipient_gender: Gender::Male, recipient_age: AgeBracket::Twenties,
//! #     relation: "friend".into(), budget: 5000, vibe: vec![],
//! #     situation: Occasion::Birthday, is_bulk_order: false, item_count: 3,
//! # };
//! let cfg = GenerationConfig {
//!     api_key: Some("YOUR_GEMINI_KEY".into()),
//!     ..Default::default()
//! };
//! let client = GeminiClient::new(cfg.clone())?;
//! let prompt = build_prompt(&prefs, &BudgetPolicy::default(), &cfg);
//! let candidates = parse_candidates(&client.generate(&prompt).await?)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod types;

mod client;
mod parse;
mod prompt;

use async_trait::async_trait;

pub use client::GeminiClient;
pub use config::GenerationConfig;
pub use error::GenerationError;
pub use parse::{parse_candidates, strip_code_fence, CandidateIssue};
pub use prompt::build_prompt;
pub use types::{AgeBracket, Gender, Occasion, RawCandidate, UserPreferences};

/// A text-generation backend. One call per recommendation request.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Whether the backend has the credentials it needs.
    fn is_configured(&self) -> bool;

    /// Sends `prompt` and returns the raw text reply.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
