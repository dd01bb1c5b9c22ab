//! Gift Concierge Server - HTTP REST API for gift recommendations
//!
//! Exposes the [`concierge`] pipeline over HTTP with request id tracking,
//! structured JSON logging, Prometheus metrics and graceful shutdown.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with per-adapter status
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/v1/recommend` - Gift recommendations (alias `POST /api/gift-recommend`)
//! - `GET /api/v1/models` - Models visible to the configured Gemini key
//!
//! Credentials come from `GIFT_SERVER__GEMINI_API_KEY` and friends, or the
//! plain `GEMINI_API_KEY`, `YOUTUBE_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID`
//! variables. `.env.local` and `.env` are read at startup.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
