//! # url-alias
//!
//! A hash-based URL shortener built with Axum.
//!
//! A long URL is turned into a 10-character code (the first hex digits of
//! its SHA-1), stored in a pluggable key-value store, and later resolved
//! with a `307` redirect.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::entities::Entry`] entity and
//!   the [`domain::repositories::AliasStore`] contract
//! - **Application Layer** ([`application`]) - [`application::services::AliasService`]
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory and JSON-file
//!   stores, reachability probe
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export STORE_BACKEND=file STORE_FILE=Data.json
//! cargo run
//!
//! curl -X POST localhost:8080/add -d '{"url":"https://example.com"}' \
//!      -H 'content-type: application/json'
//! curl -i localhost:8080/r/327c3fda87
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AliasService, ShortenedLink};
    pub use crate::domain::entities::Entry;
    pub use crate::domain::repositories::{AliasStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{FileAliasStore, MemoryAliasStore};
    pub use crate::infrastructure::probe::{HttpProbe, NullProbe, ProbeOutcome, ReachabilityProbe};
    pub use crate::state::AppState;
}
