//! Domain layer containing the entity and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - The [`repositories::AliasStore`] capability trait and its error type
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Concrete stores live in `crate::infrastructure::persistence`.

pub mod entities;
pub mod repositories;
