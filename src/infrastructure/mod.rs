//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and wraps
//! outbound I/O.
//!
//! # Modules
//!
//! - [`persistence`] - In-memory and JSON-file alias stores
//! - [`probe`] - Reachability checks for submitted URLs

pub mod persistence;
pub mod probe;
