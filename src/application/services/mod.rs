//! Business logic services for the application layer.

pub mod alias_service;

pub use alias_service::{AliasService, ShortenedLink};
