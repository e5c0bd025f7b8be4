//! Application layer services implementing business logic.
//!
//! Services consume the store and probe traits and give HTTP handlers and
//! the admin CLI a small API that already speaks [`crate::error::AppError`].
//!
//! # Available Services
//!
//! - [`services::alias_service::AliasService`] - Shorten, resolve and revoke
//!   short links

pub mod services;
