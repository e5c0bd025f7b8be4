//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;

pub use health::{health_handler, index_handler};
pub use redirect::{missing_code_handler, redirect_handler, revoke_handler};
pub use shorten::shorten_handler;
