//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL. Syntax is checked by the service; this only
    /// rejects an empty string up front.
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,
}

/// Created alias.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shorted_url: String,
    pub long_url: String,

    /// Present when the target failed the reachability probe but was
    /// stored anyway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
