//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Response header carrying the probe warning, if any.
pub const PROBE_WARNING_HEADER: &str = "x-probe-warning";

/// Creates a short alias for a long URL.
///
/// # Endpoint
///
/// `POST /add`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shorted_url": "http://localhost:8080/r/327c3fda87",
///   "long_url": "https://example.com"
/// }
/// ```
///
/// When the target fails the reachability probe under the `warn` policy the
/// alias is still created; the response then carries an `X-Probe-Warning`
/// header and a `warning` field.
///
/// # Errors
///
/// - 400 for a malformed body, empty or invalid URL
/// - 409 if the derived code is already stored
/// - 502 if the probe fails under the `strict` policy
/// - 503 if the store cannot be read or written
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state.alias_service.shorten(&payload.url).await?;

    let mut headers = HeaderMap::new();
    if let Some(warning) = &link.warning
        && let Ok(value) = HeaderValue::from_str(warning)
    {
        headers.insert(PROBE_WARNING_HEADER, value);
    }

    Ok((
        StatusCode::CREATED,
        headers,
        Json(ShortenResponse {
            shorted_url: link.short_url,
            long_url: link.long_url,
            warning: link.warning,
        }),
    ))
}
