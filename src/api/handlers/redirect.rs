//! Handlers for short code redirect and revocation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::redirect_location;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the store cannot be read.
/// Returns 500 Internal Server Error if the stored target cannot be turned
/// into a `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.alias_service.resolve(&code).await?;

    let location = redirect_location(&long_url).map_err(|e| {
        AppError::internal(
            "Stored target is not a valid URL",
            json!({ "code": code, "reason": e.to_string() }),
        )
    })?;

    Ok(Redirect::temporary(&location))
}

/// Deletes a short code.
///
/// # Endpoint
///
/// `DELETE /r/{code}`
///
/// # Response
///
/// `200 OK` with a plain-text confirmation.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist, including when
/// it was already revoked.
pub async fn revoke_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state.alias_service.revoke(&code).await?;

    Ok((StatusCode::OK, "Short link revoked"))
}

/// Answers `GET /r` and `DELETE /r`, where the code segment is missing.
///
/// # Errors
///
/// Always returns 400 Bad Request.
pub async fn missing_code_handler() -> AppError {
    AppError::bad_request("Short code is required", json!({ "field": "code" }))
}
