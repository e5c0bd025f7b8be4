//! Long URL validation.
//!
//! The service does not rewrite submitted URLs (the short code is derived
//! from the literal string), so validation only checks that the input parses
//! and can be probed over HTTP.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL must not contain surrounding whitespace or control characters")]
    StrayCharacters,
}

/// Validates a submitted long URL.
///
/// # Rules
///
/// 1. Must not be empty or whitespace-only
/// 2. Must not carry leading/trailing whitespace or control characters
///    (`Url::parse` drops them silently, but the literal string is what gets
///    stored and redirected to)
/// 3. Must parse as an absolute URL
/// 4. Scheme must be `http` or `https`
/// 5. Must have a host
///
/// Rejects `javascript:`, `data:`, `file:` and similar schemes.
///
/// # Errors
///
/// Returns the first violated rule as a [`UrlValidationError`].
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com").is_ok());
/// assert!(validate_url("example.com").is_err());
/// assert!(validate_url("ftp://example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input != input.trim() || input.chars().any(char::is_control) {
        return Err(UrlValidationError::StrayCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// Returns the value to send in a `Location` header for a stored target.
///
/// Targets that are already printable ASCII are returned unchanged. Anything
/// else (non-ASCII paths, IDN hosts) is re-serialized through [`Url`], which
/// percent-encodes the path and punycodes the host.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] if a non-ASCII target does
/// not parse, which only happens for hand-edited store files.
pub fn redirect_location(target: &str) -> Result<String, UrlValidationError> {
    if target.is_ascii() && !target.chars().any(char::is_control) {
        return Ok(target.to_owned());
    }

    Url::parse(target)
        .map(String::from)
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))
}
