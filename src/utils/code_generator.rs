//! Short code derivation.
//!
//! Codes are content-derived rather than random: the same long URL always
//! maps to the same code, which makes re-submission idempotent at the key
//! level and lets a duplicate be detected by the store's uniqueness check.

use sha1::{Digest, Sha1};

/// Number of hex characters kept from the digest.
pub const CODE_LENGTH: usize = 10;

/// Derives the short code for `long_url`.
///
/// Hashes the literal input with SHA-1 and keeps the first [`CODE_LENGTH`]
/// lowercase hex characters. No normalization is applied, so
/// `https://example.com` and `https://example.com/` get different codes.
///
/// Two different URLs can share a prefix; callers must treat a store
/// conflict as either a re-submission or a collision.
///
/// # Examples
///
/// ```
/// use url_alias::utils::code_generator::derive_code;
///
/// assert_eq!(derive_code("https://example.com"), "327c3fda87");
/// ```
pub fn derive_code(long_url: &str) -> String {
    let digest = Sha1::digest(long_url.as_bytes());
    let mut code = hex::encode(digest);
    code.truncate(CODE_LENGTH);
    code
}

/// Returns true if `code` has the shape produced by [`derive_code`].
///
/// Used by the admin tooling to flag entries that were not written by
/// this service; lookups accept any non-empty code.
pub fn is_derived_shape(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_code_known_value() {
        assert_eq!(derive_code("https://example.com"), "327c3fda87");
        assert_eq!(derive_code("https://rust-lang.org"), "8482c35012");
    }

    #[test]
    fn test_derive_code_is_deterministic() {
        let first = derive_code("https://example.com/some/path?q=1");
        let second = derive_code("https://example.com/some/path?q=1");
        assert_eq!(first, second);
    }

    #[test]
    fn test_derive_code_is_literal() {
        assert_eq!(derive_code("https://example.com/"), "b559c7edd3");
        assert_ne!(
            derive_code("https://example.com"),
            derive_code("https://example.com/")
        );
    }

    #[test]
    fn test_derive_code_length_and_alphabet() {
        let code = derive_code("http://a.test/1");
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(is_derived_shape(&code));
    }

    #[test]
    fn test_is_derived_shape() {
        assert!(is_derived_shape("327c3fda87"));
        assert!(!is_derived_shape("327C3FDA87"));
        assert!(!is_derived_shape("327c3fda8"));
        assert!(!is_derived_shape("my-custom-"));
        assert!(!is_derived_shape(""));
    }
}
