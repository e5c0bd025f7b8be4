//! Entry entity representing a short code to target URL mapping.

use serde::{Deserialize, Serialize};

/// A stored alias.
///
/// The `code` is derived from `target` (see
/// [`crate::utils::code_generator::derive_code`]), so an entry is never
/// updated in place: changing the target means removing the old code and
/// adding a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub code: String,
    pub target: String,
}

impl Entry {
    /// Creates a new Entry instance.
    pub fn new(code: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target: target.into(),
        }
    }
}
