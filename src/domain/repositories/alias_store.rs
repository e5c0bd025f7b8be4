//! Storage contract for short code mappings.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by [`AliasStore`] implementations.
///
/// `AlreadyExists` and `NotFound` are outcomes of the contract itself;
/// `Io` and `Corrupt` mean the backing medium could not be used and only
/// occur in the file-backed store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("code {0} already exists")]
    AlreadyExists(String),

    #[error("code {0} not found")]
    NotFound(String),

    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store content is malformed: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns true when the error comes from the backing medium rather
    /// than from the add/remove/get contract.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Corrupt(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Mapping from short code to target URL.
///
/// Exactly three operations. Every implementation must make `add` atomic
/// with respect to its existence check, so a code can never be inserted
/// twice, and must serialize concurrent callers internally.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryAliasStore`] - transient, lost on restart
/// - [`crate::infrastructure::persistence::FileAliasStore`] - durable single JSON file
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasStore: Send + Sync {
    /// Inserts `code -> target`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if `code` already maps to a target.
    async fn add(&self, code: &str, target: &str) -> StoreResult<()>;

    /// Deletes the mapping for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `code` is absent.
    async fn remove(&self, code: &str) -> StoreResult<()>;

    /// Returns the target for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `code` is absent.
    async fn get(&self, code: &str) -> StoreResult<String>;
}
