//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Testing
//!
//! See integration tests in `tests/store_*.rs` for usage examples.

pub mod alias_store;

pub use alias_store::{AliasStore, StoreError, StoreResult};

#[cfg(test)]
pub use alias_store::MockAliasStore;
