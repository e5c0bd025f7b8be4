//! [`AliasStore`](crate::domain::repositories::AliasStore) implementations.
//!
//! - [`MemoryAliasStore`] - Transient table, lost on restart
//! - [`FileAliasStore`] - Durable single JSON file
//!
//! Which one the server uses is decided once at startup from
//! `STORE_BACKEND` (see [`crate::config::StoreBackend`]).

pub mod file_store;
pub mod memory_store;

pub use file_store::FileAliasStore;
pub use memory_store::MemoryAliasStore;
