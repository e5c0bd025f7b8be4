//! Transient in-process store.

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::repositories::{AliasStore, StoreError, StoreResult};

/// In-memory implementation of [`AliasStore`].
///
/// The table is owned by this value and lost when the process exits.
/// A single `RwLock` guards it: `add` and `remove` take the write half for
/// the whole check-and-mutate step, `get` takes the read half.
#[derive(Debug, Default)]
pub struct MemoryAliasStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryAliasStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using in-memory alias store");
        Self::default()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl AliasStore for MemoryAliasStore {
    async fn add(&self, code: &str, target: &str) -> StoreResult<()> {
        let mut items = self.items.write().await;
        match items.entry(code.to_owned()) {
            MapEntry::Occupied(_) => Err(StoreError::AlreadyExists(code.to_owned())),
            MapEntry::Vacant(slot) => {
                slot.insert(target.to_owned());
                debug!(code, target, "Entry added");
                Ok(())
            }
        }
    }

    async fn remove(&self, code: &str) -> StoreResult<()> {
        let mut items = self.items.write().await;
        if items.remove(code).is_none() {
            return Err(StoreError::NotFound(code.to_owned()));
        }
        debug!(code, "Entry removed");
        Ok(())
    }

    async fn get(&self, code: &str) -> StoreResult<String> {
        self.items
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(code.to_owned()))
    }
}
