//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::AliasService;
use crate::config::StoreBackend;
use crate::domain::repositories::AliasStore;
use crate::infrastructure::probe::ReachabilityProbe;

/// Alias service over type-erased store and probe, as selected at startup.
pub type DynAliasService = AliasService<dyn AliasStore, dyn ReachabilityProbe>;

#[derive(Clone)]
pub struct AppState {
    pub alias_service: Arc<DynAliasService>,
    /// Reported by the health endpoint.
    pub store_backend: StoreBackend,
}

impl AppState {
    pub fn new(alias_service: Arc<DynAliasService>, store_backend: StoreBackend) -> Self {
        Self {
            alias_service,
            store_backend,
        }
    }
}
