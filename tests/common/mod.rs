#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;
use url_alias::api::routes::alias_routes;
use url_alias::application::services::AliasService;
use url_alias::config::{ProbePolicy, StoreBackend};
use url_alias::domain::repositories::AliasStore;
use url_alias::infrastructure::persistence::MemoryAliasStore;
use url_alias::infrastructure::probe::{NullProbe, ProbeOutcome, ReachabilityProbe};
use url_alias::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080/r";

/// Probe that always returns the same outcome.
pub struct StaticProbe(pub ProbeOutcome);

#[async_trait]
impl ReachabilityProbe for StaticProbe {
    async fn check(&self, _url: &str) -> ProbeOutcome {
        self.0.clone()
    }
}

pub fn create_test_state(
    store: Arc<dyn AliasStore>,
    probe: Arc<dyn ReachabilityProbe>,
    policy: ProbePolicy,
    backend: StoreBackend,
) -> AppState {
    let alias_service = Arc::new(AliasService::new(store, probe, BASE_URL, policy));
    AppState::new(alias_service, backend)
}

pub fn memory_state() -> AppState {
    create_test_state(
        Arc::new(MemoryAliasStore::new()),
        Arc::new(NullProbe::new()),
        ProbePolicy::Warn,
        StoreBackend::Memory,
    )
}

pub fn unreachable_state(policy: ProbePolicy) -> AppState {
    create_test_state(
        Arc::new(MemoryAliasStore::new()),
        Arc::new(StaticProbe(ProbeOutcome::unreachable(
            "responded with status 404 Not Found",
        ))),
        policy,
        StoreBackend::Memory,
    )
}

pub fn alias_app(state: AppState) -> Router {
    Router::new().merge(alias_routes()).with_state(state)
}
