//! HTTP server initialization and runtime setup.
//!
//! Builds the configured store and probe, wires them into the alias service
//! and runs the Axum server until Ctrl-C or SIGTERM.

use crate::application::services::AliasService;
use crate::config::{Config, ProbePolicy, StoreBackend};
use crate::domain::repositories::AliasStore;
use crate::infrastructure::persistence::{FileAliasStore, MemoryAliasStore};
use crate::infrastructure::probe::{HttpProbe, NullProbe, ReachabilityProbe};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The alias store selected by `STORE_BACKEND`
/// - The reachability probe selected by `PROBE_POLICY`
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The store file cannot be created
/// - The HTTP client for the probe cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the shared state from configuration.
///
/// # Errors
///
/// See [`build_store`] and [`build_probe`].
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store = build_store(config).await?;
    let probe = build_probe(config)?;

    let alias_service = Arc::new(AliasService::new(
        store,
        probe,
        config.public_base_url.clone(),
        config.probe_policy,
    ));

    Ok(AppState::new(alias_service, config.store_backend))
}

/// Constructs the store selected by `STORE_BACKEND`.
///
/// # Errors
///
/// Returns an error if the file backend cannot create its file.
pub async fn build_store(config: &Config) -> Result<Arc<dyn AliasStore>> {
    let store: Arc<dyn AliasStore> = match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Store: in-memory (entries are lost on restart)");
            Arc::new(MemoryAliasStore::new())
        }
        StoreBackend::File => {
            let store = FileAliasStore::open(&config.store_file)
                .await
                .with_context(|| format!("Failed to open store file {}", config.store_file))?;
            tracing::info!("Store: file {}", store.path().display());
            Arc::new(store)
        }
    };

    Ok(store)
}

/// Constructs the probe selected by `PROBE_POLICY`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_probe(config: &Config) -> Result<Arc<dyn ReachabilityProbe>> {
    let probe: Arc<dyn ReachabilityProbe> = match config.probe_policy {
        ProbePolicy::Off => Arc::new(NullProbe::new()),
        ProbePolicy::Warn | ProbePolicy::Strict => Arc::new(HttpProbe::new(Duration::from_secs(
            config.probe_timeout_seconds,
        ))?),
    };

    Ok(probe)
}

/// Resolves when the process receives Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
