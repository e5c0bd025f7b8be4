//! Alias creation, resolution and revocation.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::ProbePolicy;
use crate::domain::repositories::{AliasStore, StoreError};
use crate::error::AppError;
use crate::infrastructure::probe::{ProbeOutcome, ReachabilityProbe};
use crate::utils::code_generator::derive_code;
use crate::utils::url_validator::validate_url;

/// Code used by [`AliasService::check_store`]; never produced by `derive_code`.
const HEALTH_PROBE_CODE: &str = "__health__";

/// Result of a successful [`AliasService::shorten`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    /// Set when the reachability probe failed but the policy let the
    /// alias be stored anyway.
    pub warning: Option<String>,
}

/// Service that turns long URLs into content-derived short codes and
/// coordinates add/remove/get against the configured store.
///
/// Store errors are translated into [`AppError`]s here; handlers never see
/// a [`StoreError`].
pub struct AliasService<S: AliasStore + ?Sized, P: ReachabilityProbe + ?Sized> {
    store: Arc<S>,
    probe: Arc<P>,
    public_base_url: String,
    probe_policy: ProbePolicy,
}

impl<S: AliasStore + ?Sized, P: ReachabilityProbe + ?Sized> AliasService<S, P> {
    /// Creates a new alias service.
    pub fn new(
        store: Arc<S>,
        probe: Arc<P>,
        public_base_url: impl Into<String>,
        probe_policy: ProbePolicy,
    ) -> Self {
        Self {
            store,
            probe,
            public_base_url: public_base_url.into(),
            probe_policy,
        }
    }

    /// Shortens `long_url`.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL (non-empty, parseable, http/https)
    /// 2. Probe reachability unless the policy is [`ProbePolicy::Off`]
    /// 3. Derive the code from the literal URL
    /// 4. Insert into the store
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for empty or malformed input
    /// - [`AppError::Upstream`] if the probe fails under [`ProbePolicy::Strict`]
    /// - [`AppError::Conflict`] if the code is taken. `details.reason` is
    ///   `already_shortened` when the stored target equals `long_url` and
    ///   `hash_collision` when a different URL owns the code
    /// - [`AppError::Unavailable`] if the store medium fails
    pub async fn shorten(&self, long_url: &str) -> Result<ShortenedLink, AppError> {
        validate_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let warning = self.probe_target(long_url).await?;

        let code = derive_code(long_url);

        match self.store.add(&code, long_url).await {
            Ok(()) => {}
            Err(StoreError::AlreadyExists(_)) => {
                return Err(self.explain_conflict(&code, long_url).await);
            }
            Err(e) => return Err(e.into()),
        }

        info!(code = %code, long_url, "Short link created");

        Ok(ShortenedLink {
            short_url: self.short_url(&code),
            code,
            long_url: long_url.to_owned(),
            warning,
        })
    }

    /// Returns the target of `code`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `code` is empty
    /// - [`AppError::NotFound`] if `code` is not stored
    /// - [`AppError::Unavailable`] if the store medium fails
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let code = require_code(code)?;
        let target = self.store.get(code).await?;
        debug!(code, target = %target, "Short link resolved");
        Ok(target)
    }

    /// Deletes `code`.
    ///
    /// Not idempotent: revoking a code twice fails the second time with
    /// [`AppError::NotFound`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn revoke(&self, code: &str) -> Result<(), AppError> {
        let code = require_code(code)?;
        self.store.remove(code).await?;
        info!(code, "Short link revoked");
        Ok(())
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), code)
    }

    /// Verifies the store can serve a lookup.
    ///
    /// A miss counts as healthy; only medium failures are reported.
    pub async fn check_store(&self) -> Result<(), AppError> {
        match self.store.get(HEALTH_PROBE_CODE).await {
            Ok(_) | Err(StoreError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Runs the probe and applies the policy.
    ///
    /// Returns the warning to surface to the caller, if any.
    async fn probe_target(&self, long_url: &str) -> Result<Option<String>, AppError> {
        if self.probe_policy == ProbePolicy::Off {
            return Ok(None);
        }

        match self.probe.check(long_url).await {
            ProbeOutcome::Reachable => Ok(None),
            ProbeOutcome::Unreachable { reason } => match self.probe_policy {
                ProbePolicy::Strict => Err(AppError::upstream(
                    "Target URL is not reachable",
                    json!({ "url": long_url, "reason": reason }),
                )),
                _ => {
                    warn!(long_url, reason = %reason, "Target not reachable, storing anyway");
                    Ok(Some(format!("target not reachable: {}", reason)))
                }
            },
        }
    }

    /// Builds the conflict error for a code that is already stored.
    async fn explain_conflict(&self, code: &str, long_url: &str) -> AppError {
        match self.store.get(code).await {
            Ok(existing) if existing == long_url => AppError::conflict(
                "URL has already been shortened",
                json!({
                    "code": code,
                    "reason": "already_shortened",
                    "short_url": self.short_url(code),
                }),
            ),
            Ok(existing) => {
                warn!(code, long_url, existing = %existing, "Short code collision");
                AppError::conflict(
                    "Short code is already used by a different URL",
                    json!({ "code": code, "reason": "hash_collision" }),
                )
            }
            Err(StoreError::NotFound(_)) => AppError::conflict(
                "Short code already exists",
                json!({ "code": code, "reason": "concurrent_update" }),
            ),
            Err(e) => e.into(),
        }
    }
}

fn require_code(code: &str) -> Result<&str, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::bad_request(
            "Short code is required",
            json!({ "field": "code" }),
        ));
    }
    Ok(code)
}
