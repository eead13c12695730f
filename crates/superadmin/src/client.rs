//! Remote authority client: minting and revalidating the elevated session
//!
//! Session state changes only through [`SessionCache`]. Both calls carry a
//! reentrancy flag so an overlapping second call becomes a no-op instead of
//! racing the first one over the cached session.

use crate::authority::{IpLookup, RemoteAuthority};
use crate::cache::SessionCache;
use crate::timer;
use chrono::{DateTime, Utc};
use condo_config::SessionConfig;
use condo_core::{
    AccessContext, Error, Result, VALIDATE_SESSION_FUNCTION, VERIFY_ACCESS_FUNCTION,
};
use condo_utils::{with_deadline, with_timeout, InFlightFlag};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a revalidation as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid(DateTime<Utc>),
    Invalid,
}

/// Internal outcome that keeps "skipped" apart from "rejected"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Revalidation {
    Valid(DateTime<Utc>),
    Invalid,
    /// Another revalidation was already running
    Skipped,
}

/// What one timer tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tick {
    /// Session is far from expiry
    Idle,
    Revalidated,
    /// Session is gone, the timer should end
    Stop,
}

pub struct AuthorityClient {
    cache: Arc<SessionCache>,
    authority: Arc<dyn RemoteAuthority>,
    ip_lookup: Arc<dyn IpLookup>,
    config: SessionConfig,
    minting: InFlightFlag,
    revalidating: InFlightFlag,
}

impl AuthorityClient {
    pub fn new(
        cache: Arc<SessionCache>,
        authority: Arc<dyn RemoteAuthority>,
        ip_lookup: Arc<dyn IpLookup>,
        config: SessionConfig,
    ) -> Self {
        Self {
            cache,
            authority,
            ip_lookup,
            config,
            minting: InFlightFlag::new(),
            revalidating: InFlightFlag::new(),
        }
    }

    /// Obtain a new elevated session and start revalidating it
    ///
    /// A call made while another mint is in flight fails with
    /// `OperationInProgress` without contacting the remote authority. Any
    /// failure leaves the cache empty.
    pub async fn mint_session(self: &Arc<Self>) -> Result<DateTime<Utc>> {
        let Some(_minting) = self.minting.try_acquire() else {
            tracing::debug!("mint already in flight, ignoring repeat call");
            return Err(Error::operation_in_progress(VERIFY_ACCESS_FUNCTION, None));
        };

        let context = self.access_context().await;
        if context.has_unknown_ip() {
            tracing::debug!("public IP unavailable, minting with sentinel");
        }

        let minted = with_timeout(VERIFY_ACCESS_FUNCTION, self.config.request_timeout, async {
            self.authority
                .verify_super_admin_access(&context)
                .await
                .map_err(|e| e.classify(VERIFY_ACCESS_FUNCTION))
        })
        .await
        .and_then(|grant| grant.into_session(VERIFY_ACCESS_FUNCTION));

        match minted {
            Ok((token, expires_at)) => {
                self.cache.set_session(token, expires_at);
                self.start_revalidation();
                tracing::info!(expires_at = %expires_at, "elevated session granted");
                Ok(expires_at)
            }
            Err(err) => {
                self.cache.clear();
                tracing::warn!(error = %err, kind = ?err.kind(), "elevated session refused");
                Err(err)
            }
        }
    }

    /// Ask the remote authority whether the cached session is still valid
    ///
    /// Never fails: every error is folded into `Invalid`, and any result other
    /// than a valid answer clears the session.
    pub async fn revalidate_session(&self) -> Validity {
        match self.revalidate().await {
            Revalidation::Valid(expires_at) => Validity::Valid(expires_at),
            Revalidation::Invalid | Revalidation::Skipped => Validity::Invalid,
        }
    }

    pub(crate) async fn revalidate(&self) -> Revalidation {
        let Some(token) = self.cache.token() else {
            return Revalidation::Invalid;
        };
        let Some(_revalidating) = self.revalidating.try_acquire() else {
            tracing::debug!("revalidation already in flight, skipping");
            return Revalidation::Skipped;
        };

        let answer = with_timeout(VALIDATE_SESSION_FUNCTION, self.config.request_timeout, async {
            self.authority
                .validate_super_admin_session(&token)
                .await
                .map_err(|e| e.classify(VALIDATE_SESSION_FUNCTION))
        })
        .await;

        match answer.map(|validation| validation.renewed_expiry()) {
            Ok(Some(expires_at)) if expires_at <= Utc::now() => {
                tracing::info!(expires_at = %expires_at, "remote authority renewed the session into the past");
                self.cache.invalidate(&token);
                Revalidation::Invalid
            }
            Ok(Some(expires_at)) => {
                if self.cache.refresh_expiry(&token, expires_at) {
                    tracing::debug!(expires_at = %expires_at, "elevated session revalidated");
                    Revalidation::Valid(expires_at)
                } else {
                    // Session was cleared or replaced while the call was in flight
                    Revalidation::Invalid
                }
            }
            Ok(None) => {
                tracing::info!("remote authority reports the elevated session as invalid");
                self.cache.invalidate(&token);
                Revalidation::Invalid
            }
            Err(err) => {
                tracing::warn!(error = %err, "elevated session revalidation failed");
                self.cache.invalidate(&token);
                Revalidation::Invalid
            }
        }
    }

    /// One firing of the revalidation timer
    pub(crate) async fn tick(&self) -> Tick {
        if self.cache.token().is_none() {
            return Tick::Stop;
        }
        let Some(expires_at) = self.cache.expires_at() else {
            return Tick::Stop;
        };

        let remaining = (expires_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        if remaining > self.config.freshness_window {
            return Tick::Idle;
        }

        match self.revalidate().await {
            Revalidation::Valid(_) => Tick::Revalidated,
            Revalidation::Skipped => Tick::Idle,
            Revalidation::Invalid => Tick::Stop,
        }
    }

    pub(crate) fn cache(&self) -> &Arc<SessionCache> {
        &self.cache
    }

    fn start_revalidation(self: &Arc<Self>) {
        let handle = timer::spawn_revalidation(Arc::downgrade(self), self.config.revalidation_interval);
        self.cache.install_timer(handle);
    }

    async fn access_context(&self) -> AccessContext {
        let ip = match with_deadline(self.config.ip_lookup_timeout, self.ip_lookup.public_ip()).await
        {
            Some(Ok(ip)) => Some(ip),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "public IP lookup failed");
                None
            }
            None => {
                tracing::debug!("public IP lookup timed out");
                None
            }
        };
        AccessContext::new(ip, self.config.client_id.clone())
    }
}
