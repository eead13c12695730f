//! Console-facing super-admin session
//!
//! One [`SuperAdminSession`] per console owns the cache, the authority
//! client and the dispatcher. Independent instances share nothing.

use crate::authority::{HttpAuthority, HttpIpLookup, IpLookup, RemoteAuthority};
use crate::cache::SessionCache;
use crate::client::{AuthorityClient, Validity};
use crate::dispatcher::{OperationDispatcher, PendingOperations};
use chrono::{DateTime, Utc};
use condo_config::SessionConfig;
use condo_core::{Error, Result, SessionToken};
use serde_json::Value;
use std::sync::Arc;

pub struct SuperAdminSession {
    cache: Arc<SessionCache>,
    client: Arc<AuthorityClient>,
    dispatcher: OperationDispatcher,
}

impl SuperAdminSession {
    /// Build a session manager over the given collaborators
    pub fn new(
        config: SessionConfig,
        authority: Arc<dyn RemoteAuthority>,
        ip_lookup: Arc<dyn IpLookup>,
    ) -> Self {
        let cache = Arc::new(SessionCache::new());
        let dispatcher =
            OperationDispatcher::new(Arc::clone(&cache), Arc::clone(&authority), config.request_timeout);
        let client = Arc::new(AuthorityClient::new(
            Arc::clone(&cache),
            authority,
            ip_lookup,
            config,
        ));

        Self {
            cache,
            client,
            dispatcher,
        }
    }

    /// Build a session manager talking HTTP to the configured endpoints
    ///
    /// `identity_token` is the operator's primary sign-in token; the remote
    /// authority derives privilege from it.
    pub fn connect(config: SessionConfig, identity_token: Option<String>) -> Result<Self> {
        config.validate()?;
        let authority = HttpAuthority::new(config.clone())?;
        authority.set_identity_token(identity_token);
        let ip_lookup = HttpIpLookup::new(&config)?;
        Ok(Self::new(config, Arc::new(authority), Arc::new(ip_lookup)))
    }

    /// Mint an elevated session
    ///
    /// Returns `Ok(true)` once the session is cached and the revalidation
    /// timer is running; any failure leaves no session behind.
    pub async fn initialize(&self) -> Result<bool> {
        self.client.mint_session().await.map(|_| true)
    }

    /// Current elevated token, clearing the session if it has expired
    #[must_use]
    pub fn session_token(&self) -> Option<SessionToken> {
        self.cache.token()
    }

    /// Token for a guarded screen or action, or `Unauthorized`
    pub fn require_session(&self, operation: &str) -> Result<SessionToken> {
        self.cache
            .token()
            .ok_or_else(|| Error::unauthorized(operation))
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.cache.expires_at()
    }

    /// Revalidate the session now
    pub async fn validate(&self) -> bool {
        matches!(self.client.revalidate_session().await, Validity::Valid(_))
    }

    /// Execute one privileged operation
    pub async fn execute(&self, operation: &str, target_id: &str, payload: Value) -> Result<Value> {
        self.dispatcher.execute(operation, target_id, payload).await
    }

    #[must_use]
    pub fn pending(&self) -> &PendingOperations {
        self.dispatcher.pending()
    }

    /// Drop the session and stop revalidation; safe to call repeatedly
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// End of life for this console session
    pub fn dispose(&self) {
        tracing::debug!("disposing super-admin session");
        self.cache.clear();
    }
}

impl Drop for SuperAdminSession {
    fn drop(&mut self) {
        self.cache.clear();
    }
}
