//! Scripted collaborators for unit tests

use crate::authority::{
    IpLookup, OperationRequest, RemoteAuthority, SessionGrant, SessionValidation,
};
use async_trait::async_trait;
use chrono::Utc;
use condo_config::SessionConfig;
use condo_core::{AccessContext, Error, RemoteError, RemoteStatus, Result, SessionToken};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) fn test_config() -> SessionConfig {
    SessionConfig {
        request_timeout: Duration::from_secs(2),
        ip_lookup_timeout: Duration::from_millis(500),
        revalidation_interval: Duration::from_secs(300),
        freshness_window: Duration::from_secs(600),
        ..SessionConfig::default()
    }
}

pub(crate) fn grant(token: &str, ttl: chrono::Duration) -> SessionGrant {
    SessionGrant {
        session_token: token.to_string(),
        expires_at: (Utc::now() + ttl).timestamp_millis(),
    }
}

pub(crate) fn denied(status: RemoteStatus) -> RemoteError {
    RemoteError::new(status, Some("rejected by test".to_string()))
}

pub(crate) struct FakeAuthority {
    pub verify_calls: AtomicUsize,
    pub validate_calls: AtomicUsize,
    pub operation_calls: AtomicUsize,
    pub contexts: Mutex<Vec<AccessContext>>,
    pub request_ids: Mutex<Vec<String>>,
    verify: Mutex<std::result::Result<SessionGrant, RemoteError>>,
    validate: Mutex<std::result::Result<SessionValidation, RemoteError>>,
    operation: Mutex<std::result::Result<Value, RemoteError>>,
    delay: Mutex<Duration>,
}

impl FakeAuthority {
    /// Grants `token` for one hour and accepts every operation
    pub fn granting(token: &str) -> Self {
        Self {
            verify_calls: AtomicUsize::new(0),
            validate_calls: AtomicUsize::new(0),
            operation_calls: AtomicUsize::new(0),
            contexts: Mutex::new(Vec::new()),
            request_ids: Mutex::new(Vec::new()),
            verify: Mutex::new(Ok(grant(token, chrono::Duration::hours(1)))),
            validate: Mutex::new(Ok(SessionValidation {
                valid: true,
                expires_at: Some((Utc::now() + chrono::Duration::hours(2)).timestamp_millis()),
            })),
            operation: Mutex::new(Ok(json!({"ok": true}))),
            delay: Mutex::new(Duration::ZERO),
        }
    }

    pub fn set_verify(&self, response: std::result::Result<SessionGrant, RemoteError>) {
        *self.verify.lock() = response;
    }

    pub fn set_validate(&self, response: std::result::Result<SessionValidation, RemoteError>) {
        *self.validate.lock() = response;
    }

    pub fn set_operation(&self, response: std::result::Result<Value, RemoteError>) {
        *self.operation.lock() = response;
    }

    /// Delay applied to every call before it answers
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = delay;
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn operation_calls(&self) -> usize {
        self.operation_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        let delay = *self.delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RemoteAuthority for FakeAuthority {
    async fn verify_super_admin_access(
        &self,
        context: &AccessContext,
    ) -> std::result::Result<SessionGrant, RemoteError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().push(context.clone());
        self.pause().await;
        self.verify.lock().clone()
    }

    async fn validate_super_admin_session(
        &self,
        _token: &SessionToken,
    ) -> std::result::Result<SessionValidation, RemoteError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.validate.lock().clone()
    }

    async fn super_admin_operation(
        &self,
        request: &OperationRequest<'_>,
    ) -> std::result::Result<Value, RemoteError> {
        self.operation_calls.fetch_add(1, Ordering::SeqCst);
        self.request_ids.lock().push(request.request_id.to_string());
        self.pause().await;
        self.operation.lock().clone()
    }
}

pub(crate) enum FakeIp {
    Fixed(&'static str),
    Failing,
    Hanging,
}

#[async_trait]
impl IpLookup for FakeIp {
    async fn public_ip(&self) -> Result<String> {
        match self {
            FakeIp::Fixed(ip) => Ok((*ip).to_string()),
            FakeIp::Failing => Err(Error::network("ip-lookup", "connection refused")),
            FakeIp::Hanging => std::future::pending().await,
        }
    }
}
