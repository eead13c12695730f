//! Privileged operation dispatch
//!
//! At most one call per (operation, target) is in flight. The pending entry
//! is owned by a guard, so it is released when the call settles for any
//! reason, including a timeout or the caller dropping the future.

use crate::authority::{OperationRequest, RemoteAuthority};
use crate::cache::SessionCache;
use condo_core::{Error, OperationKey, RequestId, Result};
use condo_utils::tracing::operation_settled;
use condo_utils::with_timeout;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Keys of privileged operations currently in flight
#[derive(Debug, Default)]
pub struct PendingOperations {
    keys: Mutex<HashSet<OperationKey>>,
}

impl PendingOperations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key`, or return `None` if it is already in flight
    fn try_insert(&self, key: OperationKey) -> Option<PendingGuard<'_>> {
        if self.keys.lock().insert(key.clone()) {
            Some(PendingGuard { pending: self, key })
        } else {
            None
        }
    }

    #[must_use]
    pub fn contains(&self, key: &OperationKey) -> bool {
        self.keys.lock().contains(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

struct PendingGuard<'a> {
    pending: &'a PendingOperations,
    key: OperationKey,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.keys.lock().remove(&self.key);
    }
}

/// Executes privileged operations with the cached elevated session
pub struct OperationDispatcher {
    cache: Arc<SessionCache>,
    authority: Arc<dyn RemoteAuthority>,
    request_timeout: Duration,
    pending: PendingOperations,
}

impl OperationDispatcher {
    pub fn new(
        cache: Arc<SessionCache>,
        authority: Arc<dyn RemoteAuthority>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            authority,
            request_timeout,
            pending: PendingOperations::new(),
        }
    }

    /// Run `operation` against `target_id` and return the remote result unchanged
    ///
    /// Fails with `Unauthorized` when no session is held and with
    /// `OperationInProgress` when the same operation on the same target is
    /// already running; neither contacts the remote authority. Failures that
    /// mean the session is no longer usable clear it before returning.
    pub async fn execute(&self, operation: &str, target_id: &str, payload: Value) -> Result<Value> {
        let Some(token) = self.cache.token() else {
            tracing::warn!(operation = %operation, "privileged operation without elevated session");
            return Err(Error::unauthorized(operation));
        };

        let key = OperationKey::new(operation, target_id);
        let Some(_pending) = self.pending.try_insert(key.clone()) else {
            tracing::debug!(operation = %operation, target_id = %target_id, "duplicate submission rejected");
            return Err(Error::operation_in_progress(
                operation,
                Some(target_id.to_string()),
            ));
        };

        let request_id = RequestId::generate(&key);
        let request = OperationRequest {
            session_token: token.expose(),
            operation,
            target_id,
            payload: &payload,
            request_id: request_id.as_str(),
        };

        tracing::debug!(
            operation = %operation,
            target_id = %target_id,
            request_id = %request_id,
            "dispatching privileged operation"
        );
        let started = Instant::now();
        let result = with_timeout(operation, self.request_timeout, async {
            self.authority
                .super_admin_operation(&request)
                .await
                .map_err(|e| e.classify(operation))
        })
        .await;

        operation_settled(
            operation,
            target_id,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            result.is_ok(),
        );

        result.map_err(|err| {
            if err.invalidates_session() {
                tracing::warn!(
                    operation = %operation,
                    request_id = %request_id,
                    error = %err,
                    "operation rejected the elevated session"
                );
                self.cache.invalidate(&token);
            }
            err
        })
    }

    #[must_use]
    pub fn pending(&self) -> &PendingOperations {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{denied, FakeAuthority};
    use chrono::Utc;
    use condo_core::{ErrorKind, RemoteError, RemoteStatus, SessionToken};
    use serde_json::json;

    fn dispatcher_with(authority: Arc<FakeAuthority>, with_session: bool) -> OperationDispatcher {
        let cache = Arc::new(SessionCache::new());
        if with_session {
            cache.set_session(
                SessionToken::new("abc"),
                Utc::now() + chrono::Duration::hours(1),
            );
        }
        OperationDispatcher::new(cache, authority, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_result_is_returned_unchanged() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_operation(Ok(json!({"deleted": "X", "audit": [1, 2]})));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        let result = dispatcher
            .execute("delete_client", "X", json!({"reason": "duplicate"}))
            .await
            .unwrap();

        assert_eq!(result, json!({"deleted": "X", "audit": [1, 2]}));
        assert!(authority.request_ids.lock()[0].starts_with("delete_client_X_"));
        assert!(dispatcher.pending().is_empty());
    }

    #[tokio::test]
    async fn test_without_session_no_remote_call() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        let dispatcher = dispatcher_with(Arc::clone(&authority), false);

        let err = dispatcher
            .execute("delete_client", "X", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Unauthorized { .. }));
        assert_eq!(authority.operation_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_submission_rejected() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_delay(Duration::from_millis(50));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        let (first, second) = tokio::join!(
            dispatcher.execute("delete_client", "X", json!({})),
            dispatcher.execute("delete_client", "X", json!({})),
        );

        assert!(first.is_ok());
        let err = second.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OperationInProgress);
        assert!(err.to_string().contains("operación ya en progreso"));
        assert_eq!(authority.operation_calls(), 1);
        assert!(dispatcher.pending().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_targets_run_concurrently() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_delay(Duration::from_millis(50));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        let (a, b) = tokio::join!(
            dispatcher.execute("delete_client", "X", json!({})),
            dispatcher.execute("delete_client", "Y", json!({})),
        );

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(authority.operation_calls(), 2);
    }

    #[tokio::test]
    async fn test_sequential_repeats_are_allowed() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        dispatcher.execute("update_client", "client42", json!({})).await.unwrap();
        dispatcher.execute("update_client", "client42", json!({})).await.unwrap();

        assert_eq!(authority.operation_calls(), 2);
        let ids = authority.request_ids.lock();
        assert_ne!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn test_failure_releases_pending_key() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_operation(Err(denied(RemoteStatus::Other("INTERNAL".into()))));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        let err = dispatcher
            .execute("update_client", "client42", json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Generic);
        assert!(dispatcher.pending().is_empty());
        // Generic failures keep the session
        assert!(dispatcher.cache.token().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_releases_pending_key() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_delay(Duration::from_secs(60));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        let err = dispatcher
            .execute("update_client", "client42", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Timeout { .. }));
        assert!(dispatcher.pending().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_call_releases_pending_key() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_delay(Duration::from_secs(1));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);
        let key = OperationKey::new("update_client", "client42");

        let outcome = tokio::time::timeout(
            Duration::from_millis(100),
            dispatcher.execute("update_client", "client42", json!({})),
        )
        .await;

        assert!(outcome.is_err());
        assert!(!dispatcher.pending().contains(&key));
    }

    #[tokio::test]
    async fn test_permission_denied_clears_session() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_operation(Err(denied(RemoteStatus::PermissionDenied)));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        let err = dispatcher
            .execute("delete_condominium", "c1", json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(dispatcher.cache.token().is_none());
    }

    #[tokio::test]
    async fn test_forbidden_status_clears_session() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_operation(Err(RemoteError::new(
            RemoteStatus::Other("INTERNAL".into()),
            None,
        )
        .with_http_status(403)));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        let err = dispatcher
            .execute("delete_condominium", "c1", json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(dispatcher.cache.token().is_none());
    }

    #[tokio::test]
    async fn test_invalid_session_status_clears_session() {
        let authority = Arc::new(FakeAuthority::granting("abc"));
        authority.set_operation(Err(denied(RemoteStatus::InvalidSession)));
        let dispatcher = dispatcher_with(Arc::clone(&authority), true);

        let err = dispatcher
            .execute("update_client", "client42", json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SessionInvalid);
        assert!(dispatcher.cache.token().is_none());
    }
}
