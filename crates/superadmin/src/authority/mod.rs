//! Collaborators of the session manager
//!
//! The remote authority is the only source of truth for elevated privilege.
//! It is reached through [`RemoteAuthority`]; the public IP lookup used to
//! annotate mint requests goes through [`IpLookup`]. Both have HTTP
//! implementations and are replaced by fakes in tests.

mod http;
mod ip;

pub use http::HttpAuthority;
pub use ip::{HttpIpLookup, IpLookup};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use condo_core::{AccessContext, Error, RemoteError, Result, SessionToken};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful answer to a mint request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    pub session_token: String,
    /// Absolute expiry in epoch milliseconds
    pub expires_at: i64,
}

impl SessionGrant {
    /// Check the grant and convert it into cacheable parts
    pub fn into_session(self, operation: &str) -> Result<(SessionToken, DateTime<Utc>)> {
        if self.session_token.is_empty() {
            return Err(Error::remote(
                operation,
                "INVALID_RESPONSE",
                Some("empty session token".to_string()),
            ));
        }
        let expires_at = millis_to_utc(self.expires_at).ok_or_else(|| {
            Error::remote(
                operation,
                "INVALID_RESPONSE",
                Some(format!("invalid expiry {}", self.expires_at)),
            )
        })?;
        Ok((SessionToken::new(self.session_token), expires_at))
    }
}

/// Answer to a revalidation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionValidation {
    pub valid: bool,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl SessionValidation {
    /// New expiry, present only for a valid session with a usable timestamp
    #[must_use]
    pub fn renewed_expiry(&self) -> Option<DateTime<Utc>> {
        if !self.valid {
            return None;
        }
        self.expires_at.and_then(millis_to_utc)
    }
}

/// One privileged operation as sent to the remote authority
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest<'a> {
    pub session_token: &'a str,
    pub operation: &'a str,
    pub target_id: &'a str,
    pub payload: &'a Value,
    pub request_id: &'a str,
}

/// Remote service that grants, revalidates and exercises elevated sessions
#[async_trait]
pub trait RemoteAuthority: Send + Sync {
    /// Mint a new elevated session for the current identity
    async fn verify_super_admin_access(
        &self,
        context: &AccessContext,
    ) -> std::result::Result<SessionGrant, RemoteError>;

    /// Check an existing session and extend its expiry
    async fn validate_super_admin_session(
        &self,
        token: &SessionToken,
    ) -> std::result::Result<SessionValidation, RemoteError>;

    /// Perform one privileged mutation
    async fn super_admin_operation(
        &self,
        request: &OperationRequest<'_>,
    ) -> std::result::Result<Value, RemoteError>;
}

fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grant_parses_wire_format() {
        let grant: SessionGrant =
            serde_json::from_value(json!({"sessionToken": "abc", "expiresAt": 1_700_000_000_000i64}))
                .unwrap();
        let (token, expires_at) = grant.into_session("verifySuperAdminAccess").unwrap();
        assert_eq!(token, "abc");
        assert_eq!(expires_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_empty_grant_is_rejected() {
        let grant = SessionGrant {
            session_token: String::new(),
            expires_at: 1,
        };
        assert!(grant.into_session("verifySuperAdminAccess").is_err());
    }

    #[test]
    fn test_validation_expiry_only_when_valid() {
        let valid: SessionValidation =
            serde_json::from_value(json!({"valid": true, "expiresAt": 1_700_000_000_000i64}))
                .unwrap();
        assert!(valid.renewed_expiry().is_some());

        let invalid: SessionValidation = serde_json::from_value(json!({"valid": false})).unwrap();
        assert!(invalid.renewed_expiry().is_none());
    }

    #[test]
    fn test_operation_request_wire_names() {
        let payload = json!({"name": "Torre A"});
        let request = OperationRequest {
            session_token: "abc",
            operation: "update_condominium",
            target_id: "c1",
            payload: &payload,
            request_id: "req-1",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["sessionToken"], "abc");
        assert_eq!(value["targetId"], "c1");
        assert_eq!(value["requestId"], "req-1");
        assert_eq!(value["payload"]["name"], "Torre A");
    }
}
