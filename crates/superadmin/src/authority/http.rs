//! Callable-function HTTP client for the remote authority
//!
//! Each function is `POST {base}/{name}` with a `{"data": ...}` body. A
//! success answers `{"result": ...}`; a failure answers a non-2xx status with
//! `{"error": {"status": "PERMISSION_DENIED", "message": "..."}}`.

use super::{OperationRequest, RemoteAuthority, SessionGrant, SessionValidation};
use async_trait::async_trait;
use condo_config::SessionConfig;
use condo_core::{
    AccessContext, Error, RemoteError, RemoteStatus, Result, SessionToken,
    OPERATION_FUNCTION, VALIDATE_SESSION_FUNCTION, VERIFY_ACCESS_FUNCTION,
};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct CallableRequest<'a, T: Serialize> {
    data: &'a T,
}

#[derive(Deserialize)]
struct CallableResult<T> {
    result: T,
}

#[derive(Deserialize)]
struct CallableError {
    error: CallableErrorBody,
}

#[derive(Deserialize)]
struct CallableErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest<'a> {
    session_token: &'a str,
}

/// Remote authority reached over HTTPS
pub struct HttpAuthority {
    config: SessionConfig,
    client: reqwest::Client,
    /// Bearer token of the operator's underlying identity session
    identity_token: RwLock<Option<String>>,
}

impl HttpAuthority {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.client_id.as_str())
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            identity_token: RwLock::new(None),
        })
    }

    /// Set or drop the identity token attached to every call
    pub fn set_identity_token(&self, token: Option<String>) {
        *self.identity_token.write() = token;
    }

    async fn call<Req, Resp>(
        &self,
        function: &str,
        data: &Req,
    ) -> std::result::Result<Resp, RemoteError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + Send,
    {
        let url = self.config.function_url(function);
        let identity = self.identity_token.read().clone();

        let mut request = self.client.post(&url).json(&CallableRequest { data });
        if let Some(identity) = identity {
            request = request.bearer_auth(identity);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(function = %function, error = %e, "remote authority unreachable");
            RemoteError::unavailable(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::unavailable(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_slice::<CallableResult<Resp>>(&body)
                .map(|envelope| envelope.result)
                .map_err(|e| {
                    RemoteError::new(
                        RemoteStatus::Other("INVALID_RESPONSE".to_string()),
                        Some(e.to_string()),
                    )
                    .with_http_status(status.as_u16())
                });
        }

        let error = match serde_json::from_slice::<CallableError>(&body) {
            Ok(CallableError {
                error:
                    CallableErrorBody {
                        status: Some(code),
                        message,
                    },
            }) => RemoteError::new(RemoteStatus::parse(&code), message),
            Ok(CallableError { error }) => {
                RemoteError::new(RemoteStatus::from_http(status.as_u16()), error.message)
            }
            Err(_) => RemoteError::new(RemoteStatus::from_http(status.as_u16()), None),
        };

        tracing::debug!(
            function = %function,
            http_status = %status.as_u16(),
            status = %error.status,
            "remote authority returned an error"
        );
        Err(error.with_http_status(status.as_u16()))
    }
}

#[async_trait]
impl RemoteAuthority for HttpAuthority {
    async fn verify_super_admin_access(
        &self,
        context: &AccessContext,
    ) -> std::result::Result<SessionGrant, RemoteError> {
        self.call(VERIFY_ACCESS_FUNCTION, context).await
    }

    async fn validate_super_admin_session(
        &self,
        token: &SessionToken,
    ) -> std::result::Result<SessionValidation, RemoteError> {
        let request = ValidateRequest {
            session_token: token.expose(),
        };
        self.call(VALIDATE_SESSION_FUNCTION, &request).await
    }

    async fn super_admin_operation(
        &self,
        request: &OperationRequest<'_>,
    ) -> std::result::Result<Value, RemoteError> {
        self.call(OPERATION_FUNCTION, request).await
    }
}
