//! Failures reported by the remote authority and their classification

use crate::errors::Error;
use std::fmt;

/// Machine-readable status attached to a remote authority failure
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RemoteStatus {
    PermissionDenied,
    Unauthenticated,
    /// The elevated session token was rejected
    InvalidSession,
    /// The service could not be reached or did not answer
    Unavailable,
    Other(String),
}

impl RemoteStatus {
    /// Parse a status code in any of the forms backends emit
    ///
    /// `PERMISSION_DENIED`, `permission-denied` and
    /// `functions/permission-denied` all map to the same variant.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        let code = code.rsplit('/').next().unwrap_or(code).trim();
        let canonical = code.replace('-', "_").to_ascii_uppercase();
        match canonical.as_str() {
            "PERMISSION_DENIED" => RemoteStatus::PermissionDenied,
            "UNAUTHENTICATED" => RemoteStatus::Unauthenticated,
            "INVALID_SESSION" | "SESSION_INVALID" => RemoteStatus::InvalidSession,
            "UNAVAILABLE" => RemoteStatus::Unavailable,
            _ => RemoteStatus::Other(canonical),
        }
    }

    /// Map an HTTP status returned without a structured body
    #[must_use]
    pub fn from_http(status: u16) -> Self {
        match status {
            401 => RemoteStatus::Unauthenticated,
            403 => RemoteStatus::PermissionDenied,
            502..=504 => RemoteStatus::Unavailable,
            other => RemoteStatus::Other(format!("HTTP_{other}")),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            RemoteStatus::PermissionDenied => "PERMISSION_DENIED",
            RemoteStatus::Unauthenticated => "UNAUTHENTICATED",
            RemoteStatus::InvalidSession => "INVALID_SESSION",
            RemoteStatus::Unavailable => "UNAVAILABLE",
            RemoteStatus::Other(code) => code,
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure from a remote authority call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("remote call failed with {status}")]
pub struct RemoteError {
    pub status: RemoteStatus,
    pub message: Option<String>,
    pub http_status: Option<u16>,
}

impl RemoteError {
    #[must_use]
    pub fn new(status: RemoteStatus, message: Option<String>) -> Self {
        Self {
            status,
            message,
            http_status: None,
        }
    }

    #[must_use]
    pub fn with_http_status(mut self, http_status: u16) -> Self {
        self.http_status = Some(http_status);
        self
    }

    /// Failure to reach `endpoint` at all
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(RemoteStatus::Unavailable, Some(message.into()))
    }

    /// Translate into the operator-facing error for `operation`
    ///
    /// A forbidden HTTP status wins over whatever code the body carried.
    #[must_use]
    pub fn classify(self, operation: &str) -> Error {
        let status = match self.http_status {
            Some(403) => RemoteStatus::PermissionDenied,
            Some(401) if !matches!(self.status, RemoteStatus::InvalidSession) => {
                RemoteStatus::Unauthenticated
            }
            _ => self.status,
        };

        match status {
            RemoteStatus::PermissionDenied => Error::permission_denied(operation, self.message),
            RemoteStatus::Unauthenticated => Error::unauthenticated(self.message),
            RemoteStatus::InvalidSession => Error::session_invalid(operation, self.message),
            RemoteStatus::Unavailable => Error::network(
                operation,
                self.message
                    .unwrap_or_else(|| "service unavailable".to_string()),
            ),
            RemoteStatus::Other(code) => Error::remote(operation, code, self.message),
        }
    }
}
