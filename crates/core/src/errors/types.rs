//! Core error type definitions

use std::time::Duration;

/// Result type alias for super-admin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for super-admin operations using thiserror
///
/// `Display` renders the operator-facing message. Transport and parsing
/// failures are folded into these variants before they leave the session
/// manager, so screens never see a raw client error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operator's underlying identity session is gone or invalid
    Unauthenticated { message: Option<String> },

    /// Identity is valid but lacks the elevated privilege
    PermissionDenied {
        operation: String,
        message: Option<String>,
    },

    /// The elevated session itself was rejected by the remote authority
    SessionInvalid {
        operation: String,
        message: Option<String>,
    },

    /// No elevated session is held locally
    Unauthorized { operation: String },

    /// An identical privileged call is already in flight
    OperationInProgress {
        operation: String,
        target_id: Option<String>,
    },

    /// Any other status returned by the remote authority
    Remote {
        operation: String,
        status: String,
        message: Option<String>,
    },

    /// Network-related errors
    Network { endpoint: String, message: String },

    /// Operation timeout errors
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Configuration errors
    Configuration { message: String },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification used by screens to pick a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthenticated,
    PermissionDenied,
    SessionInvalid,
    OperationInProgress,
    Generic,
}

impl Error {
    /// Classify this error into the console's notice taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::SessionInvalid { .. } | Error::Unauthorized { .. } => ErrorKind::SessionInvalid,
            Error::OperationInProgress { .. } => ErrorKind::OperationInProgress,
            Error::Remote { .. }
            | Error::Network { .. }
            | Error::Timeout { .. }
            | Error::Configuration { .. }
            | Error::Json { .. } => ErrorKind::Generic,
        }
    }

    /// Whether the cached elevated session must be dropped when this error is seen
    #[must_use]
    pub fn invalidates_session(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Unauthenticated | ErrorKind::PermissionDenied | ErrorKind::SessionInvalid
        )
    }
}
