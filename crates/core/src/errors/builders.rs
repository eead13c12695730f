//! Builder methods for creating errors with context

use super::types::Error;
use std::time::Duration;

impl Error {
    /// Create an unauthenticated error
    #[must_use]
    pub fn unauthenticated(message: Option<String>) -> Self {
        Error::Unauthenticated { message }
    }

    /// Create a permission denied error
    #[must_use]
    pub fn permission_denied(operation: impl Into<String>, message: Option<String>) -> Self {
        Error::PermissionDenied {
            operation: operation.into(),
            message,
        }
    }

    /// Create an invalid elevated session error
    #[must_use]
    pub fn session_invalid(operation: impl Into<String>, message: Option<String>) -> Self {
        Error::SessionInvalid {
            operation: operation.into(),
            message,
        }
    }

    /// Create an error for a call made without an elevated session
    #[must_use]
    pub fn unauthorized(operation: impl Into<String>) -> Self {
        Error::Unauthorized {
            operation: operation.into(),
        }
    }

    /// Create a duplicate submission error
    #[must_use]
    pub fn operation_in_progress(operation: impl Into<String>, target_id: Option<String>) -> Self {
        Error::OperationInProgress {
            operation: operation.into(),
            target_id,
        }
    }

    /// Create a generic remote failure
    #[must_use]
    pub fn remote(
        operation: impl Into<String>,
        status: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Error::Remote {
            operation: operation.into(),
            status: status.into(),
            message,
        }
    }

    /// Create a network error
    #[must_use]
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error
    #[must_use]
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
