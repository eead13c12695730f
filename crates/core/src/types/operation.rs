//! Identifiers for privileged operations

use chrono::Utc;
use std::fmt;

/// Deduplication key of a privileged operation
///
/// Two submissions with the same operation name and target are the same
/// logical action, whenever they were issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationKey {
    operation: String,
    target_id: String,
}

impl OperationKey {
    #[must_use]
    pub fn new(operation: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            target_id: target_id.into(),
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operation, self.target_id)
    }
}

/// Per-dispatch request identifier sent to the remote authority for auditing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Build `{operation}_{target}_{epoch_ms}_{nonce}` for one dispatch of `key`
    #[must_use]
    pub fn generate(key: &OperationKey) -> Self {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}_{}_{}_{}",
            key.operation,
            key.target_id,
            Utc::now().timestamp_millis(),
            &nonce[..8]
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
