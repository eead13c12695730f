use crate::constants::UNKNOWN_IP;
use serde::Serialize;

/// Caller metadata sent to the remote authority when minting a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessContext {
    pub ip: String,
    pub user_agent: String,
}

impl AccessContext {
    #[must_use]
    pub fn new(ip: Option<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip: ip
                .filter(|ip| !ip.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_IP.to_string()),
            user_agent: user_agent.into(),
        }
    }

    /// Whether the IP lookup failed and the sentinel was used
    #[must_use]
    pub fn has_unknown_ip(&self) -> bool {
        self.ip == UNKNOWN_IP
    }
}
