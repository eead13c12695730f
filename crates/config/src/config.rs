//! Session manager settings
//!
//! `SessionConfig` is immutable after loading and cheap to clone, so each
//! component keeps its own copy.

use condo_core::{
    Error, Result, DEFAULT_CLIENT_ID, DEFAULT_FUNCTIONS_BASE_URL, DEFAULT_IP_LOOKUP_URL,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default bound for every remote authority call
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound for the best-effort public IP lookup
const DEFAULT_IP_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Default period between revalidation timer ticks (5 minutes)
const DEFAULT_REVALIDATION_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Default distance from expiry at which a tick revalidates (10 minutes)
const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(10 * 60);

/// Settings for talking to the remote authority and keeping a session alive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Base URL under which the callable functions are exposed
    pub functions_base_url: String,

    /// Public IP echo service queried before minting
    pub ip_lookup_url: String,

    /// Client identification string sent with mint requests
    pub client_id: String,

    /// Bound applied to every remote authority call
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,

    /// Bound applied to the public IP lookup
    #[serde(with = "duration_secs")]
    pub ip_lookup_timeout: Duration,

    /// Period of the background revalidation timer
    #[serde(with = "duration_secs")]
    pub revalidation_interval: Duration,

    /// A tick revalidates once the session expires within this window
    #[serde(with = "duration_secs")]
    pub freshness_window: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            functions_base_url: DEFAULT_FUNCTIONS_BASE_URL.to_string(),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            ip_lookup_timeout: DEFAULT_IP_LOOKUP_TIMEOUT,
            revalidation_interval: DEFAULT_REVALIDATION_INTERVAL,
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
        }
    }
}

impl SessionConfig {
    /// Check the settings for values the session manager cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.functions_base_url.trim().is_empty() {
            return Err(Error::configuration("functions_base_url must not be empty"));
        }
        if !self.functions_base_url.starts_with("http://")
            && !self.functions_base_url.starts_with("https://")
        {
            return Err(Error::configuration(format!(
                "functions_base_url must be an http(s) URL, got '{}'",
                self.functions_base_url
            )));
        }
        if self.client_id.trim().is_empty() {
            return Err(Error::configuration("client_id must not be empty"));
        }
        for (name, value) in [
            ("request_timeout", self.request_timeout),
            ("ip_lookup_timeout", self.ip_lookup_timeout),
            ("revalidation_interval", self.revalidation_interval),
        ] {
            if value.is_zero() {
                return Err(Error::configuration(format!("{name} must be greater than zero")));
            }
        }
        // A window shorter than the tick period could let the session lapse between ticks
        if self.freshness_window < self.revalidation_interval {
            return Err(Error::configuration(format!(
                "freshness_window ({:?}) must not be shorter than revalidation_interval ({:?})",
                self.freshness_window, self.revalidation_interval
            )));
        }
        Ok(())
    }

    /// URL of a callable function on the remote authority
    #[must_use]
    pub fn function_url(&self, function: &str) -> String {
        format!("{}/{}", self.functions_base_url.trim_end_matches('/'), function)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
