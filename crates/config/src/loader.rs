//! Configuration loader
//!
//! Resolution order: built-in defaults, then the JSON file (if any), then
//! `CONDO_*` environment variables, then validation.

use crate::config::SessionConfig;
use condo_core::errors::ResultExt;
use condo_core::{
    Result, CONDO_CLIENT_ID_VAR, CONDO_CONFIG_VAR, CONDO_FUNCTIONS_URL_VAR,
    CONDO_IP_LOOKUP_URL_VAR, CONDO_REQUEST_TIMEOUT_VAR,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration loader that handles all startup configuration
pub struct ConfigLoader {
    /// Optional JSON file to read
    file: Option<PathBuf>,
    /// Environment snapshot; `None` reads the process environment
    environment: Option<HashMap<String, String>>,
    /// Explicit base URL, applied last
    functions_base_url: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            file: None,
            environment: None,
            functions_base_url: None,
        }
    }

    /// Read settings from a JSON file
    pub fn file(mut self, path: PathBuf) -> Self {
        self.file = Some(path);
        self
    }

    /// Use the given variables instead of the process environment
    pub fn environment(mut self, env: HashMap<String, String>) -> Self {
        self.environment = Some(env);
        self
    }

    /// Override the functions base URL
    pub fn functions_base_url(mut self, url: impl Into<String>) -> Self {
        self.functions_base_url = Some(url.into());
        self
    }

    /// Load and validate the configuration
    pub fn load(self) -> Result<SessionConfig> {
        let env = self
            .environment
            .unwrap_or_else(|| std::env::vars().collect());

        let file = self
            .file
            .or_else(|| env.get(CONDO_CONFIG_VAR).map(PathBuf::from));

        let mut config = match file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading session configuration");
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read '{}'", path.display()))?;
                serde_json::from_str::<SessionConfig>(&raw)
                    .with_context(|| format!("failed to parse '{}'", path.display()))?
            }
            None => SessionConfig::default(),
        };

        apply_env_overrides(&mut config, &env)?;

        if let Some(url) = self.functions_base_url {
            config.functions_base_url = url;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(config: &mut SessionConfig, env: &HashMap<String, String>) -> Result<()> {
    if let Some(url) = env.get(CONDO_FUNCTIONS_URL_VAR) {
        config.functions_base_url = url.clone();
    }
    if let Some(url) = env.get(CONDO_IP_LOOKUP_URL_VAR) {
        config.ip_lookup_url = url.clone();
    }
    if let Some(client_id) = env.get(CONDO_CLIENT_ID_VAR) {
        config.client_id = client_id.clone();
    }
    if let Some(secs) = env.get(CONDO_REQUEST_TIMEOUT_VAR) {
        let secs = secs
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{CONDO_REQUEST_TIMEOUT_VAR} must be a number of seconds"))?;
        config.request_timeout = Duration::from_secs(secs);
    }
    Ok(())
}
