//! Best-effort public IP lookup

use async_trait::async_trait;
use condo_config::SessionConfig;
use condo_core::{Error, Result};
use serde::Deserialize;

/// Source of the caller's public IP address
#[async_trait]
pub trait IpLookup: Send + Sync {
    async fn public_ip(&self) -> Result<String>;
}

#[derive(Deserialize)]
struct IpResponse {
    ip: String,
}

/// IP echo service reached with a plain GET returning `{"ip": "..."}`
pub struct HttpIpLookup {
    url: String,
    client: reqwest::Client,
}

impl HttpIpLookup {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.ip_lookup_timeout)
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            url: config.ip_lookup_url.clone(),
            client,
        })
    }
}

#[async_trait]
impl IpLookup for HttpIpLookup {
    async fn public_ip(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(&self.url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::network(
                &self.url,
                format!("unexpected status {}", response.status()),
            ));
        }

        let body: IpResponse = response
            .json()
            .await
            .map_err(|e| Error::network(&self.url, e.to_string()))?;
        Ok(body.ip)
    }
}
