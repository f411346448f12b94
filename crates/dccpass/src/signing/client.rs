//! Remote manifest signing client.
//!
//! Posts the manifest to `<base_url>/api/sign` and takes the response body
//! as the detached signature. Only HTTP 200 counts as success.

use super::ManifestSigner;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Path of the signing endpoint, relative to the base URL.
pub const SIGN_PATH: &str = "/api/sign";

/// Configuration for connecting to the signing service.
#[derive(Debug, Clone)]
pub struct RemoteSignerConfig {
    /// Base URL of the signing service (e.g., `https://pass.example.com`).
    pub base_url: String,
    /// Request timeout. `None` leaves the call unbounded.
    pub timeout: Option<Duration>,
}

impl RemoteSignerConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn sign_url(&self) -> String {
        format!("{}{}", self.base_url, SIGN_PATH)
    }
}

/// HTTP client for the remote signing service.
pub struct RemoteSigner {
    config: RemoteSignerConfig,
    client: reqwest::Client,
}

impl RemoteSigner {
    /// Create a new remote signer client.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(config: RemoteSignerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("dccpass/0.1");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteSignerConfig {
        &self.config
    }
}

#[async_trait]
impl ManifestSigner for RemoteSigner {
    async fn sign(&self, manifest: &[u8]) -> Result<Vec<u8>> {
        let url = self.config.sign_url();
        log::info!("requesting manifest signature from {url}");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/octet-stream")
            .header("Content-Type", "application/json")
            .body(manifest.to_vec())
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to reach signing service: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            log::error!("signing service answered HTTP {status}");
            return Err(Error::Signing(format!("HTTP {status} from {url}")));
        }

        let signature = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Read signature failed: {e}")))?;
        log::debug!("received {} signature bytes", signature.len());
        Ok(signature.to_vec())
    }
}
