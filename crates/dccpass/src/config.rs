//! Configuration file support.
//!
//! Pass and team identifiers come from the pass type certificate registered
//! with Apple; the signing service URL points at the server holding that
//! certificate. All of it is read from a TOML file:
//!
//! ```toml
//! pass_type_identifier = "pass.com.example.covid"
//! team_identifier = "ABCDE12345"
//! signer_url = "https://pass.example.com"
//! value_set_url = "https://pass.example.com/valuesets"
//! signer_timeout_seconds = 30
//! ```

use crate::pass::PassIdentifiers;
use crate::signing::RemoteSignerConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Settings for one pass-issuing deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassConfig {
    pub pass_type_identifier: String,
    pub team_identifier: String,
    /// Base URL of the signing service; `/api/sign` is appended.
    pub signer_url: String,
    /// Base URL serving `<category>.json` value sets.
    #[serde(default)]
    pub value_set_url: Option<String>,
    /// Timeout for each network request. Unset means no timeout.
    #[serde(default)]
    pub signer_timeout_seconds: Option<u64>,
}

impl PassConfig {
    /// Load and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PassConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check identifiers are present and URLs are http(s).
    pub fn validate(&self) -> Result<()> {
        if self.pass_type_identifier.trim().is_empty() {
            return Err(Error::Config("pass_type_identifier must not be empty".into()));
        }
        if self.team_identifier.trim().is_empty() {
            return Err(Error::Config("team_identifier must not be empty".into()));
        }
        check_url("signer_url", &self.signer_url)?;
        if let Some(url) = &self.value_set_url {
            check_url("value_set_url", url)?;
        }
        if self.signer_timeout_seconds == Some(0) {
            return Err(Error::Config("signer_timeout_seconds must be positive".into()));
        }
        Ok(())
    }

    pub fn identifiers(&self) -> PassIdentifiers {
        PassIdentifiers::new(&self.pass_type_identifier, &self.team_identifier)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.signer_timeout_seconds.map(Duration::from_secs)
    }

    pub fn signer_config(&self) -> RemoteSignerConfig {
        let config = RemoteSignerConfig::new(&self.signer_url);
        match self.timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

fn check_url(name: &str, url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(Error::Config(format!("{name} must be an http(s) URL, got {url:?}")))
    }
}
