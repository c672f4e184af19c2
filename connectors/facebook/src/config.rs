//! Facebook client configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FacebookError, FacebookResult};

/// Configuration for the Facebook client.
#[derive(Clone, Serialize, Deserialize)]
pub struct FacebookConfig {
    /// Graph API access token, sent on every request
    pub access_token: String,

    /// Base URL for the Graph API (default: https://graph.facebook.com)
    #[serde(default = "default_graph_api_url")]
    pub graph_api_url: String,

    /// Base URL for the legacy REST API (default: https://api.facebook.com/method)
    #[serde(default = "default_legacy_api_url")]
    pub legacy_api_url: String,

    /// Request timeout, applied by the bundled HTTP transport
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// User-Agent override for the bundled HTTP transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_graph_api_url() -> String {
    "https://graph.facebook.com".into()
}

fn default_legacy_api_url() -> String {
    "https://api.facebook.com/method".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl FacebookConfig {
    /// Create a configuration with default endpoints for the given token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Check that the configuration can drive a client.
    pub fn validate(&self) -> FacebookResult<()> {
        if self.access_token.trim().is_empty() {
            return Err(FacebookError::invalid(
                "The 'access_token' configuration value cannot be blank.",
            ));
        }
        for (name, url) in [
            ("graph_api_url", &self.graph_api_url),
            ("legacy_api_url", &self.legacy_api_url),
        ] {
            if url.trim().is_empty() {
                return Err(FacebookError::invalid(format!(
                    "The '{name}' configuration value cannot be blank."
                )));
            }
        }
        Ok(())
    }

    /// User-Agent header value for outgoing requests.
    #[must_use]
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("fcp-facebook/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for FacebookConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            graph_api_url: default_graph_api_url(),
            legacy_api_url: default_legacy_api_url(),
            timeout: default_timeout(),
            user_agent: None,
        }
    }
}

impl fmt::Debug for FacebookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacebookConfig")
            .field("access_token", &"<redacted>")
            .field("graph_api_url", &self.graph_api_url)
            .field("legacy_api_url", &self.legacy_api_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
