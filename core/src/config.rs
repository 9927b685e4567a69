//! Client configuration.
//!
//! Values come from `Default`, from any serde source the host already has, or
//! from `RESOURCE_API_*` environment variables via `ClientConfig::from_env`.

use serde::{Deserialize, Serialize};

pub const ENV_BASE_URL: &str = "RESOURCE_API_BASE_URL";
pub const ENV_TOKEN: &str = "RESOURCE_API_TOKEN";
pub const ENV_USER_AGENT: &str = "RESOURCE_API_USER_AGENT";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Connection settings shared by every entity client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host, and optional prefix, e.g. `https://api.example.com/api/v1`.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            user_agent: concat!("resource-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Read overrides from the process environment; unset or empty variables
    /// keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(token) = get(ENV_TOKEN) {
            config.token = Some(token);
        }
        if let Some(user_agent) = get(ENV_USER_AGENT) {
            config.user_agent = user_agent;
        }
        config
    }
}
