use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Connection settings for the detail-query API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// API root, without trailing slash (e.g., "https://stats.example.com/api").
    pub base_url: String,

    /// Request timeout handed to the HTTP client (native targets only).
    pub timeout_secs: u64,

    /// Value sent in the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
            user_agent: concat!("courtside-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: ClientSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Configuration("base_url must not be empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CoreError::Configuration(format!(
                "base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::Configuration("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Base URL with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
