//! Configuration for the pager and its HTTP backend
//!
//! Configuration is loaded from YAML:
//!
//! ```yaml
//! base_url: https://www.strava.com/api/v3
//! paging:
//!   default_page_size: 50
//!   max_page_size: 200
//! http:
//!   timeout_secs: 30
//!   page_param: page
//!   page_size_param: per_page
//! auth:
//!   type: bearer
//!   token: "..."
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_PAGE_PARAM, DEFAULT_PAGE_SIZE_PARAM};
use crate::pagination::{Pager, PagingLimits};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete pager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Base URL for API requests
    pub base_url: String,

    /// Server page size limits
    #[serde(default)]
    pub paging: PagingLimits,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl PagerConfig {
    /// Create a config for a base URL with all other settings at defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            paging: PagingLimits::default(),
            http: HttpConfig::default(),
            auth: AuthConfig::default(),
        }
    }

    /// Check the config for values the pager cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config("base_url cannot be empty"));
        }
        url::Url::parse(&self.base_url)?;

        self.paging.validate()?;

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_config(
                "http.timeout_secs",
                "must be greater than 0",
            ));
        }
        if self.http.page_param.is_empty() {
            return Err(Error::invalid_config("http.page_param", "cannot be empty"));
        }
        if self.http.page_size_param.is_empty() {
            return Err(Error::invalid_config(
                "http.page_size_param",
                "cannot be empty",
            ));
        }

        Ok(())
    }

    /// HTTP client settings derived from this config
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.http.timeout_secs));
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }

    /// A pager planning against the configured limits
    pub fn pager(&self) -> Pager {
        Pager::new(self.paging)
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Query parameter carrying the page number
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Query parameter carrying the page size
    #[serde(default = "default_page_size_param")]
    pub page_size_param: String,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_param() -> String {
    DEFAULT_PAGE_PARAM.to_string()
}

fn default_page_size_param() -> String {
    DEFAULT_PAGE_SIZE_PARAM.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            page_param: default_page_param(),
            page_size_param: default_page_size_param(),
            headers: HashMap::new(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a config file
pub fn load_config(path: impl AsRef<Path>) -> Result<PagerConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load and validate a config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<PagerConfig> {
    let config: PagerConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
