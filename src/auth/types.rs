//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Bearer token authentication (`Authorization: Bearer <token>`)
    Bearer {
        /// The access token
        token: String,
    },

    /// API key sent in a header
    ApiKey {
        /// Header name
        #[serde(default = "default_api_key_header")]
        header_name: String,
        /// Prefix to add before the value (e.g., "Token ")
        #[serde(default)]
        prefix: Option<String>,
        /// The API key value
        value: String,
    },
}

fn default_api_key_header() -> String {
    "Authorization".to_string()
}

impl AuthConfig {
    /// Create bearer auth
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Create API key auth in the given header
    pub fn api_key(header_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ApiKey {
            header_name: header_name.into(),
            prefix: None,
            value: value.into(),
        }
    }
}
