//! Configuration
//!
//! Layered configuration for the navigator: built-in defaults, the global
//! config file, an optional explicit file, then `DOCNAV__*` environment
//! variables.

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root::{config_home, global_config_path};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_TOKEN: &str = "public";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_token() -> String {
    DEFAULT_USER_TOKEN.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Document store connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Token sent as the `user_token` query parameter
    #[serde(default = "default_user_token")]
    pub user_token: String,

    /// Well-known id of the store's root container; None means root is `null`
    #[serde(default)]
    pub root_id: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_token: default_user_token(),
            root_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Validate store configuration.
    pub fn validate(&self) -> Result<(), String> {
        let base_url = self.base_url.trim();
        let rest = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"))
            .ok_or_else(|| format!("Invalid store URL (expected http/https): {}", base_url))?;
        if rest.is_empty() || rest.starts_with('/') || rest.chars().any(char::is_whitespace) {
            return Err(format!("Invalid store URL: {}", base_url));
        }

        if self.user_token.trim().is_empty() {
            return Err("User token cannot be empty".to_string());
        }

        if let Some(root_id) = &self.root_id {
            if root_id.trim().is_empty() {
                return Err("root_id cannot be empty if provided".to_string());
            }
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be positive".to_string());
        }

        Ok(())
    }
}

/// Top-level navigator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocnavConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
