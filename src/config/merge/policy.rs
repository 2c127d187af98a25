//! Built-in defaults every config build starts from.

use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_TOKEN};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("store.base_url", DEFAULT_BASE_URL)?
        .set_default("store.user_token", DEFAULT_USER_TOKEN)?
        .set_default("store.timeout_secs", DEFAULT_TIMEOUT_SECS)
}
