//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::DocnavConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<DocnavConfig, ApiError> {
        let config = MergeService::load(None)?;
        Self::checked(config)
    }

    /// Load configuration with an explicit file layered over the global one.
    pub fn load_from_file(path: &Path) -> Result<DocnavConfig, ApiError> {
        let config = MergeService::load(Some(path))?;
        Self::checked(config)
    }

    /// Create default configuration.
    pub fn default() -> DocnavConfig {
        DocnavConfig::default()
    }

    fn checked(config: DocnavConfig) -> Result<DocnavConfig, ApiError> {
        config.store.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }
}
