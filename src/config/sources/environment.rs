//! Environment variable source: DOCNAV_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses DOCNAV prefix and __ as separator, e.g. `DOCNAV__STORE__BASE_URL`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("DOCNAV")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
