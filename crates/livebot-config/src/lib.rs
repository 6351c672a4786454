//! Configuration management.

mod settings;

pub use settings::{
    AlpacaSettings, AppConfig, DiscordSettings, EngineSettings, LoggingSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `LIVEBOT` prefix with `__` separators,
/// e.g. `LIVEBOT__ENGINE__SYMBOL=ETH/USD`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("LIVEBOT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
