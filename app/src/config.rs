//! Layered configuration loading
//!
//! Sources, later ones winning:
//! 1. Built-in defaults for the detected environment (`AppConfig::from_env`)
//! 2. `config/<environment>.toml`, if present
//! 3. `EQ__*` environment variables, e.g. `EQ__BACKEND__USE_MOCK=false`

use config::{Config, ConfigError, Environment as EnvSource, File};

use eq_shared::AppConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "EQ";

/// Separator between nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Load `.env`, then build the configuration from every source
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_from(AppConfig::from_env())
}

/// Layer the file and environment sources over `defaults`
pub fn load_from(defaults: AppConfig) -> Result<AppConfig, ConfigError> {
    let file = defaults.environment.config_file().to_string();

    let config = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(&file).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<AppConfig>()?;

    tracing::debug!(
        environment = ?config.environment,
        language = %config.language,
        use_mock = config.backend.use_mock,
        file = %file,
        "Configuration loaded"
    );
    Ok(config)
}
