use config::{Config, ConfigError, Environment, File};
use enroll_application::DispatchFailurePolicy;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    CONFIG_FILE, DEFAULT_APP_ADDRESS, DEFAULT_MAX_CONNECTIONS,
    env::{ENV_PREFIX, ENV_SEPARATOR},
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Service configuration.
///
/// Sources, later ones winning: built-in defaults, an optional
/// `config/base.*` file, then `ENROLL__*` environment variables (for example
/// `ENROLL__POSTGRES__URL`). A `.env` file is read first if present.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    /// Without it the service keeps users in memory.
    pub postgres: Option<PostgresSettings>,
    #[serde(default)]
    pub registration: RegistrationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationSettings {
    #[serde(default)]
    pub dispatch_failure_policy: DispatchFailurePolicy,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_environment(environment())
    }

    fn from_environment(environment: Environment) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .set_default("server.address", DEFAULT_APP_ADDRESS)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
