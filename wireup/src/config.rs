//! Application configuration, available as [ApplicationConfig].
//!
//! By default, the config is created with opinionated default values, which can then be overwritten
//! by a `wireup.json` file in the working directory and then by environment variables prefixed with
//! `WIREUP_`, e.g. `WIREUP_DESCRIPTOR_FILE=other.txt`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_ENV_PREFIX: &str = "WIREUP";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "wireup.json";

/// Default path of the component descriptor used by dynamic wiring.
pub const DESCRIPTOR_FILE: &str = "config.txt";

/// Default path of the context used by declarative wiring.
pub const CONTEXT_FILE: &str = "context.json";

/// Application configuration.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct ApplicationConfig {
    /// Should a default tracing logger be installed in the scope of the application.
    pub install_tracing_logger: bool,
    /// Two-line file naming the provider and calculator types for dynamic wiring.
    pub descriptor_file: PathBuf,
    /// Declarative context file for declarative wiring.
    pub context_file: PathBuf,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
            descriptor_file: DESCRIPTOR_FILE.into(),
            context_file: CONTEXT_FILE.into(),
        }
    }
}

impl From<OptionalApplicationConfig> for ApplicationConfig {
    fn from(value: OptionalApplicationConfig) -> Self {
        let default = Self::default();
        Self {
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
            descriptor_file: value.descriptor_file.unwrap_or(default.descriptor_file),
            context_file: value.context_file.unwrap_or(default.context_file),
        }
    }
}

impl ApplicationConfig {
    /// Reads the configuration from the default config file and the environment.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Self::init_from_file(CONFIG_FILE)
    }

    /// Reads the configuration from given config file, which might not exist, and the
    /// environment.
    pub fn init_from_file(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalApplicationConfig>())
            .map(|config| config.into())
    }
}

#[derive(Deserialize)]
struct OptionalApplicationConfig {
    install_tracing_logger: Option<bool>,
    descriptor_file: Option<PathBuf>,
    context_file: Option<PathBuf>,
}
