//! Core application functionality.

use crate::config::ApplicationConfig;
use crate::strategy::{StrategyError, WiringStrategy};
use config::ConfigError;
use derive_more::Constructor;
use std::io;
use std::io::{Stdout, Write};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Error wiring components")]
    StrategyError(#[from] StrategyError),
    #[error("Error writing output")]
    OutputError(#[from] io::Error),
}

/// Main entrypoint for the application. Runs a [WiringStrategy] and reports the computed value.
#[derive(Constructor)]
pub struct Application<W: Write> {
    config: ApplicationConfig,
    output: W,
}

impl<W: Write> Application<W> {
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Wires the components with the given strategy, computes a single value and writes the
    /// strategy label followed by the result. Nothing is written if wiring fails.
    pub fn run(&mut self, strategy: &dyn WiringStrategy) -> Result<f64, ApplicationError> {
        let label = strategy.label();
        info!(strategy = label, "Wiring components...");

        let calculator = strategy.wire()?;

        info!(strategy = label, "Running calculation...");

        let result = calculator.compute();

        writeln!(self.output, "{label}")?;
        writeln!(self.output, "Resultat : {result:?}")?;

        Ok(result)
    }
}

/// Creates an application writing to stdout, configured from the environment. Installs a tracing
/// logger writing to stderr, unless disabled in the config.
pub fn create_default() -> Result<Application<Stdout>, ConfigError> {
    let config = ApplicationConfig::init_from_environment()?;

    if config.install_tracing_logger {
        install_tracing_logger();
    }

    debug!(?config, "Loaded application config.");

    Ok(Application::new(config, io::stdout()))
}

fn install_tracing_logger() {
    // a global subscriber might already be set, e.g. by an embedding application
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}
