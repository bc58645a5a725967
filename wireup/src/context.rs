//! Declarative wiring context. A context file lists named components together with their types,
//! and the calculator refers to its data provider by name:
//!
//! ```json
//! {
//!   "components": [
//!     { "name": "dao", "type": "wireup::dao::RandomDataProvider" },
//!     { "name": "metier", "type": "wireup::service::ScalingCalculator", "provider": "dao" }
//!   ]
//! }
//! ```
//!
//! The file format is detected from the extension, so any format supported by the `config` crate
//! can be used. Loading a context only produces a [ComponentDescriptor]; resolving and constructing
//! the components is left to the [ComponentFactory](wireup_di::factory::ComponentFactory).

use config::{Config, File, FileFormat};
use fxhash::FxHashMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use wireup_di::descriptor::ComponentDescriptor;
use wireup_di::error::DescriptorError;

/// Errors related to reading and validating a wiring context.
#[derive(Error, Clone, Debug)]
pub enum ContextError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error("Context does not declare a component referring to a data provider")]
    MissingCalculator,
    #[error("Context declares multiple components referring to a data provider")]
    AmbiguousCalculator,
    #[error("Component '{component}' references unknown component '{reference}'")]
    UnresolvedReference {
        component: String,
        reference: String,
    },
    #[error("Context declares component name '{0}' more than once")]
    DuplicateName(String),
}

/// A single component entry of a context.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ContextComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Name of the data provider to pass to the constructor.
    #[serde(default)]
    pub provider: Option<String>,
}

/// Declarative wiring context.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct WiringContext {
    pub components: Vec<ContextComponent>,
}

impl WiringContext {
    /// Reads a context file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContextError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading wiring context...");

        let content = fs::read_to_string(path).map_err(|error| {
            DescriptorError::ConfigurationUnreadable {
                location: path.display().to_string(),
                source: Arc::new(error),
            }
        })?;

        Config::builder()
            .add_source(File::from_str(&content, file_format(path)))
            .build()
            .and_then(|config| config.try_deserialize::<WiringContext>())
            .map_err(|error| {
                DescriptorError::ConfigurationInvalid {
                    location: path.display().to_string(),
                    message: error.to_string(),
                }
                .into()
            })
    }

    /// Finds the calculator - the only component with a provider reference - and its provider.
    pub fn descriptor(&self) -> Result<ComponentDescriptor, ContextError> {
        let mut components = FxHashMap::default();
        for component in &self.components {
            if components
                .insert(component.name.as_str(), component)
                .is_some()
            {
                return Err(ContextError::DuplicateName(component.name.clone()));
            }
        }

        let mut calculators = self
            .components
            .iter()
            .filter_map(|component| {
                component
                    .provider
                    .as_ref()
                    .map(|provider| (component, provider))
            });

        let (calculator, provider_name) = calculators
            .next()
            .ok_or(ContextError::MissingCalculator)?;

        if calculators.next().is_some() {
            return Err(ContextError::AmbiguousCalculator);
        }

        let provider = components.get(provider_name.as_str()).ok_or_else(|| {
            ContextError::UnresolvedReference {
                component: calculator.name.clone(),
                reference: provider_name.clone(),
            }
        })?;

        Ok(ComponentDescriptor::new(
            &provider.type_name,
            &calculator.type_name,
        ))
    }
}

fn file_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("toml") => FileFormat::Toml,
        Some("yaml" | "yml") => FileFormat::Yaml,
        Some("ini") => FileFormat::Ini,
        Some("ron") => FileFormat::Ron,
        Some("json5") => FileFormat::Json5,
        _ => FileFormat::Json,
    }
}
