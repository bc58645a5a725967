use crate::instance_provider::ErrorPtr;
use std::fmt::{Display, Formatter};
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Stage of the wiring sequence in which an error occurred.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum WiringStage {
    ResolveProviderType,
    ConstructProvider,
    ResolveCalculatorType,
    ConstructCalculator,
}

impl Display for WiringStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WiringStage::ResolveProviderType => "resolve-provider-type",
            WiringStage::ConstructProvider => "construct-provider",
            WiringStage::ResolveCalculatorType => "resolve-calculator-type",
            WiringStage::ConstructCalculator => "construct-calculator",
        })
    }
}

/// Reason why a registered component cannot be used in the requested role.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Incompatibility {
    #[error("no zero-argument constructor")]
    MissingNullaryConstructor,
    #[error("no constructor accepting a data provider")]
    MissingProviderConstructor,
    #[error("capability {0} is not implemented")]
    MissingCapability(&'static str),
    #[error("constructed instance cannot be cast to {0}")]
    CastFailed(&'static str),
}

/// Errors related to reading component descriptors.
#[derive(Error, Clone, Debug)]
pub enum DescriptorError {
    #[error("Configuration must name a provider and a calculator type, but {found} line(s) were found")]
    ConfigurationMissing { found: usize },
    #[error("Cannot read configuration from {location}")]
    ConfigurationUnreadable {
        location: String,
        source: Arc<io::Error>,
    },
    #[error("Cannot parse configuration from {location}: {message}")]
    ConfigurationInvalid { location: String, message: String },
}

/// Errors related to creating component instances.
#[derive(Error, Clone, Debug)]
pub enum ComponentInstanceProviderError {
    #[error("{stage}: no component registered for type name '{name}'")]
    TypeNotFound { stage: WiringStage, name: String },
    #[error("{stage}: component '{name}' is incompatible: {reason}")]
    IncompatibleType {
        stage: WiringStage,
        name: String,
        reason: Incompatibility,
    },
    #[error("{stage}: error constructing component '{name}': {error}")]
    ConstructorError {
        stage: WiringStage,
        name: String,
        error: ErrorPtr,
    },
    #[error("Cannot find a primary instance for capability {0} - either none or multiple exists without a primary marker.")]
    NoPrimaryInstance(&'static str),
    #[error("Cannot find named component: {0}")]
    NoNamedInstance(String),
}

/// Error related to component registries.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ComponentDefinitionRegistryError {
    #[error("Attempted to register a duplicated component with name: {0}")]
    DuplicateComponentName(String),
    #[error("Attempted to re-register a concrete component type: {0}")]
    DuplicateComponentType(String),
    #[error("Registering a duplicate primary component {target_type} for capability: {capability}")]
    DuplicatePrimaryComponent {
        capability: String,
        target_type: String,
    },
}

/// Any error which can abort wiring. None of them are recoverable.
#[derive(Error, Clone, Debug)]
pub enum WiringError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    Instance(#[from] ComponentInstanceProviderError),
    #[error(transparent)]
    Registry(#[from] ComponentDefinitionRegistryError),
}
