//! Core functionality for creating wired component instances.
//!
//! The [ComponentFactory] resolves the type names of a [ComponentDescriptor] using a
//! [ComponentDefinitionRegistry] and constructs the named components: the data provider first,
//! then the calculator wrapping it. Any failure aborts the whole sequence; an already constructed
//! provider is simply dropped. Instances are never cached, so each call produces independent
//! components.

use crate::capability::{CalculatorPtr, DataProviderPtr};
use crate::component_registry::{
    ComponentConstructor, ComponentDefinition, ComponentDefinitionRegistry,
    StaticComponentDefinitionRegistry,
};
use crate::descriptor::ComponentDescriptor;
use crate::error::{
    ComponentDefinitionRegistryError, ComponentInstanceProviderError, Incompatibility, WiringStage,
};
use crate::instance_provider::{
    cast_instance, CastFunction, ComponentInstanceAnyPtr, ComponentInstancePtr,
};
use itertools::Itertools;
use std::any::{type_name, TypeId};
use tracing::debug;

pub type ComponentDefinitionRegistryPtr = Box<dyn ComponentDefinitionRegistry>;

/// Builder for [ComponentFactory] with sensible defaults, for easy construction.
pub struct ComponentFactoryBuilder {
    definition_registry: ComponentDefinitionRegistryPtr,
}

impl ComponentFactoryBuilder {
    /// Creates a new builder using a registry of all self-registered components.
    pub fn new() -> Result<Self, ComponentDefinitionRegistryError> {
        Ok(Self {
            definition_registry: Box::new(StaticComponentDefinitionRegistry::new(true)?),
        })
    }

    /// Sets new [ComponentDefinitionRegistry].
    pub fn with_definition_registry(
        mut self,
        definition_registry: ComponentDefinitionRegistryPtr,
    ) -> Self {
        self.definition_registry = definition_registry;
        self
    }

    /// Builds resulting [ComponentFactory].
    pub fn build(self) -> ComponentFactory {
        ComponentFactory::new(self.definition_registry)
    }
}

/// Factory for wired components. Uses definitions from the [ComponentDefinitionRegistry] to
/// construct a calculator together with its data provider.
pub struct ComponentFactory {
    definition_registry: ComponentDefinitionRegistryPtr,
}

impl ComponentFactory {
    pub fn new(definition_registry: ComponentDefinitionRegistryPtr) -> Self {
        Self {
            definition_registry,
        }
    }

    /// Constructs the data provider and the calculator named by the descriptor, in that order.
    /// On success, the returned calculator is ready to use.
    pub fn create_calculator(
        &self,
        descriptor: &ComponentDescriptor,
    ) -> Result<ComponentInstancePtr<CalculatorPtr>, ComponentInstanceProviderError> {
        let provider = self.create_provider(&descriptor.provider_type_name)?;
        self.create_calculator_with_provider(&descriptor.calculator_type_name, provider)
    }

    /// Selects components to wire based on their capabilities, rather than names. The calculator
    /// is the only or the primary one registered. The data provider is the one named by the
    /// calculator qualifier, or the only or primary one registered.
    pub fn primary_descriptor(&self) -> Result<ComponentDescriptor, ComponentInstanceProviderError> {
        let calculator = self.primary_definition(
            TypeId::of::<CalculatorPtr>(),
            type_name::<CalculatorPtr>(),
        )?;

        let provider = match &calculator.constructor {
            ComponentConstructor::WithProvider {
                qualifier: Some(qualifier),
                ..
            } => self
                .definition_registry
                .component_by_name(qualifier)
                .ok_or_else(|| ComponentInstanceProviderError::NoNamedInstance(qualifier.clone()))?,
            _ => self.primary_definition(
                TypeId::of::<DataProviderPtr>(),
                type_name::<DataProviderPtr>(),
            )?,
        };

        debug!(
            provider = %provider.type_name,
            calculator = %calculator.type_name,
            "Selected primary components."
        );

        Ok(ComponentDescriptor::new(
            provider.type_name,
            calculator.type_name,
        ))
    }

    fn primary_definition(
        &self,
        capability: TypeId,
        capability_name: &'static str,
    ) -> Result<ComponentDefinition, ComponentInstanceProviderError> {
        let mut definitions = self.definition_registry.components_by_capability(capability);
        if definitions.len() == 1 {
            return Ok(definitions.remove(0));
        }

        definitions
            .into_iter()
            .filter(|definition| definition.is_primary_for(capability))
            .exactly_one()
            .map_err(|_| ComponentInstanceProviderError::NoPrimaryInstance(capability_name))
    }

    fn create_provider(
        &self,
        name: &str,
    ) -> Result<ComponentInstancePtr<DataProviderPtr>, ComponentInstanceProviderError> {
        debug!(name, "Resolving data provider type...");

        let definition = self.resolve(name, WiringStage::ResolveProviderType)?;

        let stage = WiringStage::ConstructProvider;
        let ComponentConstructor::Nullary(constructor) = definition.constructor else {
            return Err(incompatible(
                stage,
                name,
                Incompatibility::MissingNullaryConstructor,
            ));
        };

        let cast = capability_cast::<DataProviderPtr>(&definition, stage, name)?;

        debug!(name, "Constructing data provider...");

        let instance =
            (constructor)().map_err(|error| ComponentInstanceProviderError::ConstructorError {
                stage,
                name: name.to_string(),
                error,
            })?;

        downcast(instance, cast, stage, name)
    }

    fn create_calculator_with_provider(
        &self,
        name: &str,
        provider: ComponentInstancePtr<DataProviderPtr>,
    ) -> Result<ComponentInstancePtr<CalculatorPtr>, ComponentInstanceProviderError> {
        debug!(name, "Resolving calculator type...");

        let definition = self.resolve(name, WiringStage::ResolveCalculatorType)?;

        let stage = WiringStage::ConstructCalculator;
        let ComponentConstructor::WithProvider { constructor, .. } = definition.constructor else {
            return Err(incompatible(
                stage,
                name,
                Incompatibility::MissingProviderConstructor,
            ));
        };

        let cast = capability_cast::<CalculatorPtr>(&definition, stage, name)?;

        debug!(name, "Constructing calculator...");

        let instance = (constructor)(provider).map_err(|error| {
            ComponentInstanceProviderError::ConstructorError {
                stage,
                name: name.to_string(),
                error,
            }
        })?;

        downcast(instance, cast, stage, name)
    }

    fn resolve(
        &self,
        name: &str,
        stage: WiringStage,
    ) -> Result<ComponentDefinition, ComponentInstanceProviderError> {
        self.definition_registry
            .component_by_name(name)
            .ok_or_else(|| ComponentInstanceProviderError::TypeNotFound {
                stage,
                name: name.to_string(),
            })
    }
}

fn incompatible(
    stage: WiringStage,
    name: &str,
    reason: Incompatibility,
) -> ComponentInstanceProviderError {
    ComponentInstanceProviderError::IncompatibleType {
        stage,
        name: name.to_string(),
        reason,
    }
}

fn capability_cast<T: ?Sized + 'static>(
    definition: &ComponentDefinition,
    stage: WiringStage,
    name: &str,
) -> Result<CastFunction, ComponentInstanceProviderError> {
    definition
        .capability(TypeId::of::<T>())
        .map(|metadata| metadata.cast)
        .ok_or_else(|| {
            incompatible(
                stage,
                name,
                Incompatibility::MissingCapability(type_name::<T>()),
            )
        })
}

fn downcast<T: ?Sized + 'static>(
    instance: ComponentInstanceAnyPtr,
    cast: CastFunction,
    stage: WiringStage,
    name: &str,
) -> Result<ComponentInstancePtr<T>, ComponentInstanceProviderError> {
    cast_instance::<T>(instance, cast)
        .ok_or_else(|| incompatible(stage, name, Incompatibility::CastFailed(type_name::<T>())))
}
