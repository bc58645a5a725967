//! Functionality related to registering definitions of components. The
//! [ComponentFactory](crate::factory::ComponentFactory) creates component instances based on
//! those definitions, which can be registered automatically or manually.
//!
//! A registry is the replacement for runtime type lookup: it maps textual type names to
//! constructors and capability casts, so a component can be constructed from a name read at
//! runtime.

use crate::capability::{Calculator, CalculatorPtr, DataProvider, DataProviderPtr};
use crate::component::{
    cast_calculator, cast_data_provider, construct_nullary, construct_with_provider,
    NullaryComponent, NullaryConstructor, ProviderComponent, ProviderConstructor,
};
use crate::component_registry::internal::ComponentDefinitionRegisterer;
use crate::component_registry::registry::NamedComponentDefinitionMap;
use crate::error::ComponentDefinitionRegistryError;
use crate::instance_provider::CastFunction;
use derivative::Derivative;
#[cfg(test)]
use mockall::automock;
use std::any::{type_name, TypeId};
use tracing::debug;

/// Describes how a component is constructed.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum ComponentConstructor {
    /// Zero-argument constructor.
    Nullary(#[derivative(Debug = "ignore")] NullaryConstructor),
    /// Constructor taking a single data provider. The qualifier, if present, names the provider
    /// which should be injected when wiring by capability.
    WithProvider {
        qualifier: Option<String>,
        #[derivative(Debug = "ignore")]
        constructor: ProviderConstructor,
    },
}

/// Registration information for a capability satisfied by a component.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct CapabilityMetadata {
    pub capability: TypeId,

    pub capability_name: &'static str,

    /// With multiple components registered for a given capability, one of them can be marked as
    /// primary and selected when wiring by capability.
    pub is_primary: bool,

    /// Cast function producing `ComponentInstancePtr<Capability>`.
    #[derivative(Debug = "ignore")]
    pub cast: CastFunction,
}

impl CapabilityMetadata {
    /// Declares the [DataProvider] capability for `T`.
    pub fn data_provider<T: DataProvider + Send + Sync + 'static>() -> Self {
        Self {
            capability: TypeId::of::<DataProviderPtr>(),
            capability_name: type_name::<DataProviderPtr>(),
            is_primary: false,
            cast: cast_data_provider::<T>,
        }
    }

    /// Declares the [Calculator] capability for `T`.
    pub fn calculator<T: Calculator + Send + Sync + 'static>() -> Self {
        Self {
            capability: TypeId::of::<CalculatorPtr>(),
            capability_name: type_name::<CalculatorPtr>(),
            is_primary: false,
            cast: cast_calculator::<T>,
        }
    }

    /// Marks the component as primary for this capability.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// Definition for a component registered in a definition registry.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct ComponentDefinition {
    /// Each component has at least one name, which can be used to request a specific instance.
    /// The first name is always the type name of the component.
    pub names: Vec<String>,

    /// Type name of the concrete component type.
    pub type_name: String,

    pub constructor: ComponentConstructor,

    /// Capabilities which instances of this component satisfy.
    pub capabilities: Vec<CapabilityMetadata>,
}

impl ComponentDefinition {
    /// Creates a definition for a component constructed without arguments.
    pub fn nullary<T: NullaryComponent>() -> Self {
        Self::new(
            type_name::<T>(),
            ComponentConstructor::Nullary(construct_nullary::<T>),
        )
    }

    /// Creates a definition for a component constructed from a data provider.
    pub fn with_provider<T: ProviderComponent>() -> Self {
        Self::new(
            type_name::<T>(),
            ComponentConstructor::WithProvider {
                qualifier: None,
                constructor: construct_with_provider::<T>,
            },
        )
    }

    /// Creates a definition with an arbitrary type name and constructor.
    pub fn new<T: ToString>(type_name: T, constructor: ComponentConstructor) -> Self {
        let type_name = type_name.to_string();
        Self {
            names: vec![type_name.clone()],
            type_name,
            constructor,
            capabilities: vec![],
        }
    }

    /// Adds an additional name.
    pub fn with_name<T: ToString>(mut self, name: T) -> Self {
        self.names.push(name.to_string());
        self
    }

    /// Adds a satisfied capability.
    pub fn with_capability(mut self, capability: CapabilityMetadata) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Sets the name of the provider to inject when wiring by capability. Has no effect for
    /// nullary components.
    pub fn with_qualifier<T: ToString>(mut self, name: T) -> Self {
        if let ComponentConstructor::WithProvider { qualifier, .. } = &mut self.constructor {
            *qualifier = Some(name.to_string());
        }

        self
    }

    /// Returns capability metadata for the given capability type, if satisfied.
    pub fn capability(&self, capability: TypeId) -> Option<&CapabilityMetadata> {
        self.capabilities
            .iter()
            .find(|metadata| metadata.capability == capability)
    }

    #[inline]
    pub fn is_primary_for(&self, capability: TypeId) -> bool {
        self.capability(capability)
            .map(|metadata| metadata.is_primary)
            .unwrap_or(false)
    }
}

/// A registry of component definitions which can be used when constructing instances via a
/// [ComponentFactory](crate::factory::ComponentFactory).
#[cfg_attr(test, automock)]
pub trait ComponentDefinitionRegistry {
    /// Adds a new definition. Note: handling of duplicate component names is registry-dependent.
    fn register_component(
        &mut self,
        definition: ComponentDefinition,
    ) -> Result<(), ComponentDefinitionRegistryError>;

    /// Returns a definition with given name.
    fn component_by_name(&self, name: &str) -> Option<ComponentDefinition>;

    /// Returns all definitions satisfying given capability, in registration order.
    fn components_by_capability(&self, capability: TypeId) -> Vec<ComponentDefinition>;

    /// Checks if there's a definition with given name.
    fn is_name_registered(&self, name: &str) -> bool;

    /// Returns a copy of all definitions, in registration order.
    fn all_definitions(&self) -> Vec<ComponentDefinition>;
}

/// Registry of component definitions, optionally initialized from statically registered
/// definitions.
#[derive(Clone, Debug)]
pub struct StaticComponentDefinitionRegistry {
    definition_map: NamedComponentDefinitionMap,
    allow_definition_overriding: bool,
}

impl StaticComponentDefinitionRegistry {
    /// Creates a registry containing all components submitted with
    /// [register_component](crate::register_component).
    pub fn new(allow_definition_overriding: bool) -> Result<Self, ComponentDefinitionRegistryError> {
        let mut registry = Self::empty(allow_definition_overriding);

        for registerer in inventory::iter::<ComponentDefinitionRegisterer> {
            registry.register_component((registerer.register)())?;
        }

        debug!(
            count = registry.definition_map.len(),
            "Discovered registered components."
        );

        Ok(registry)
    }

    /// Creates an empty registry, to be filled with explicit registrations.
    pub fn empty(allow_definition_overriding: bool) -> Self {
        Self {
            definition_map: Default::default(),
            allow_definition_overriding,
        }
    }

    /// Creates a registry from an explicit table of definitions.
    pub fn with_definitions<I: IntoIterator<Item = ComponentDefinition>>(
        definitions: I,
        allow_definition_overriding: bool,
    ) -> Result<Self, ComponentDefinitionRegistryError> {
        let mut registry = Self::empty(allow_definition_overriding);
        for definition in definitions {
            registry.register_component(definition)?;
        }

        Ok(registry)
    }
}

impl ComponentDefinitionRegistry for StaticComponentDefinitionRegistry {
    fn register_component(
        &mut self,
        definition: ComponentDefinition,
    ) -> Result<(), ComponentDefinitionRegistryError> {
        debug!(type_name = %definition.type_name, names = ?definition.names, "Registering component.");
        self.definition_map
            .try_register_component(definition, self.allow_definition_overriding)
    }

    #[inline]
    fn component_by_name(&self, name: &str) -> Option<ComponentDefinition> {
        self.definition_map.component_by_name(name)
    }

    #[inline]
    fn components_by_capability(&self, capability: TypeId) -> Vec<ComponentDefinition> {
        self.definition_map.components_by_capability(capability)
    }

    #[inline]
    fn is_name_registered(&self, name: &str) -> bool {
        self.definition_map.is_name_registered(name)
    }

    #[inline]
    fn all_definitions(&self) -> Vec<ComponentDefinition> {
        self.definition_map.all_definitions()
    }
}

mod registry {
    use crate::component_registry::ComponentDefinition;
    use crate::error::ComponentDefinitionRegistryError;
    use fxhash::FxHashMap;
    use std::any::TypeId;

    #[derive(Default, Clone, Debug)]
    pub(super) struct NamedComponentDefinitionMap {
        definitions: Vec<ComponentDefinition>,
        names: FxHashMap<String, usize>,
    }

    impl NamedComponentDefinitionMap {
        pub(super) fn component_by_name(&self, name: &str) -> Option<ComponentDefinition> {
            self.names
                .get(name)
                .and_then(|index| self.definitions.get(*index))
                .cloned()
        }

        pub(super) fn components_by_capability(
            &self,
            capability: TypeId,
        ) -> Vec<ComponentDefinition> {
            self.definitions
                .iter()
                .filter(|definition| definition.capability(capability).is_some())
                .cloned()
                .collect()
        }

        pub(super) fn try_register_component(
            &mut self,
            definition: ComponentDefinition,
            allow_definition_overriding: bool,
        ) -> Result<(), ComponentDefinitionRegistryError> {
            let existing = self
                .definitions
                .iter()
                .position(|entry| entry.type_name == definition.type_name);

            if !allow_definition_overriding {
                if let Some(name) = definition
                    .names
                    .iter()
                    .find(|name| self.names.contains_key(*name))
                {
                    return Err(ComponentDefinitionRegistryError::DuplicateComponentName(
                        name.clone(),
                    ));
                }

                if existing.is_some() {
                    return Err(ComponentDefinitionRegistryError::DuplicateComponentType(
                        definition.type_name,
                    ));
                }
            }

            if let Some(capability) = definition.capabilities.iter().find(|capability| {
                capability.is_primary
                    && self.definitions.iter().any(|entry| {
                        entry.type_name != definition.type_name
                            && entry.is_primary_for(capability.capability)
                    })
            }) {
                return Err(
                    ComponentDefinitionRegistryError::DuplicatePrimaryComponent {
                        capability: capability.capability_name.to_string(),
                        target_type: definition.type_name.clone(),
                    },
                );
            }

            let index = if let Some(index) = existing {
                // names already taken over by other definitions stay with them
                for name in &self.definitions[index].names {
                    if self.names.get(name) == Some(&index) {
                        self.names.remove(name);
                    }
                }

                self.definitions[index] = definition;
                index
            } else {
                self.definitions.push(definition);
                self.definitions.len() - 1
            };

            // overriding can move a name from another definition to this one
            let names = self.definitions[index].names.clone();
            for name in names {
                if let Some(previous) = self.names.insert(name.clone(), index) {
                    if previous != index {
                        self.definitions[previous]
                            .names
                            .retain(|owned| *owned != name);
                    }
                }
            }

            Ok(())
        }

        #[inline]
        pub(super) fn is_name_registered(&self, name: &str) -> bool {
            self.names.contains_key(name)
        }

        #[inline]
        pub(super) fn all_definitions(&self) -> Vec<ComponentDefinition> {
            self.definitions.clone()
        }

        #[inline]
        pub(super) fn len(&self) -> usize {
            self.definitions.len()
        }
    }

    #[cfg(test)]
    mod tests {
        use crate::capability::DataProviderPtr;
        use crate::component_registry::registry::NamedComponentDefinitionMap;
        use crate::component_registry::{
            CapabilityMetadata, ComponentConstructor, ComponentDefinition,
        };
        use crate::error::ComponentDefinitionRegistryError;
        use crate::instance_provider::{ComponentInstanceAnyPtr, ComponentInstancePtr, ErrorPtr};
        use std::any::{Any, TypeId};

        fn constructor() -> Result<ComponentInstanceAnyPtr, ErrorPtr> {
            Ok(ComponentInstancePtr::new(0) as ComponentInstanceAnyPtr)
        }

        fn cast(instance: ComponentInstanceAnyPtr) -> Result<Box<dyn Any>, ComponentInstanceAnyPtr> {
            Err(instance)
        }

        fn capability(is_primary: bool) -> CapabilityMetadata {
            CapabilityMetadata {
                capability: TypeId::of::<DataProviderPtr>(),
                capability_name: "provider",
                is_primary,
                cast,
            }
        }

        fn create_definition(type_name: &str) -> ComponentDefinition {
            ComponentDefinition::new(type_name, ComponentConstructor::Nullary(constructor))
                .with_name("name")
                .with_capability(capability(false))
        }

        #[test]
        fn should_register_definition() {
            let definition = create_definition("a::Type");

            let mut registry = NamedComponentDefinitionMap::default();
            registry
                .try_register_component(definition.clone(), false)
                .unwrap();

            assert_eq!(
                registry
                    .components_by_capability(TypeId::of::<DataProviderPtr>())[0]
                    .names,
                definition.names
            );
            assert_eq!(
                registry.component_by_name("name").unwrap().names,
                definition.names
            );
            assert_eq!(
                registry.component_by_name("a::Type").unwrap().type_name,
                "a::Type"
            );
            assert!(registry.is_name_registered("name"));
            assert!(!registry.is_name_registered("other"));
        }

        #[test]
        fn should_not_register_duplicate_name() {
            let mut registry = NamedComponentDefinitionMap::default();
            registry
                .try_register_component(create_definition("a::Type"), false)
                .unwrap();

            assert_eq!(
                registry
                    .try_register_component(create_definition("b::Type"), false)
                    .unwrap_err(),
                ComponentDefinitionRegistryError::DuplicateComponentName("name".to_string())
            );
        }

        #[test]
        fn should_not_register_duplicate_type() {
            let mut registry = NamedComponentDefinitionMap::default();
            registry
                .try_register_component(
                    ComponentDefinition::new("a::Type", ComponentConstructor::Nullary(constructor)),
                    false,
                )
                .unwrap();

            let mut duplicate =
                ComponentDefinition::new("a::Type", ComponentConstructor::Nullary(constructor));
            duplicate.names = vec!["other".to_string()];

            assert_eq!(
                registry.try_register_component(duplicate, false).unwrap_err(),
                ComponentDefinitionRegistryError::DuplicateComponentType("a::Type".to_string())
            );
        }

        #[test]
        fn should_override_duplicate_type() {
            let mut registry = NamedComponentDefinitionMap::default();
            registry
                .try_register_component(create_definition("a::Type"), true)
                .unwrap();
            registry
                .try_register_component(
                    ComponentDefinition::new("a::Type", ComponentConstructor::Nullary(constructor))
                        .with_name("name2"),
                    true,
                )
                .unwrap();

            assert!(!registry.is_name_registered("name"));
            assert!(registry.is_name_registered("name2"));
            assert_eq!(registry.all_definitions().len(), 1);
        }

        #[test]
        fn should_keep_name_moved_to_other_type_on_override() {
            let mut registry = NamedComponentDefinitionMap::default();
            registry
                .try_register_component(
                    ComponentDefinition::new("a::Type", ComponentConstructor::Nullary(constructor))
                        .with_name("shared"),
                    true,
                )
                .unwrap();
            registry
                .try_register_component(
                    ComponentDefinition::new("b::Type", ComponentConstructor::Nullary(constructor))
                        .with_name("shared"),
                    true,
                )
                .unwrap();

            assert_eq!(
                registry.component_by_name("a::Type").unwrap().names,
                vec!["a::Type".to_string()]
            );

            registry
                .try_register_component(
                    ComponentDefinition::new("a::Type", ComponentConstructor::Nullary(constructor))
                        .with_name("other"),
                    true,
                )
                .unwrap();

            assert_eq!(
                registry.component_by_name("shared").unwrap().type_name,
                "b::Type"
            );
            assert_eq!(
                registry.component_by_name("other").unwrap().type_name,
                "a::Type"
            );
            assert_eq!(
                registry.component_by_name("b::Type").unwrap().names,
                vec!["b::Type".to_string(), "shared".to_string()]
            );
            assert_eq!(registry.all_definitions().len(), 2);
        }

        #[test]
        fn should_reject_duplicate_primary() {
            let mut registry = NamedComponentDefinitionMap::default();
            registry
                .try_register_component(
                    ComponentDefinition::new("a::Type", ComponentConstructor::Nullary(constructor))
                        .with_capability(capability(true)),
                    false,
                )
                .unwrap();

            assert!(matches!(
                registry
                    .try_register_component(
                        ComponentDefinition::new(
                            "b::Type",
                            ComponentConstructor::Nullary(constructor)
                        )
                        .with_capability(capability(true)),
                        false,
                    )
                    .unwrap_err(),
                ComponentDefinitionRegistryError::DuplicatePrimaryComponent { .. }
            ));
        }
    }
}

#[doc(hidden)]
pub mod internal {
    use crate::component_registry::ComponentDefinition;
    use inventory::collect;
    pub use inventory::submit;

    pub struct ComponentDefinitionRegisterer {
        pub register: fn() -> ComponentDefinition,
    }

    collect!(ComponentDefinitionRegisterer);
}
