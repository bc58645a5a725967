//! Name-driven component wiring.
//!
//! Two collaborating components are wired together: a [data provider](capability::DataProvider)
//! producing numbers and a [calculator](capability::Calculator) deriving a number from a held
//! provider. Instead of runtime reflection, components are described by
//! [definitions](component_registry::ComponentDefinition) kept in a
//! [registry](component_registry::ComponentDefinitionRegistry), which maps textual type names to
//! constructors and capability casts. A [ComponentDescriptor](descriptor::ComponentDescriptor)
//! names the two types to wire, and the [ComponentFactory](factory::ComponentFactory) resolves and
//! constructs them, provider first.
//!
//! Registries can be filled explicitly or from components self-registered with
//! [register_component].

pub mod capability;
pub mod component;
pub mod component_registry;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod instance_provider;
