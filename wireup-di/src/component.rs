//! One of the basic blocks of wiring is a [Component]. Components are objects constructed by the
//! [ComponentFactory](crate::factory::ComponentFactory) from their textual type name, instead of
//! being constructed directly in code.
//!
//! ## Constructors
//!
//! A component is constructed either without arguments ([NullaryComponent]) or from a single
//! [data provider](crate::capability::DataProvider) ([ProviderComponent]). Which of the two applies
//! is part of the component's [ComponentDefinition], so the factory can reject a type which cannot
//! be constructed in the requested role before attempting construction.
//!
//! ## Registering components
//!
//! Components describe themselves by implementing [Component]. Such description can be registered
//! manually in a [ComponentDefinitionRegistry](crate::component_registry::ComponentDefinitionRegistry)
//! or submitted for automatic discovery with [register_component](crate::register_component):
//!
//! ```
//! use wireup_di::capability::DataProvider;
//! use wireup_di::component::{Component, NullaryComponent};
//! use wireup_di::component_registry::{CapabilityMetadata, ComponentDefinition};
//! use wireup_di::instance_provider::ErrorPtr;
//! use wireup_di::register_component;
//!
//! struct ConstantProvider;
//!
//! impl DataProvider for ConstantProvider {
//!     fn produce_value(&self) -> f64 {
//!         0.25
//!     }
//! }
//!
//! impl NullaryComponent for ConstantProvider {
//!     fn create() -> Result<Self, ErrorPtr> {
//!         Ok(ConstantProvider)
//!     }
//! }
//!
//! impl Component for ConstantProvider {
//!     fn definition() -> ComponentDefinition {
//!         ComponentDefinition::nullary::<Self>()
//!             .with_name("constant")
//!             .with_capability(CapabilityMetadata::data_provider::<Self>())
//!     }
//! }
//!
//! register_component!(ConstantProvider);
//! # fn main() {}
//! ```

use crate::capability::{Calculator, CalculatorPtr, DataProvider, DataProviderPtr};
use crate::component_registry::ComponentDefinition;
use crate::instance_provider::{ComponentInstanceAnyPtr, ComponentInstancePtr, ErrorPtr};
use std::any::Any;

/// Base trait for wired components, describing how a given type is registered.
pub trait Component: Send + Sync + Sized + 'static {
    /// Returns the definition used to register this component.
    fn definition() -> ComponentDefinition;
}

/// A component constructed without any arguments.
pub trait NullaryComponent: Send + Sync + Sized + 'static {
    fn create() -> Result<Self, ErrorPtr>;
}

/// A component constructed from a single data provider.
pub trait ProviderComponent: Send + Sync + Sized + 'static {
    fn create(provider: ComponentInstancePtr<DataProviderPtr>) -> Result<Self, ErrorPtr>;
}

/// Type-erased zero-argument constructor.
pub type NullaryConstructor = fn() -> Result<ComponentInstanceAnyPtr, ErrorPtr>;

/// Type-erased constructor taking a data provider.
pub type ProviderConstructor =
    fn(provider: ComponentInstancePtr<DataProviderPtr>) -> Result<ComponentInstanceAnyPtr, ErrorPtr>;

pub(crate) fn construct_nullary<T: NullaryComponent>() -> Result<ComponentInstanceAnyPtr, ErrorPtr>
{
    T::create().map(|component| ComponentInstancePtr::new(component) as ComponentInstanceAnyPtr)
}

pub(crate) fn construct_with_provider<T: ProviderComponent>(
    provider: ComponentInstancePtr<DataProviderPtr>,
) -> Result<ComponentInstanceAnyPtr, ErrorPtr> {
    T::create(provider)
        .map(|component| ComponentInstancePtr::new(component) as ComponentInstanceAnyPtr)
}

pub(crate) fn cast_data_provider<T: DataProvider + Send + Sync + 'static>(
    instance: ComponentInstanceAnyPtr,
) -> Result<Box<dyn Any>, ComponentInstanceAnyPtr> {
    instance
        .downcast::<T>()
        .map(|instance| Box::new(instance as ComponentInstancePtr<DataProviderPtr>) as Box<dyn Any>)
}

pub(crate) fn cast_calculator<T: Calculator + Send + Sync + 'static>(
    instance: ComponentInstanceAnyPtr,
) -> Result<Box<dyn Any>, ComponentInstanceAnyPtr> {
    instance
        .downcast::<T>()
        .map(|instance| Box::new(instance as ComponentInstancePtr<CalculatorPtr>) as Box<dyn Any>)
}

/// Submits a [Component] for automatic discovery by
/// [StaticComponentDefinitionRegistry](crate::component_registry::StaticComponentDefinitionRegistry).
#[macro_export]
macro_rules! register_component {
    ($component:ty) => {
        $crate::component_registry::internal::submit! {
            $crate::component_registry::internal::ComponentDefinitionRegisterer {
                register: <$component as $crate::component::Component>::definition,
            }
        }
    };
}
