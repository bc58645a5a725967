use wireup_di::capability::{Calculator, DataProvider, DataProviderPtr};
use wireup_di::component::{Component, NullaryComponent, ProviderComponent};
use wireup_di::component_registry::{CapabilityMetadata, ComponentDefinition};
use wireup_di::factory::ComponentFactoryBuilder;
use wireup_di::instance_provider::{ComponentInstancePtr, ErrorPtr};
use wireup_di::register_component;

struct FixedProvider;

impl DataProvider for FixedProvider {
    fn produce_value(&self) -> f64 {
        0.5
    }
}

impl NullaryComponent for FixedProvider {
    fn create() -> Result<Self, ErrorPtr> {
        Ok(FixedProvider)
    }
}

impl Component for FixedProvider {
    fn definition() -> ComponentDefinition {
        ComponentDefinition::nullary::<Self>()
            .with_name("fixed")
            .with_capability(CapabilityMetadata::data_provider::<Self>())
    }
}

// registered components are discovered automatically when building a factory
register_component!(FixedProvider);

struct Doubler {
    provider: ComponentInstancePtr<DataProviderPtr>,
}

impl Calculator for Doubler {
    fn compute(&self) -> f64 {
        self.provider.produce_value() * 2.0
    }
}

impl ProviderComponent for Doubler {
    fn create(provider: ComponentInstancePtr<DataProviderPtr>) -> Result<Self, ErrorPtr> {
        Ok(Doubler { provider })
    }
}

impl Component for Doubler {
    fn definition() -> ComponentDefinition {
        ComponentDefinition::with_provider::<Self>()
            // explicitly select the provider by name, instead of relying on the primary one
            .with_qualifier("fixed")
            .with_capability(CapabilityMetadata::calculator::<Self>())
    }
}

register_component!(Doubler);

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    let factory = ComponentFactoryBuilder::new()
        .expect("error initializing ComponentFactoryBuilder")
        .build();

    // with a single calculator registered, there's no need for a descriptor file
    let descriptor = factory
        .primary_descriptor()
        .expect("error selecting components");

    let calculator = factory
        .create_calculator(&descriptor)
        .expect("error wiring components");

    // prints "1"
    println!("{}", calculator.compute());
}
