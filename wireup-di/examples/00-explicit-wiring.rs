use std::io::Cursor;
use wireup_di::capability::{Calculator, DataProvider, DataProviderPtr};
use wireup_di::component::{NullaryComponent, ProviderComponent};
use wireup_di::component_registry::{
    CapabilityMetadata, ComponentDefinition, StaticComponentDefinitionRegistry,
};
use wireup_di::descriptor::ComponentDescriptor;
use wireup_di::factory::ComponentFactory;
use wireup_di::instance_provider::{ComponentInstancePtr, ErrorPtr};

// a data provider, which can be constructed without any arguments
struct FixedProvider;

impl DataProvider for FixedProvider {
    fn produce_value(&self) -> f64 {
        0.42
    }
}

impl NullaryComponent for FixedProvider {
    fn create() -> Result<Self, ErrorPtr> {
        Ok(FixedProvider)
    }
}

// a calculator, which needs a data provider to be constructed
struct Percentage {
    provider: ComponentInstancePtr<DataProviderPtr>,
}

impl Calculator for Percentage {
    fn compute(&self) -> f64 {
        self.provider.produce_value() * 100.0
    }
}

impl ProviderComponent for Percentage {
    fn create(provider: ComponentInstancePtr<DataProviderPtr>) -> Result<Self, ErrorPtr> {
        Ok(Percentage { provider })
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // an explicit registration table - only the components listed here can be wired by name
    let registry = StaticComponentDefinitionRegistry::with_definitions(
        [
            ComponentDefinition::nullary::<FixedProvider>()
                .with_name("fixed")
                .with_capability(CapabilityMetadata::data_provider::<FixedProvider>()),
            ComponentDefinition::with_provider::<Percentage>()
                .with_name("percentage")
                .with_capability(CapabilityMetadata::calculator::<Percentage>()),
        ],
        false,
    )
    .expect("error creating registry");

    // the descriptor usually comes from a file, but any reader will do
    let descriptor = ComponentDescriptor::from_reader(Cursor::new("fixed\npercentage\n"))
        .expect("error reading descriptor");

    let calculator = ComponentFactory::new(Box::new(registry))
        .create_calculator(&descriptor)
        .expect("error wiring components");

    // prints "42"
    println!("{}", calculator.compute());
}
