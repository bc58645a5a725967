//! Strategies wiring a calculator to its data provider. Each strategy ends up with a ready to use
//! calculator, but they differ in how the components are chosen and constructed:
//!
//! * [StaticWiring] - direct construction in code
//! * [DynamicWiring] - type names read from a descriptor file and resolved in an explicit
//! registration table
//! * [DiscoveryWiring] - self-registered components selected by capability
//! * [DeclarativeWiring] - named components and references read from a context file
//!
//! All but the static strategy produce a [ComponentDescriptor] and hand it to the same
//! [ComponentFactory].

use crate::context::{ContextError, WiringContext};
use crate::dao::RandomDataProvider;
use crate::service::ScalingCalculator;
use derive_more::Constructor;
#[cfg(test)]
use mockall::automock;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use wireup_di::capability::{CalculatorPtr, DataProviderPtr};
use wireup_di::component::Component;
use wireup_di::component_registry::{ComponentDefinition, StaticComponentDefinitionRegistry};
use wireup_di::descriptor::ComponentDescriptor;
use wireup_di::error::WiringError;
use wireup_di::factory::{ComponentFactory, ComponentFactoryBuilder};
use wireup_di::instance_provider::ComponentInstancePtr;

/// Explicit registration table of all components known to the application.
pub fn registration_table() -> Vec<ComponentDefinition> {
    vec![
        RandomDataProvider::definition(),
        ScalingCalculator::definition(),
    ]
}

/// Creates a factory using the explicit [registration_table].
pub fn table_factory() -> Result<ComponentFactory, WiringError> {
    let registry = StaticComponentDefinitionRegistry::with_definitions(registration_table(), false)?;
    Ok(ComponentFactory::new(Box::new(registry)))
}

fn wire_from_table(
    descriptor: &ComponentDescriptor,
) -> Result<ComponentInstancePtr<CalculatorPtr>, WiringError> {
    Ok(table_factory()?.create_calculator(descriptor)?)
}

/// Errors which can abort a [WiringStrategy].
#[derive(Error, Clone, Debug)]
pub enum StrategyError {
    #[error(transparent)]
    Wiring(#[from] WiringError),
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// A way of wiring a calculator to its data provider.
#[cfg_attr(test, automock)]
pub trait WiringStrategy {
    /// Label identifying the strategy in the application output.
    fn label(&self) -> &'static str;

    /// Creates a calculator wired to its data provider.
    fn wire(&self) -> Result<ComponentInstancePtr<CalculatorPtr>, StrategyError>;
}

/// Constructs the reference components directly.
#[derive(Default, Copy, Clone, Debug)]
pub struct StaticWiring;

impl WiringStrategy for StaticWiring {
    fn label(&self) -> &'static str {
        "Instanciation statique"
    }

    fn wire(&self) -> Result<ComponentInstancePtr<CalculatorPtr>, StrategyError> {
        let provider: ComponentInstancePtr<DataProviderPtr> =
            ComponentInstancePtr::new(RandomDataProvider);
        let calculator: ComponentInstancePtr<CalculatorPtr> =
            ComponentInstancePtr::new(ScalingCalculator::new(provider));

        Ok(calculator)
    }
}

/// Reads provider and calculator type names from a descriptor file and constructs them using the
/// explicit registration table.
#[derive(Constructor, Clone, Debug)]
pub struct DynamicWiring {
    descriptor_file: PathBuf,
}

impl WiringStrategy for DynamicWiring {
    fn label(&self) -> &'static str {
        "Instanciation dynamique"
    }

    fn wire(&self) -> Result<ComponentInstancePtr<CalculatorPtr>, StrategyError> {
        let descriptor =
            ComponentDescriptor::load(&self.descriptor_file).map_err(WiringError::from)?;
        info!(
            provider = %descriptor.provider_type_name,
            calculator = %descriptor.calculator_type_name,
            "Wiring components from descriptor..."
        );

        Ok(wire_from_table(&descriptor)?)
    }
}

/// Selects self-registered components by their capabilities.
#[derive(Default, Copy, Clone, Debug)]
pub struct DiscoveryWiring;

impl WiringStrategy for DiscoveryWiring {
    fn label(&self) -> &'static str {
        "Instanciation avec enregistrement automatique"
    }

    fn wire(&self) -> Result<ComponentInstancePtr<CalculatorPtr>, StrategyError> {
        let factory = ComponentFactoryBuilder::new()
            .map_err(WiringError::from)?
            .build();
        let descriptor = factory.primary_descriptor().map_err(WiringError::from)?;
        info!(
            provider = %descriptor.provider_type_name,
            calculator = %descriptor.calculator_type_name,
            "Wiring discovered components..."
        );

        Ok(factory
            .create_calculator(&descriptor)
            .map_err(WiringError::from)?)
    }
}

/// Reads named components from a declarative context file and constructs them using the explicit
/// registration table.
#[derive(Constructor, Clone, Debug)]
pub struct DeclarativeWiring {
    context_file: PathBuf,
}

impl WiringStrategy for DeclarativeWiring {
    fn label(&self) -> &'static str {
        "Instanciation avec contexte declaratif"
    }

    fn wire(&self) -> Result<ComponentInstancePtr<CalculatorPtr>, StrategyError> {
        let descriptor = WiringContext::load(&self.context_file)?.descriptor()?;
        info!(
            provider = %descriptor.provider_type_name,
            calculator = %descriptor.calculator_type_name,
            "Wiring components from context..."
        );

        Ok(wire_from_table(&descriptor)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::context::ContextError;
    use crate::strategy::{
        DeclarativeWiring, DiscoveryWiring, DynamicWiring, StaticWiring, StrategyError,
        WiringStrategy,
    };
    use std::any::type_name;
    use std::io::Write;
    use wireup_di::error::{ComponentInstanceProviderError, DescriptorError, WiringError};

    fn assert_in_range(value: f64) {
        assert!((0.0..100.0).contains(&value), "{value} out of range");
    }

    #[test]
    fn should_wire_statically() {
        assert_in_range(StaticWiring.wire().unwrap().compute());
    }

    #[test]
    fn should_wire_discovered_components() {
        assert_in_range(DiscoveryWiring.wire().unwrap().compute());
    }

    #[test]
    fn should_wire_from_descriptor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", type_name::<crate::dao::RandomDataProvider>()).unwrap();
        writeln!(file, "{}", type_name::<crate::service::ScalingCalculator>()).unwrap();

        let strategy = DynamicWiring::new(file.path().to_path_buf());
        assert_in_range(strategy.wire().unwrap().compute());
    }

    #[test]
    fn should_wire_from_descriptor_aliases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dao\nmetier").unwrap();

        let strategy = DynamicWiring::new(file.path().to_path_buf());
        assert_in_range(strategy.wire().unwrap().compute());
    }

    #[test]
    fn should_fail_on_swapped_descriptor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "metier\ndao").unwrap();

        let strategy = DynamicWiring::new(file.path().to_path_buf());
        assert!(matches!(
            strategy.wire().err().unwrap(),
            StrategyError::Wiring(WiringError::Instance(
                ComponentInstanceProviderError::IncompatibleType { .. }
            ))
        ));
    }

    #[test]
    fn should_fail_on_missing_descriptor() {
        let directory = tempfile::tempdir().unwrap();

        let strategy = DynamicWiring::new(directory.path().join("config.txt"));
        assert!(matches!(
            strategy.wire().err().unwrap(),
            StrategyError::Wiring(WiringError::Descriptor(
                DescriptorError::ConfigurationUnreadable { .. }
            ))
        ));
    }

    #[test]
    fn should_wire_from_context() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "components": [
                {{ "name": "dao", "type": "{}" }},
                {{ "name": "metier", "type": "{}", "provider": "dao" }}
            ] }}"#,
            type_name::<crate::dao::RandomDataProvider>(),
            type_name::<crate::service::ScalingCalculator>(),
        )
        .unwrap();

        let strategy = DeclarativeWiring::new(file.path().to_path_buf());
        assert_in_range(strategy.wire().unwrap().compute());
    }

    #[test]
    fn should_fail_on_unknown_context_type() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "components": [
                {{ "name": "dao", "type": "unknown::Provider" }},
                {{ "name": "metier", "type": "metier", "provider": "dao" }}
            ] }}"#
        )
        .unwrap();

        let strategy = DeclarativeWiring::new(file.path().to_path_buf());
        assert!(matches!(
            strategy.wire().err().unwrap(),
            StrategyError::Wiring(WiringError::Instance(
                ComponentInstanceProviderError::TypeNotFound { .. }
            ))
        ));
    }

    #[test]
    fn should_fail_on_context_without_calculator() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "components": [ {{ "name": "dao", "type": "dao" }} ] }}"#
        )
        .unwrap();

        let strategy = DeclarativeWiring::new(file.path().to_path_buf());
        assert!(matches!(
            strategy.wire().err().unwrap(),
            StrategyError::Context(ContextError::MissingCalculator)
        ));
    }

    #[test]
    fn should_label_strategies_in_french() {
        let labels = [
            StaticWiring.label(),
            DynamicWiring::new("config.txt".into()).label(),
            DiscoveryWiring.label(),
            DeclarativeWiring::new("context.json".into()).label(),
        ];

        assert_eq!(
            labels,
            [
                "Instanciation statique",
                "Instanciation dynamique",
                "Instanciation avec enregistrement automatique",
                "Instanciation avec contexte declaratif",
            ]
        );
    }
}
