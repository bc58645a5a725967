mod factory_test {
    use std::any::TypeId;
    use wireup_di::capability::{Calculator, DataProvider, DataProviderPtr};
    use wireup_di::component::{Component, NullaryComponent, ProviderComponent};
    use wireup_di::component_registry::{
        CapabilityMetadata, ComponentDefinition, ComponentDefinitionRegistry,
        StaticComponentDefinitionRegistry,
    };
    use wireup_di::descriptor::ComponentDescriptor;
    use wireup_di::error::{ComponentInstanceProviderError, WiringStage};
    use wireup_di::factory::{ComponentFactory, ComponentFactoryBuilder};
    use wireup_di::instance_provider::{ComponentInstancePtr, ErrorPtr};
    use wireup_di::register_component;

    struct ConstantProvider;

    impl DataProvider for ConstantProvider {
        fn produce_value(&self) -> f64 {
            0.5
        }
    }

    impl NullaryComponent for ConstantProvider {
        fn create() -> Result<Self, ErrorPtr> {
            Ok(ConstantProvider)
        }
    }

    impl Component for ConstantProvider {
        fn definition() -> ComponentDefinition {
            ComponentDefinition::nullary::<Self>()
                .with_name("constant")
                .with_capability(CapabilityMetadata::data_provider::<Self>().primary())
        }
    }

    struct ZeroProvider;

    impl DataProvider for ZeroProvider {
        fn produce_value(&self) -> f64 {
            0.0
        }
    }

    impl NullaryComponent for ZeroProvider {
        fn create() -> Result<Self, ErrorPtr> {
            Ok(ZeroProvider)
        }
    }

    impl Component for ZeroProvider {
        fn definition() -> ComponentDefinition {
            ComponentDefinition::nullary::<Self>()
                .with_name("zero")
                .with_capability(CapabilityMetadata::data_provider::<Self>())
        }
    }

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
            Ok(Self { provider })
        }
    }

    impl Component for Doubler {
        fn definition() -> ComponentDefinition {
            ComponentDefinition::with_provider::<Self>()
                .with_name("doubler")
                .with_capability(CapabilityMetadata::calculator::<Self>())
        }
    }

    register_component!(ConstantProvider);
    register_component!(ZeroProvider);
    register_component!(Doubler);

    #[test]
    fn should_discover_registered_components() {
        let registry = StaticComponentDefinitionRegistry::new(false).unwrap();

        assert!(registry.is_name_registered("constant"));
        assert!(registry.is_name_registered("zero"));
        assert!(registry.is_name_registered("doubler"));
        assert_eq!(
            registry
                .components_by_capability(TypeId::of::<DataProviderPtr>())
                .len(),
            2
        );
    }

    #[test]
    fn should_wire_primary_components() {
        let factory = ComponentFactoryBuilder::new().unwrap().build();

        let descriptor = factory.primary_descriptor().unwrap();
        assert_eq!(
            descriptor,
            ComponentDescriptor::new(
                std::any::type_name::<ConstantProvider>(),
                std::any::type_name::<Doubler>()
            )
        );

        let calculator = factory.create_calculator(&descriptor).unwrap();
        assert_eq!(calculator.compute(), 1.0);
    }

    #[test]
    fn should_wire_components_by_alias() {
        let factory = ComponentFactoryBuilder::new().unwrap().build();

        let calculator = factory
            .create_calculator(&ComponentDescriptor::new("zero", "doubler"))
            .unwrap();
        assert_eq!(calculator.compute(), 0.0);
    }

    #[test]
    fn should_wire_explicitly_registered_components() {
        let registry = StaticComponentDefinitionRegistry::with_definitions(
            [ZeroProvider::definition(), Doubler::definition()],
            false,
        )
        .unwrap();
        let factory = ComponentFactory::new(Box::new(registry));

        assert!(factory
            .create_calculator(&ComponentDescriptor::new("zero", "doubler"))
            .is_ok());
        assert!(matches!(
            factory
                .create_calculator(&ComponentDescriptor::new("constant", "doubler"))
                .err()
                .unwrap(),
            ComponentInstanceProviderError::TypeNotFound {
                stage: WiringStage::ResolveProviderType,
                ..
            }
        ));
    }
}
