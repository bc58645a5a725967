//! Business logic: the reference [Calculator].

use crate::dao::DAO_NAME;
use derive_more::Constructor;
use wireup_di::capability::{Calculator, DataProviderPtr};
use wireup_di::component::{Component, ProviderComponent};
use wireup_di::component_registry::{CapabilityMetadata, ComponentDefinition};
use wireup_di::instance_provider::{ComponentInstancePtr, ErrorPtr};
use wireup_di::register_component;

/// Alternative name of [ScalingCalculator].
pub const SERVICE_NAME: &str = "metier";

const SCALE: f64 = 100.0;

/// Scales values of the held provider by 100.
#[derive(Constructor)]
pub struct ScalingCalculator {
    provider: ComponentInstancePtr<DataProviderPtr>,
}

impl Calculator for ScalingCalculator {
    fn compute(&self) -> f64 {
        self.provider.produce_value() * SCALE
    }
}

impl ProviderComponent for ScalingCalculator {
    fn create(provider: ComponentInstancePtr<DataProviderPtr>) -> Result<Self, ErrorPtr> {
        Ok(Self::new(provider))
    }
}

impl Component for ScalingCalculator {
    fn definition() -> ComponentDefinition {
        ComponentDefinition::with_provider::<Self>()
            .with_name(SERVICE_NAME)
            .with_qualifier(DAO_NAME)
            .with_capability(CapabilityMetadata::calculator::<Self>())
    }
}

register_component!(ScalingCalculator);
