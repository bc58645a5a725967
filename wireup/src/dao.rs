//! Data access: the reference [DataProvider].

use rand::Rng;
use wireup_di::capability::DataProvider;
use wireup_di::component::{Component, NullaryComponent};
use wireup_di::component_registry::{CapabilityMetadata, ComponentDefinition};
use wireup_di::instance_provider::ErrorPtr;
use wireup_di::register_component;

/// Alternative name of [RandomDataProvider].
pub const DAO_NAME: &str = "dao";

/// Provides uniformly distributed random values in `[0, 1)`.
#[derive(Default, Copy, Clone, Debug)]
pub struct RandomDataProvider;

impl DataProvider for RandomDataProvider {
    fn produce_value(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

impl NullaryComponent for RandomDataProvider {
    fn create() -> Result<Self, ErrorPtr> {
        Ok(Self)
    }
}

impl Component for RandomDataProvider {
    fn definition() -> ComponentDefinition {
        ComponentDefinition::nullary::<Self>()
            .with_name(DAO_NAME)
            .with_capability(CapabilityMetadata::data_provider::<Self>())
    }
}

register_component!(RandomDataProvider);

#[cfg(test)]
mod tests {
    use crate::dao::RandomDataProvider;
    use wireup_di::capability::DataProvider;

    #[test]
    fn should_produce_values_in_unit_range() {
        let provider = RandomDataProvider;
        for _ in 0..1000 {
            let value = provider.produce_value();
            assert!((0.0..1.0).contains(&value), "{value} out of range");
        }
    }
}
