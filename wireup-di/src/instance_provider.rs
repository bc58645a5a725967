//! Pointer types for type-erased component instances and helpers to recover typed access.

use std::any::Any;
use std::error::Error;
use std::sync::Arc;

pub type ComponentInstancePtr<T> = Arc<T>;

pub type ComponentInstanceAnyPtr = ComponentInstancePtr<dyn Any + Send + Sync + 'static>;

pub type ErrorPtr = Arc<dyn Error + Send + Sync>;

/// Casts a type-erased instance to a boxed `ComponentInstancePtr<Capability>`. The capability is
/// decided by whoever produced the function, usually a
/// [CapabilityMetadata](crate::component_registry::CapabilityMetadata). Returns the original
/// instance on failure.
pub type CastFunction =
    fn(instance: ComponentInstanceAnyPtr) -> Result<Box<dyn Any>, ComponentInstanceAnyPtr>;

/// Applies given [CastFunction] and unwraps the result into a typed pointer. Returns `None` if
/// the instance is not of the type expected by the cast function or the cast function does not
/// produce `ComponentInstancePtr<T>`.
pub fn cast_instance<T: ?Sized + 'static>(
    instance: ComponentInstanceAnyPtr,
    cast: CastFunction,
) -> Option<ComponentInstancePtr<T>> {
    (cast)(instance)
        .ok()?
        .downcast::<ComponentInstancePtr<T>>()
        .ok()
        .map(|instance| *instance)
}

#[cfg(test)]
mod tests {
    use crate::instance_provider::{
        cast_instance, ComponentInstanceAnyPtr, ComponentInstancePtr,
    };
    use std::any::Any;

    fn cast_u8(instance: ComponentInstanceAnyPtr) -> Result<Box<dyn Any>, ComponentInstanceAnyPtr> {
        instance
            .downcast::<u8>()
            .map(|instance| Box::new(instance) as Box<dyn Any>)
    }

    #[test]
    fn should_cast_matching_instance() {
        let instance = ComponentInstancePtr::new(5u8) as ComponentInstanceAnyPtr;
        assert_eq!(*cast_instance::<u8>(instance, cast_u8).unwrap(), 5);
    }

    #[test]
    fn should_not_cast_other_instance() {
        let instance = ComponentInstancePtr::new(5i64) as ComponentInstanceAnyPtr;
        assert!(cast_instance::<u8>(instance, cast_u8).is_none());
    }

    #[test]
    fn should_not_cast_to_other_target() {
        let instance = ComponentInstancePtr::new(5u8) as ComponentInstanceAnyPtr;
        assert!(cast_instance::<i64>(instance, cast_u8).is_none());
    }
}
