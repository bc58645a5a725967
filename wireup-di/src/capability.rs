//! Capability contracts of wired components. A component satisfies a capability by implementing
//! its trait and declaring it in its
//! [ComponentDefinition](crate::component_registry::ComponentDefinition).

#[cfg(test)]
use mockall::automock;

pub type DataProviderPtr = dyn DataProvider + Send + Sync;

pub type CalculatorPtr = dyn Calculator + Send + Sync;

/// Produces a numeric value on demand.
#[cfg_attr(test, automock)]
pub trait DataProvider {
    /// Produces a value. Can be called any number of times and each call may return a different
    /// value.
    fn produce_value(&self) -> f64;
}

/// Produces a value derived from a held [DataProvider].
#[cfg_attr(test, automock)]
pub trait Calculator {
    fn compute(&self) -> f64;
}
