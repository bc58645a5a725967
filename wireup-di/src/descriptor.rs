//! Reading of [ComponentDescriptor]s - pairs of type names selecting which data provider and which
//! calculator should be wired together.
//!
//! The textual form consists of two lines: the data provider type name followed by the calculator
//! type name. Surrounding whitespace is ignored, as are any lines after the second one.

use crate::error::DescriptorError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Names of the two components to wire.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ComponentDescriptor {
    pub provider_type_name: String,
    pub calculator_type_name: String,
}

impl ComponentDescriptor {
    pub fn new<P: ToString, C: ToString>(provider_type_name: P, calculator_type_name: C) -> Self {
        Self {
            provider_type_name: provider_type_name.to_string(),
            calculator_type_name: calculator_type_name.to_string(),
        }
    }

    /// Opens and reads a descriptor file. The file is closed before returning, regardless of the
    /// result.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading component descriptor...");

        let file = File::open(path).map_err(|error| DescriptorError::ConfigurationUnreadable {
            location: path.display().to_string(),
            source: Arc::new(error),
        })?;

        Self::read(BufReader::new(file), &path.display().to_string())
    }

    /// Reads a descriptor from any buffered source.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DescriptorError> {
        Self::read(reader, "reader")
    }

    fn read<R: BufRead>(reader: R, location: &str) -> Result<Self, DescriptorError> {
        let mut names = Vec::with_capacity(2);
        for line in reader.lines().take(2) {
            let line = line.map_err(|error| DescriptorError::ConfigurationUnreadable {
                location: location.to_string(),
                source: Arc::new(error),
            })?;

            let name = line.trim();
            if name.is_empty() {
                break;
            }

            names.push(name.to_string());
        }

        match <[String; 2]>::try_from(names) {
            Ok([provider_type_name, calculator_type_name]) => Ok(Self {
                provider_type_name,
                calculator_type_name,
            }),
            Err(names) => Err(DescriptorError::ConfigurationMissing { found: names.len() }),
        }
    }
}
