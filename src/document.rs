#![warn(missing_docs)]
//! The basic structure of a fibertrace simulation setup.
//!
//! It contains the [`SimDocument`] structure, which holds a fiber geometry together
//! with a trace configuration. This module also handles reading and writing of
//! simulation setups as YAML files.
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::{FibertraceError, FtrResult};
use crate::fiber::FiberType;
use crate::trajectory::TraceConfig;

/// A complete, persistable simulation setup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimDocument {
    fiber: FiberType,
    #[serde(default)]
    trace: TraceConfig,
}
impl SimDocument {
    /// Creates a new [`SimDocument`].
    #[must_use]
    pub const fn new(fiber: FiberType, trace: TraceConfig) -> Self {
        Self { fiber, trace }
    }
    /// Create a new [`SimDocument`] from the given YAML string.
    ///
    /// The contained fiber is rebuilt through its constructor, so cached derived
    /// quantities stored in the document are re-derived and all parameters
    /// re-validated.
    ///
    /// # Errors
    ///
    /// This function will return an error if the parsing of the setup failed or the
    /// stored fiber parameters are invalid.
    pub fn from_string(file_string: &str) -> FtrResult<Self> {
        let document: Self = serde_yaml::from_str(file_string).map_err(|e| {
            FibertraceError::Other(format!("parsing of simulation setup failed: {e}"))
        })?;
        Ok(Self {
            fiber: document.fiber.rebuild()?,
            trace: document.trace,
        })
    }
    /// Create a new [`SimDocument`] from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the given path is not found or readable.
    ///   - the parsing / deserialization of the file failed.
    pub fn from_file(path: &Path) -> FtrResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            FibertraceError::Other(format!("cannot read file {} : {}", path.display(), e))
        })?;
        Self::from_string(&contents)
    }
    /// Serialize this [`SimDocument`] into a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization of the document failed.
    pub fn to_yaml_string(&self) -> FtrResult<String> {
        serde_yaml::to_string(self).map_err(|e| {
            FibertraceError::Other(format!("serialization of simulation setup failed: {e}"))
        })
    }
    /// Save this [`SimDocument`] to a YAML file with the given path.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the serialization of the document failed.
    ///   - the file path cannot be created.
    ///   - it cannot write into the file (e.g. no space).
    pub fn save_to_file(&self, path: &Path) -> FtrResult<()> {
        let serialized = self.to_yaml_string()?;
        let mut output = File::create(path).map_err(|e| {
            FibertraceError::Other(format!(
                "could not create file path: {}: {}",
                path.display(),
                e
            ))
        })?;
        write!(output, "{serialized}").map_err(|e| {
            FibertraceError::Other(format!(
                "writing to file path {} failed: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }
    /// Returns the fiber geometry of this [`SimDocument`].
    #[must_use]
    pub const fn fiber(&self) -> &FiberType {
        &self.fiber
    }
    /// Returns the trace configuration of this [`SimDocument`].
    #[must_use]
    pub const fn trace_config(&self) -> &TraceConfig {
        &self.trace
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fiber::{Fiber, FiberCone, FiberCylinder};
    use crate::{meter, micrometer};
    use tempfile::NamedTempFile;

    fn document() -> SimDocument {
        let fiber = FiberCone::new(
            meter!(1.0),
            micrometer!(100.0),
            micrometer!(50.0),
            1.48,
            1.46,
        )
        .unwrap();
        let mut trace = TraceConfig::default();
        trace.set_max_reflections(100).unwrap();
        SimDocument::new(fiber.to_enum(), trace)
    }
    #[test]
    fn new() {
        let document = document();
        assert_eq!(document.trace_config().max_reflections(), 100);
        assert_eq!(format!("{}", document.fiber()), "Cone");
    }
    #[test]
    fn string_roundtrip() {
        let document = document();
        let serialized = document.to_yaml_string().unwrap();
        let deserialized = SimDocument::from_string(&serialized).unwrap();
        assert_eq!(deserialized, document);
    }
    #[test]
    fn from_string_invalid() {
        assert!(SimDocument::from_string("no valid setup").is_err());
    }
    #[test]
    fn from_string_missing_trace_config() {
        let mut value = serde_yaml::to_value(document()).unwrap();
        value.as_mapping_mut().unwrap().remove("trace");
        let yaml = serde_yaml::to_string(&value).unwrap();
        let document = SimDocument::from_string(&yaml).unwrap();
        assert_eq!(document.trace_config(), &TraceConfig::default());
    }
    #[test]
    fn string_roundtrip_cylinder() {
        let fiber = FiberCylinder::new(
            micrometer!(100.0),
            micrometer!(120.0),
            1.48,
            1.46,
            meter!(1.0),
        )
        .unwrap();
        let document = SimDocument::new(fiber.to_enum(), TraceConfig::default());
        let deserialized = SimDocument::from_string(&document.to_yaml_string().unwrap()).unwrap();
        assert_eq!(deserialized, document);
    }
    #[test]
    fn save_and_load() {
        let document = document();
        let file = NamedTempFile::new().unwrap();
        document.save_to_file(file.path()).unwrap();
        let read = SimDocument::from_file(file.path()).unwrap();
        assert_eq!(read, document);
    }
    #[test]
    fn from_file_missing() {
        assert!(SimDocument::from_file(Path::new("does_not_exist.yaml")).is_err());
    }
}
