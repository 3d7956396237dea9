use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use thiserror::Error;

use crate::core::definition::CourierDefinition;
use crate::core::descriptor::FormatDescriptor;
use crate::core::types::ServiceId;
use crate::registry::builder::build_descriptor;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read courier definitions: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse courier definitions: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Courier definition files compiled into the binary, in file name order.
/// The table is generated by `build.rs` from the `couriers/` directory.
const EMBEDDED_COURIERS: &[(&str, &str)] =
    include!(concat!(env!("OUT_DIR"), "/embedded_couriers.rs"));

static EMBEDDED: LazyLock<Registry> = LazyLock::new(Registry::load_embedded);

/// Decode a definition document holding one courier or an array of them.
///
/// The document shape is chosen from its first token so that decoding
/// errors keep their line and column.
fn decode(json: &str) -> Result<Vec<CourierDefinition>, serde_json::Error> {
    if json.trim_start().starts_with('[') {
        serde_json::from_str(json)
    } else {
        serde_json::from_str::<CourierDefinition>(json).map(|courier| vec![courier])
    }
}

/// Ordered, read-only collection of compiled service descriptors
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: Vec<FormatDescriptor>,

    /// Index: service ID -> index in descriptors vec (first declaration wins)
    id_to_index: HashMap<ServiceId, usize>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded registry, built on first use and shared thereafter
    #[must_use]
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    /// Build a fresh registry from the embedded definition files.
    ///
    /// Files that fail to decode are skipped.
    #[must_use]
    pub fn load_embedded() -> Self {
        let mut registry = Self::new();
        for (file, json) in EMBEDDED_COURIERS {
            match decode(json) {
                Ok(couriers) => {
                    for courier in &couriers {
                        registry.add_courier(courier);
                    }
                }
                Err(e) => tracing::warn!("Skipping embedded courier file {file}: {e}"),
            }
        }
        tracing::info!(
            "Loaded {} tracking services from embedded definitions",
            registry.len()
        );
        registry
    }

    /// Build a registry from already-decoded courier definitions.
    ///
    /// Services that fail to build are skipped; the result may be empty.
    pub fn from_definitions<'a, I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = &'a CourierDefinition>,
    {
        let mut registry = Self::new();
        for courier in definitions {
            registry.add_courier(courier);
        }
        registry
    }

    /// Parse a JSON document holding one courier definition or an array of them
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ParseError` if the document does not decode.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let couriers = decode(json)?;
        Ok(Self::from_definitions(&couriers))
    }

    /// Load definitions from a JSON file, or from every `*.json` file in a
    /// directory (in file name order).
    ///
    /// Within a directory, files that cannot be read or decoded are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be read, or if a single file does
    /// not decode.
    pub fn load_from_path(path: &Path) -> Result<Self, RegistryError> {
        if !path.is_dir() {
            let content = std::fs::read_to_string(path)?;
            return Self::from_json(&content);
        }

        let mut files: Vec<_> = std::fs::read_dir(path)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        let mut registry = Self::new();
        for file in &files {
            let couriers = match std::fs::read_to_string(file)
                .map_err(RegistryError::from)
                .and_then(|content| decode(&content).map_err(RegistryError::from))
            {
                Ok(couriers) => couriers,
                Err(e) => {
                    tracing::warn!("Skipping courier file {}: {e}", file.display());
                    continue;
                }
            };
            for courier in &couriers {
                registry.add_courier(courier);
            }
        }

        tracing::info!(
            "Loaded {} tracking services from {} files in {}",
            registry.len(),
            files.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Compile and add every service of a courier; returns how many were added
    pub fn add_courier(&mut self, courier: &CourierDefinition) -> usize {
        let mut added = 0;
        for service in &courier.services {
            match build_descriptor(courier, service) {
                Ok(descriptor) => {
                    tracing::debug!(
                        "Loaded service {} ({}) checksum={}",
                        descriptor.id,
                        descriptor.courier_code,
                        descriptor.checksum.name()
                    );
                    self.add_descriptor(descriptor);
                    added += 1;
                }
                Err(e) => tracing::warn!(
                    "Skipping service '{}' of courier '{}': {e}",
                    service.id,
                    courier.courier_code
                ),
            }
        }
        added
    }

    /// Append a compiled descriptor
    pub fn add_descriptor(&mut self, descriptor: FormatDescriptor) {
        let index = self.descriptors.len();
        self.id_to_index
            .entry(descriptor.id.clone())
            .or_insert(index);
        self.descriptors.push(descriptor);
    }

    /// Get a descriptor by service ID
    #[must_use]
    pub fn get(&self, id: &ServiceId) -> Option<&FormatDescriptor> {
        self.id_to_index.get(id).map(|&idx| &self.descriptors[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormatDescriptor> {
        self.descriptors.iter()
    }

    /// Distinct `(courier_code, courier_name)` pairs in declaration order
    #[must_use]
    pub fn couriers(&self) -> Vec<(&str, &str)> {
        let mut seen = Vec::new();
        for descriptor in &self.descriptors {
            let pair = (
                descriptor.courier_code.as_str(),
                descriptor.courier_name.as_str(),
            );
            if !seen.contains(&pair) {
                seen.push(pair);
            }
        }
        seen
    }

    /// Number of descriptors in the registry
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a FormatDescriptor;
    type IntoIter = std::slice::Iter<'a, FormatDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
