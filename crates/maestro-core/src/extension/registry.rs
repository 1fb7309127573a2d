use std::collections::BTreeMap;

use serde_json::Value;

use crate::extension::error::ExtensionSystemError;
use crate::extension::manifest::{ConfigMap, ExtensionDescriptor};
use crate::kernel::constants::{ACTIVE_KEY, AVAILABLE_KEY};
use crate::memory::error::MemorySystemError;
use crate::memory::store::MemoryStore;

/// Registry of available extensions: identifier → descriptor.
///
/// Rebuilt wholesale by every detection pass and cached in the memory store
/// under `extensions.available`; never merged incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionRegistry {
    extensions: BTreeMap<String, ExtensionDescriptor>,
}

impl ExtensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            extensions: BTreeMap::new(),
        }
    }

    /// Register a descriptor under an identifier, replacing any previous one
    pub fn insert(&mut self, identifier: &str, descriptor: ExtensionDescriptor) {
        self.extensions.insert(identifier.to_string(), descriptor);
    }

    /// Look up a descriptor by identifier
    pub fn get(&self, identifier: &str) -> Option<&ExtensionDescriptor> {
        self.extensions.get(identifier)
    }

    /// Whether an identifier is registered
    pub fn contains(&self, identifier: &str) -> bool {
        self.extensions.contains_key(identifier)
    }

    /// Reverse lookup from a declared name to the identifier it is
    /// registered under. Linear scan; the registry holds tens of entries,
    /// not millions.
    pub fn identifier_for(&self, name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|(_, descriptor)| descriptor.name == name)
            .map(|(identifier, _)| identifier.as_str())
    }

    /// Iterate identifiers and descriptors
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExtensionDescriptor)> {
        self.extensions.iter()
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Load the cached registry from the memory store. An absent key yields
    /// an empty registry (first run); a value that no longer deserializes is
    /// corrupt persisted state.
    pub fn load(memory: &dyn MemoryStore) -> Result<Self, ExtensionSystemError> {
        let value = memory.get_or(AVAILABLE_KEY, Value::Object(Default::default()));
        let extensions: BTreeMap<String, ExtensionDescriptor> = serde_json::from_value(value)
            .map_err(|source| ExtensionSystemError::CorruptState {
                key: AVAILABLE_KEY.to_string(),
                source,
            })?;
        Ok(Self { extensions })
    }

    /// Persist the registry to the memory store, overwriting the whole
    /// available set.
    pub fn persist(&self, memory: &mut dyn MemoryStore) -> Result<(), MemorySystemError> {
        let value = serde_json::to_value(&self.extensions)
            .map_err(|source| MemorySystemError::Serialization { source })?;
        memory.put(AVAILABLE_KEY, value)
    }
}

/// Persisted set of activated extensions and their resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveSet {
    entries: BTreeMap<String, ConfigMap>,
}

impl ActiveSet {
    /// Create an empty active set
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Record an identifier with its resolved config
    pub fn insert(&mut self, identifier: &str, config: ConfigMap) {
        self.entries.insert(identifier.to_string(), config);
    }

    /// Remove an identifier, returning its config if it was active
    pub fn remove(&mut self, identifier: &str) -> Option<ConfigMap> {
        self.entries.remove(identifier)
    }

    /// Whether an identifier is active
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// The resolved config of an active identifier
    pub fn config(&self, identifier: &str) -> Option<&ConfigMap> {
        self.entries.get(identifier)
    }

    /// Iterate active identifiers and configs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigMap)> {
        self.entries.iter()
    }

    /// Active identifiers
    pub fn identifiers(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Number of active extensions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no extension is active
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the active set from the memory store, tolerating partial or
    /// legacy persisted shapes: an absent key is an empty set, and a bare
    /// array of identifiers (older deployments) becomes entries with empty
    /// config rather than an error.
    pub fn load(memory: &dyn MemoryStore) -> Self {
        let value = memory.get_or(ACTIVE_KEY, Value::Object(Default::default()));
        let mut entries = BTreeMap::new();

        match value {
            Value::Object(map) => {
                for (identifier, config) in map {
                    let config = serde_json::from_value::<ConfigMap>(config).unwrap_or_default();
                    entries.insert(identifier, config);
                }
            }
            Value::Array(identifiers) => {
                for entry in identifiers {
                    if let Value::String(identifier) = entry {
                        entries.insert(identifier, ConfigMap::new());
                    }
                }
            }
            _ => {}
        }

        Self { entries }
    }

    /// Persist the active set to the memory store
    pub fn persist(&self, memory: &mut dyn MemoryStore) -> Result<(), MemorySystemError> {
        let value = serde_json::to_value(&self.entries)
            .map_err(|source| MemorySystemError::Serialization { source })?;
        memory.put(ACTIVE_KEY, value)
    }

    /// Verify the registry invariant: every active identifier must have a
    /// descriptor. Returns the first violation.
    pub fn verify_against(&self, registry: &ExtensionRegistry) -> Result<(), ExtensionSystemError> {
        for identifier in self.entries.keys() {
            if !registry.contains(identifier) {
                return Err(ExtensionSystemError::InconsistentState(identifier.clone()));
            }
        }
        Ok(())
    }
}
