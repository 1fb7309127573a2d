use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime configuration for a single extension: option name → value
pub type ConfigMap = BTreeMap<String, Value>;

/// Version recorded for manifests that declare none
pub const DEFAULT_VERSION: &str = ">0";

/// Represents an extension descriptor assembled from a manifest file.
///
/// The descriptor is immutable once cached: a detection pass rebuilds the
/// whole available set rather than merging into it. The declared `name` is
/// human-readable and may differ from the identifier the descriptor is
/// registered under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Human-readable name
    pub name: String,

    /// Extension version
    #[serde(default = "default_version")]
    pub version: String,

    /// Configuration options and their defaults
    #[serde(default)]
    pub config: ConfigMap,

    /// Dependencies: reference (identifier or declared name) → requirement
    /// string such as `">=1.2"` or `"bundle"`
    #[serde(default)]
    pub require: BTreeMap<String, String>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl ExtensionDescriptor {
    /// Create a new descriptor with no config and no requirements
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            config: ConfigMap::new(),
            require: BTreeMap::new(),
        }
    }

    /// Add a configuration default
    pub fn with_config(mut self, option: &str, default: Value) -> Self {
        self.config.insert(option.to_string(), default);
        self
    }

    /// Add a requirement entry
    pub fn with_require(mut self, reference: &str, constraint: &str) -> Self {
        self.require
            .insert(reference.to_string(), constraint.to_string());
        self
    }
}

/// Intermediate struct for manifest deserialization. Unknown fields are
/// ignored; a manifest without a `name` is tolerated here and excluded from
/// the registry by the detection pass.
#[derive(Debug, Deserialize)]
pub(crate) struct RawManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub config: ConfigMap,
    #[serde(default)]
    pub require: BTreeMap<String, String>,
}

impl RawManifest {
    /// Convert into a descriptor, yielding `None` when no name is declared
    pub(crate) fn into_descriptor(self) -> Option<ExtensionDescriptor> {
        let name = self.name?;
        Some(ExtensionDescriptor {
            name,
            version: self.version,
            config: self.config,
            require: self.require,
        })
    }
}
