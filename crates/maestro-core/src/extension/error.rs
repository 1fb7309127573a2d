//! # Maestro Core Extension System Errors
//!
//! Defines error types specific to the extension system: fatal manifest
//! parse failures during a detection pass, blocked lifecycle transitions
//! carrying their structured unresolved list, inconsistencies between the
//! persisted active set and the registry, and host/publish failures.
//!
//! Dependency resolution itself never surfaces through this enum — the
//! resolver returns its unresolved list as a plain value, and only the
//! lifecycle manager boundary turns a non-empty list into
//! [`ExtensionSystemError::DependencyUnresolved`].
use std::path::PathBuf;

use crate::extension::dependency::UnresolvedDependency;
use crate::extension::version::VersionError;

#[derive(Debug, thiserror::Error)]
pub enum ExtensionSystemError {
    /// A manifest file exists but could not be parsed. Fatal to the whole
    /// detection pass.
    #[error("extension manifest error for '{identifier}' at '{path}': {source}")]
    ManifestParse {
        identifier: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error reading manifest at '{path}': {source}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Activation or deactivation blocked by dependencies. An expected
    /// business outcome; callers render the carried list.
    #[error("'{identifier}' blocked by unresolved dependencies: {}", render_unresolved(.unresolved))]
    DependencyUnresolved {
        identifier: String,
        unresolved: Vec<UnresolvedDependency>,
    },

    /// The identifier is not present in the registry
    #[error("unknown extension '{0}'")]
    UnknownExtension(String),

    /// Persisted state under a reserved key no longer deserializes into the
    /// expected shape
    #[error("corrupt persisted state at '{key}': {source}")]
    CorruptState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The persisted active set references an identifier with no descriptor.
    /// Indicates external mutation of persisted state; never silently
    /// dropped.
    #[error("active set references '{0}' which is missing from the registry")]
    InconsistentState(String),

    #[error("version parsing error: {0}")]
    Version(#[from] VersionError),

    #[error("module host error for '{identifier}' during '{operation}': {message}")]
    Host {
        identifier: String,
        operation: String,
        message: String,
    },

    /// A publish hook (schema migration or asset publication) failed;
    /// propagates as activation failure.
    #[error("publish failed for '{identifier}' during '{task}': {message}")]
    Publish {
        identifier: String,
        task: String,
        message: String,
    },
}

fn render_unresolved(unresolved: &[UnresolvedDependency]) -> String {
    unresolved
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
