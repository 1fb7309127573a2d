//! # Maestro Core Memory Errors
//!
//! Defines error types specific to the Maestro memory store.
//!
//! This module includes [`MemorySystemError`], the enum encompassing the
//! failures that can occur while loading, reading, or persisting the
//! key-path document: backing-store unavailability (the bootstrap trigger),
//! file I/O failures, and document (de)serialization problems.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemorySystemError {
    /// The backing data source is unreachable or holds no data yet. The
    /// bootstrap treats this as "installation required", not a crash.
    #[error("memory store unavailable at '{path}': {reason}")]
    Unavailable { path: PathBuf, reason: String },

    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize memory document: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to deserialize memory document from '{path}': {source}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// Helper for creating Io errors, ensuring path is always included.
impl MemorySystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        MemorySystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
