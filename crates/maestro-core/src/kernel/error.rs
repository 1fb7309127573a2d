//! # Maestro Core Kernel Errors
//!
//! Defines the top-level error type aggregating the subsystem errors, and
//! the crate-wide `Result` alias. Subsystem errors convert in via `#[from]`
//! so `?` composes across module boundaries.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::extension::error::ExtensionSystemError;
use crate::memory::error::MemorySystemError;

/// Top-level error type for the Maestro core
#[derive(Debug, ThisError)]
pub enum Error {
    /// Extension system error
    #[error("extension system error: {0}")]
    Extension(#[from] ExtensionSystemError),

    /// Memory store error
    #[error("memory system error: {0}")]
    Memory(#[from] MemorySystemError),

    /// Generic error with message
    #[error("error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// The structured unresolved list when this error is a blocked
    /// lifecycle transition; callers branch on it to render precise
    /// messages instead of string-matching.
    pub fn unresolved_dependencies(
        &self,
    ) -> Option<&[crate::extension::dependency::UnresolvedDependency]> {
        match self {
            Error::Extension(ExtensionSystemError::DependencyUnresolved { unresolved, .. }) => {
                Some(unresolved)
            }
            _ => None,
        }
    }
}
