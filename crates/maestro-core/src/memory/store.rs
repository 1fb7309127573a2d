use std::fmt::Debug;
use serde_json::Value;

use crate::memory::error::MemorySystemError;

/// Trait for memory stores holding durable key-path state.
///
/// Paths are dot-separated strings (e.g. `extensions.available`,
/// `site.name`). The store enforces no schema of its own; callers are
/// responsible for type expectations on the values they read back.
pub trait MemoryStore: Send + Sync + Debug {
    /// Get the name of this store backend
    fn name(&self) -> &str;

    /// Read the value at a key path, if present
    fn get(&self, path: &str) -> Option<Value>;

    /// Write a value at a key path. Persistent backends flush the change
    /// before returning; a write failure is fatal to the caller's operation.
    fn put(&mut self, path: &str, value: Value) -> Result<(), MemorySystemError>;

    /// Remove the value at a key path, returning it if it was present
    fn forget(&mut self, path: &str) -> Result<Option<Value>, MemorySystemError>;

    /// Read the value at a key path, falling back to a default
    fn get_or(&self, path: &str, default: Value) -> Value {
        self.get(path).unwrap_or(default)
    }
}
