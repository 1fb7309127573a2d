use serde_json::Value;

use crate::memory::document::Document;
use crate::memory::error::MemorySystemError;
use crate::memory::store::MemoryStore;

/// Volatile in-process memory store.
///
/// Used as the fallback backend when the persistent store is unavailable at
/// bootstrap (first run, installation not completed). Nothing written here
/// survives the process.
#[derive(Debug, Default)]
pub struct RuntimeMemory {
    document: Document,
}

impl RuntimeMemory {
    /// Create an empty runtime store
    pub fn new() -> Self {
        Self {
            document: Document::new(),
        }
    }

    /// Create a runtime store seeded with an existing document
    pub fn with_document(document: Document) -> Self {
        Self { document }
    }

    /// Borrow the underlying document
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl MemoryStore for RuntimeMemory {
    fn name(&self) -> &str {
        "runtime"
    }

    fn get(&self, path: &str) -> Option<Value> {
        self.document.get(path).cloned()
    }

    fn put(&mut self, path: &str, value: Value) -> Result<(), MemorySystemError> {
        self.document.put(path, value);
        Ok(())
    }

    fn forget(&mut self, path: &str) -> Result<Option<Value>, MemorySystemError> {
        Ok(self.document.forget(path))
    }
}
