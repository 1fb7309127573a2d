use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::memory::document::Document;
use crate::memory::error::MemorySystemError;
use crate::memory::store::MemoryStore;

/// Persistent memory store backed by a single JSON document on disk.
///
/// Writes are flushed through immediately: each `put`/`forget` rewrites the
/// document via a temp file that atomically replaces the target, so a crash
/// mid-write never leaves a truncated store behind.
#[derive(Debug)]
pub struct FileMemory {
    path: PathBuf,
    document: Document,
}

impl FileMemory {
    /// Open an existing store file.
    ///
    /// A missing file or an empty document both yield
    /// [`MemorySystemError::Unavailable`]: the caller (bootstrap) treats
    /// either as "installation required" and falls back to a runtime store.
    /// A present-but-malformed file is a deserialization error instead,
    /// since it indicates corruption rather than a fresh deployment.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MemorySystemError> {
        let path = path.into();

        if !path.is_file() {
            return Err(MemorySystemError::Unavailable {
                path,
                reason: "store file does not exist".to_string(),
            });
        }

        let raw = fs::read_to_string(&path)
            .map_err(|e| MemorySystemError::io(e, "read_to_string", path.clone()))?;
        let document: Document = serde_json::from_str(&raw).map_err(|source| {
            MemorySystemError::Deserialization {
                path: path.clone(),
                source,
            }
        })?;

        if document.is_empty() {
            return Err(MemorySystemError::Unavailable {
                path,
                reason: "store document is empty".to_string(),
            });
        }

        Ok(Self { path, document })
    }

    /// Create a new store file seeded with the given document, overwriting
    /// any existing file. This is the installation path.
    pub fn create(
        path: impl Into<PathBuf>,
        document: Document,
    ) -> Result<Self, MemorySystemError> {
        let mut store = Self {
            path: path.into(),
            document,
        };
        store.persist()?;
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&mut self) -> Result<(), MemorySystemError> {
        let parent = self.path.parent().ok_or_else(|| MemorySystemError::Unavailable {
            path: self.path.clone(),
            reason: "store path has no parent directory".to_string(),
        })?;

        if !parent.is_dir() {
            fs::create_dir_all(parent)
                .map_err(|e| MemorySystemError::io(e, "create_dir_all", parent.to_path_buf()))?;
        }

        let contents = serde_json::to_string_pretty(&self.document)
            .map_err(|source| MemorySystemError::Serialization { source })?;

        // Write to a named temporary file in the target directory, then
        // persist it over the real file so the replace is atomic.
        let temp_file = NamedTempFile::new_in(parent)
            .map_err(|e| MemorySystemError::io(e, "create_temp_file", parent.to_path_buf()))?;
        temp_file
            .as_file()
            .write_all(contents.as_bytes())
            .map_err(|e| MemorySystemError::io(e, "write_to_temp_file", temp_file.path().to_path_buf()))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| MemorySystemError::io(e.error, "persist_temp_file", self.path.clone()))?;

        Ok(())
    }
}

impl MemoryStore for FileMemory {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, path: &str) -> Option<Value> {
        self.document.get(path).cloned()
    }

    fn put(&mut self, path: &str, value: Value) -> Result<(), MemorySystemError> {
        self.document.put(path, value);
        self.persist()
    }

    fn forget(&mut self, path: &str) -> Result<Option<Value>, MemorySystemError> {
        let removed = self.document.forget(path);
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }
}
