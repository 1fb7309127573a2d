//! # Maestro Core Memory System
//!
//! Durable key-path storage for the extension core. Values live in a single
//! JSON document addressed by dot-separated paths; the backend is swappable
//! between a persistent file store and a volatile runtime store used while
//! installation has not completed.
//!
//! ## Key Submodules:
//!
//! - **[`store`]**: The [`MemoryStore`] trait consumed by the registry,
//!   lifecycle manager, and settings surface.
//! - **[`document`]**: Dot-path traversal over the nested JSON document.
//! - **[`file`]**: Persistent backend with atomic write-through.
//! - **[`runtime`]**: In-process fallback backend.
//! - **[`error`]**: Memory-specific error types.
pub mod document;
pub mod error;
pub mod file;
pub mod runtime;
pub mod store;

/// Re-export key types
pub use document::Document;
pub use error::MemorySystemError;
pub use file::FileMemory;
pub use runtime::RuntimeMemory;
pub use store::MemoryStore;

// Test module declaration
#[cfg(test)]
mod tests;
