//! # Maestro Core Extension System
//!
//! Infrastructure for discovering, activating, deactivating, and
//! dependency-resolving extensions. An extension is a module (a unit of
//! loadable code registered with the host runtime) that additionally
//! carries a manifest descriptor and participates in the activation
//! lifecycle; its registry and active set persist through the memory store.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`manifest`]**: Descriptor structure and manifest deserialization.
//! - **[`version`]**: Requirement-string parsing and numeric dot-separated
//!   version comparison.
//! - **[`dependency`]**: Resolved dependency references and unresolved
//!   requirement entries.
//! - **[`registry`]**: The available set and the persisted active set.
//! - **[`loader`]**: Manifest detection across module locations.
//! - **[`resolver`]**: Activation feasibility and reverse-dependent checks.
//! - **[`manager`]**: The lifecycle orchestrator.
//! - **[`traits`]**: Module host and publish-hook seams.
//! - **[`error`]**: Extension-specific error types.
pub mod dependency;
pub mod error;
pub mod loader;
pub mod manager;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod traits;
pub mod version;

pub use dependency::{DependencyRef, UnresolvedDependency};
pub use error::ExtensionSystemError;
pub use loader::{detect, discover_locations, ModuleLocation};
pub use manager::ExtensionManager;
pub use manifest::{ConfigMap, ExtensionDescriptor};
pub use registry::{ActiveSet, ExtensionRegistry};
pub use resolver::{DependencyResolver, ResolveMode};
pub use traits::{InProcessHost, ModuleBootstrap, ModuleHost, NullPublishHooks, PublishHooks};
pub use version::{ConstraintOp, Version, VersionConstraint, VersionError};

// Test module declaration
#[cfg(test)]
mod tests;
