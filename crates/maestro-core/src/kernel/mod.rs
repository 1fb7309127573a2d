//! # Maestro Core Kernel
//!
//! Process-wide bootstrap and shared plumbing for the extension core.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Bootstrap**: [`Core`](bootstrap::Core) determines install-vs-
//!   operational mode from the reachability of the persistent memory store
//!   and assembles the thin menu/ACL state.
//! - **Error Handling**: the aggregated [`Error`](error::Error) type and
//!   crate-wide `Result` alias in the `error` submodule.
//! - **Constants**: reserved memory key paths and file names in the
//!   `constants` submodule.
pub mod acl;
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod menu;

pub use acl::Acl;
pub use bootstrap::{Core, CoreMode};
pub use error::{Error, Result};
pub use menu::{Menu, MenuEntry};

// Test module declaration
#[cfg(test)]
mod tests;
