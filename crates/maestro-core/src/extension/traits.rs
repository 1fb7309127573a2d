use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use async_trait::async_trait;

use crate::extension::error::ExtensionSystemError;

/// Bootstrap entrypoint of a module, executed when the module is started.
///
/// A module may ship without one; presence is optional by design.
pub trait ModuleBootstrap: Send + Sync {
    fn bootstrap(&self) -> Result<(), ExtensionSystemError>;
}

impl<F> ModuleBootstrap for F
where
    F: Fn() -> Result<(), ExtensionSystemError> + Send + Sync,
{
    fn bootstrap(&self) -> Result<(), ExtensionSystemError> {
        self()
    }
}

/// The host runtime modules are registered with.
///
/// A module is a unit of loadable code known to the host; an extension is a
/// module that additionally carries a descriptor and participates in the
/// activation lifecycle. Presence-only (`bundle`) requirements are checked
/// against this trait, not against the extension registry.
pub trait ModuleHost: Send + Sync + Debug {
    /// Register a module with the host. Registering an already-registered
    /// module is a no-op.
    fn register(&mut self, identifier: &str) -> Result<(), ExtensionSystemError>;

    /// Start a registered module, executing its bootstrap entrypoint if it
    /// has one. Starting an already-started module must not run the
    /// entrypoint again.
    fn start(&mut self, identifier: &str) -> Result<(), ExtensionSystemError>;

    /// Whether a module has been started
    fn is_started(&self, identifier: &str) -> bool;
}

/// Default in-process module host.
///
/// Tracks registered and started modules and runs installed bootstrap
/// entrypoints exactly once per module.
#[derive(Default)]
pub struct InProcessHost {
    registered: HashSet<String>,
    started: HashSet<String>,
    entrypoints: HashMap<String, Box<dyn ModuleBootstrap>>,
}

impl InProcessHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a bootstrap entrypoint for a module identifier
    pub fn install_entrypoint(&mut self, identifier: &str, entrypoint: Box<dyn ModuleBootstrap>) {
        self.entrypoints.insert(identifier.to_string(), entrypoint);
    }
}

impl Debug for InProcessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InProcessHost")
            .field("registered", &self.registered)
            .field("started", &self.started)
            .field("entrypoints", &self.entrypoints.keys())
            .finish()
    }
}

impl ModuleHost for InProcessHost {
    fn register(&mut self, identifier: &str) -> Result<(), ExtensionSystemError> {
        self.registered.insert(identifier.to_string());
        Ok(())
    }

    fn start(&mut self, identifier: &str) -> Result<(), ExtensionSystemError> {
        if !self.registered.contains(identifier) {
            return Err(ExtensionSystemError::Host {
                identifier: identifier.to_string(),
                operation: "start".to_string(),
                message: "module is not registered".to_string(),
            });
        }
        if !self.started.insert(identifier.to_string()) {
            return Ok(());
        }
        if let Some(entrypoint) = self.entrypoints.get(identifier) {
            entrypoint.bootstrap()?;
        }
        Ok(())
    }

    fn is_started(&self, identifier: &str) -> bool {
        self.started.contains(identifier)
    }
}

/// Post-activation publish tasks, invoked by the lifecycle manager after an
/// extension enters the active set. Opaque to the core; a failure from
/// either task propagates as activation failure.
#[async_trait]
pub trait PublishHooks: Send + Sync {
    /// Run the schema-migration task for an extension
    async fn migrate_schema(&mut self, identifier: &str) -> Result<(), ExtensionSystemError>;

    /// Run the asset-publication task for an extension
    async fn publish_assets(&mut self, identifier: &str) -> Result<(), ExtensionSystemError>;
}

/// No-op publish hooks for deployments without migration or asset tasks
#[derive(Debug, Default)]
pub struct NullPublishHooks;

#[async_trait]
impl PublishHooks for NullPublishHooks {
    async fn migrate_schema(&mut self, _identifier: &str) -> Result<(), ExtensionSystemError> {
        Ok(())
    }

    async fn publish_assets(&mut self, _identifier: &str) -> Result<(), ExtensionSystemError> {
        Ok(())
    }
}
