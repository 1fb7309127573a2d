use std::collections::BTreeMap;
use std::fmt::Debug;

use serde_json::Value;

use crate::extension::dependency::UnresolvedDependency;
use crate::extension::error::ExtensionSystemError;
use crate::extension::manifest::ConfigMap;
use crate::extension::registry::{ActiveSet, ExtensionRegistry};
use crate::extension::resolver::{DependencyResolver, ResolveMode};
use crate::extension::traits::{InProcessHost, ModuleHost, NullPublishHooks, PublishHooks};
use crate::kernel::error::Result;
use crate::memory::store::MemoryStore;

/// Orchestrates extension lifecycle transitions.
///
/// Per identifier the states are: unregistered → registered (descriptor in
/// the registry) → started (module bootstrap executed, entry in the
/// in-process started table) → active (entry in the persisted active set) →
/// inactive (removed from the active set; remains started and registered).
///
/// The manager holds no registry or active-set state of its own: both are
/// loaded from the memory store passed to each call, so isolated contexts
/// (tests, parallel deployments) never share hidden globals. Dependency
/// failures are expected business outcomes surfaced as
/// [`ExtensionSystemError::DependencyUnresolved`] only at this boundary;
/// persistence failures propagate unmodified.
pub struct ExtensionManager {
    /// In-process started table: identifier → merged runtime config
    started: BTreeMap<String, ConfigMap>,
    host: Box<dyn ModuleHost>,
    hooks: Box<dyn PublishHooks>,
}

impl Debug for ExtensionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionManager")
            .field("started", &self.started.keys())
            .field("host", &self.host)
            .finish()
    }
}

impl Default for ExtensionManager {
    fn default() -> Self {
        Self::new(Box::new(InProcessHost::new()), Box::new(NullPublishHooks))
    }
}

impl ExtensionManager {
    /// Create a manager with the given module host and publish hooks
    pub fn new(host: Box<dyn ModuleHost>, hooks: Box<dyn PublishHooks>) -> Self {
        Self {
            started: BTreeMap::new(),
            host,
            hooks,
        }
    }

    /// Borrow the module host
    pub fn host(&self) -> &dyn ModuleHost {
        &*self.host
    }

    /// Mutably borrow the module host (e.g. to install bootstrap
    /// entrypoints or pre-start raw modules)
    pub fn host_mut(&mut self) -> &mut dyn ModuleHost {
        &mut *self.host
    }

    /// Start an extension: register its module with the host, execute the
    /// bootstrap entrypoint if present, and record the merged config
    /// (explicit overrides win over descriptor defaults) in the started
    /// table. Idempotent; a second call is a no-op. Never touches the
    /// persisted active set.
    pub fn start(
        &mut self,
        identifier: &str,
        registry: &ExtensionRegistry,
        overrides: ConfigMap,
    ) -> std::result::Result<(), ExtensionSystemError> {
        if self.started.contains_key(identifier) {
            return Ok(());
        }

        self.host.register(identifier)?;
        self.host.start(identifier)?;

        let mut config = registry
            .get(identifier)
            .map(|descriptor| descriptor.config.clone())
            .unwrap_or_default();
        config.extend(overrides);

        log::debug!("started extension '{}'", identifier);
        self.started.insert(identifier.to_string(), config);
        Ok(())
    }

    /// Whether an extension has been started in this process
    pub fn started(&self, identifier: &str) -> bool {
        self.started.contains_key(identifier)
    }

    /// All started extensions and their merged configs
    pub fn all(&self) -> impl Iterator<Item = (&String, &ConfigMap)> {
        self.started.iter()
    }

    /// Read an option for a started extension, falling back to the default
    /// when the extension is not started or the key is absent.
    pub fn option(&self, identifier: &str, key: &str, default: Value) -> Value {
        self.started
            .get(identifier)
            .and_then(|config| config.get(key).cloned())
            .unwrap_or(default)
    }

    /// Whether an extension is in the persisted active set
    pub fn activated(&self, identifier: &str, memory: &dyn MemoryStore) -> bool {
        ActiveSet::load(memory).contains(identifier)
    }

    /// Compute the unresolved requirements of an extension against the
    /// persisted registry. Diagnostics helper; an empty list means fully
    /// resolved.
    pub fn unresolved(
        &self,
        identifier: &str,
        mode: ResolveMode,
        memory: &dyn MemoryStore,
    ) -> Result<Vec<UnresolvedDependency>> {
        let registry = ExtensionRegistry::load(memory)?;
        let resolver = DependencyResolver::new(&registry, &self.started, &*self.host);
        Ok(resolver.unresolved(identifier, mode))
    }

    /// Activate an extension.
    ///
    /// Requires the identifier to be registered. Runs the conservative
    /// activatable check first; any unresolved requirement fails the call
    /// with the structured list and leaves the active set untouched.
    /// Otherwise the descriptor config enters the active set, the extension
    /// is started, the publish hooks run, and the active set is persisted.
    pub async fn activate(
        &mut self,
        identifier: &str,
        memory: &mut dyn MemoryStore,
    ) -> Result<()> {
        let registry = ExtensionRegistry::load(memory)?;
        let mut active = ActiveSet::load(memory);
        active.verify_against(&registry)?;

        let descriptor = registry
            .get(identifier)
            .ok_or_else(|| ExtensionSystemError::UnknownExtension(identifier.to_string()))?;

        let resolver = DependencyResolver::new(&registry, &self.started, &*self.host);
        let unresolved = resolver.not_activatable(identifier);
        if !unresolved.is_empty() {
            return Err(ExtensionSystemError::DependencyUnresolved {
                identifier: identifier.to_string(),
                unresolved,
            }
            .into());
        }

        let config = descriptor.config.clone();
        active.insert(identifier, config.clone());

        self.start(identifier, &registry, config)?;
        self.publish(identifier).await?;

        active.persist(memory)?;
        log::info!("activated extension '{}'", identifier);
        Ok(())
    }

    /// Deactivate an extension.
    ///
    /// Blocked when any other active extension declares a requirement on
    /// the target's declared name; the failure carries the dependent names.
    /// Otherwise the entry leaves the active set and the set is persisted.
    /// The started table is untouched: an inactive extension remains
    /// started and registered.
    pub async fn deactivate(
        &mut self,
        identifier: &str,
        memory: &mut dyn MemoryStore,
    ) -> Result<()> {
        let registry = ExtensionRegistry::load(memory)?;
        let mut active = ActiveSet::load(memory);
        active.verify_against(&registry)?;

        if !registry.contains(identifier) {
            return Err(ExtensionSystemError::UnknownExtension(identifier.to_string()).into());
        }

        let resolver = DependencyResolver::new(&registry, &self.started, &*self.host);
        let dependents = resolver.blocking_dependents(identifier, &active)?;
        if !dependents.is_empty() {
            return Err(ExtensionSystemError::DependencyUnresolved {
                identifier: identifier.to_string(),
                unresolved: dependents
                    .into_iter()
                    .map(UnresolvedDependency::dependent)
                    .collect(),
            }
            .into());
        }

        active.remove(identifier);
        active.persist(memory)?;
        log::info!("deactivated extension '{}'", identifier);
        Ok(())
    }

    /// Run the post-activation publish tasks (schema migration, then asset
    /// publication) for an extension. A failure from either propagates.
    pub async fn publish(
        &mut self,
        identifier: &str,
    ) -> std::result::Result<(), ExtensionSystemError> {
        self.hooks.migrate_schema(identifier).await?;
        self.hooks.publish_assets(identifier).await?;
        Ok(())
    }
}
