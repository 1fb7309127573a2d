use std::path::Path;

use crate::extension::ExtensionManager;
use crate::kernel::acl::Acl;
use crate::kernel::constants::{
    ACTION_MANAGE_PLATFORM, ACTION_MANAGE_USERS, APP_NAME, APP_VERSION, MEMORY_FILE_NAME,
};
use crate::kernel::error::Result;
use crate::kernel::menu::Menu;
use crate::memory::document::Document;
use crate::memory::error::MemorySystemError;
use crate::memory::file::FileMemory;
use crate::memory::runtime::RuntimeMemory;
use crate::memory::store::MemoryStore;

/// Whether the platform is operational or still awaiting installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreMode {
    /// Persistent memory reachable; normal operation
    Operational,
    /// Persistent memory unreachable or empty; running on the volatile
    /// fallback store until installation completes
    Install,
}

/// Process context assembling the memory store, extension manager, and the
/// thin menu/ACL state.
///
/// Explicitly constructed and passed around rather than cached in a
/// process-wide static, so isolated instances (tests, embedded use) never
/// observe each other's state.
pub struct Core {
    memory: Box<dyn MemoryStore>,
    extensions: ExtensionManager,
    mode: CoreMode,
    menu: Menu,
    acl: Acl,
}

impl Core {
    /// Bootstrap from a base directory.
    ///
    /// Attempts to open the persistent store file; when it is missing or
    /// empty the core falls back to a runtime store in installation mode
    /// instead of failing. A present-but-corrupt store file is a hard
    /// error.
    pub fn start(base_dir: &Path) -> Result<Self> {
        log::info!("starting {} v{}", APP_NAME, APP_VERSION);

        match FileMemory::open(base_dir.join(MEMORY_FILE_NAME)) {
            Ok(store) => Ok(Self::with_store(Box::new(store), CoreMode::Operational)),
            Err(MemorySystemError::Unavailable { path, reason }) => {
                log::warn!(
                    "persistent memory unavailable at '{}' ({}), entering install mode",
                    path.display(),
                    reason
                );
                Ok(Self::with_store(
                    Box::new(RuntimeMemory::new()),
                    CoreMode::Install,
                ))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Seed a fresh persistent store and bootstrap on top of it. This is
    /// the installation path; an existing store file is overwritten.
    pub fn install(base_dir: &Path, seed: Document) -> Result<Self> {
        let store = FileMemory::create(base_dir.join(MEMORY_FILE_NAME), seed)?;
        Ok(Self::with_store(Box::new(store), CoreMode::Operational))
    }

    /// Assemble a core on an explicit store. Used by `start`/`install` and
    /// directly by tests with fixture stores.
    pub fn with_store(memory: Box<dyn MemoryStore>, mode: CoreMode) -> Self {
        let mut menu = Menu::new();
        let acl = match mode {
            CoreMode::Operational => {
                let acl = Acl::attach(&*memory);
                menu.add("home", "Home", "maestro");
                if acl.can(ACTION_MANAGE_USERS) {
                    menu.add("users", "Users", "maestro/users");
                }
                if acl.can(ACTION_MANAGE_PLATFORM) {
                    menu.add("extensions", "Extensions", "maestro/extensions");
                    menu.add("settings", "Settings", "maestro/settings");
                }
                acl
            }
            CoreMode::Install => {
                menu.add("install", "Install", "maestro/installer");
                Acl::new()
            }
        };

        Self {
            memory,
            extensions: ExtensionManager::default(),
            mode,
            menu,
            acl,
        }
    }

    /// Replace the default extension manager (custom host or publish hooks)
    pub fn set_extension_manager(&mut self, extensions: ExtensionManager) {
        self.extensions = extensions;
    }

    /// Current bootstrap mode
    pub fn mode(&self) -> CoreMode {
        self.mode
    }

    /// The memory store
    pub fn memory(&self) -> &dyn MemoryStore {
        &*self.memory
    }

    /// The memory store, mutably
    pub fn memory_mut(&mut self) -> &mut dyn MemoryStore {
        &mut *self.memory
    }

    /// The extension manager
    pub fn extensions(&self) -> &ExtensionManager {
        &self.extensions
    }

    /// The extension manager together with the store it operates on.
    /// Lifecycle calls need both halves mutably.
    pub fn extensions_mut(&mut self) -> (&mut ExtensionManager, &mut dyn MemoryStore) {
        (&mut self.extensions, &mut *self.memory)
    }

    /// The assembled admin menu
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// The attached ACL
    pub fn acl(&self) -> &Acl {
        &self.acl
    }
}

impl std::fmt::Debug for Core {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Core")
            .field("mode", &self.mode)
            .field("memory", &self.memory.name())
            .field("extensions", &self.extensions)
            .finish()
    }
}
