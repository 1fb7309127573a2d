use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::extension::error::ExtensionSystemError;
use crate::extension::manifest::RawManifest;
use crate::extension::registry::ExtensionRegistry;
use crate::kernel::constants::MANIFEST_FILE_NAME;
use crate::kernel::error::Result;
use crate::memory::store::MemoryStore;

/// A named module location subject to manifest detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLocation {
    /// Registry/storage key for the location
    pub identifier: String,
    /// Directory expected to contain the manifest file
    pub path: PathBuf,
}

impl ModuleLocation {
    pub fn new(identifier: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
        }
    }

    fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE_NAME)
    }
}

/// Enumerate module locations under a modules directory: every
/// subdirectory becomes a location named after the directory.
pub async fn discover_locations(dir: &Path) -> Result<Vec<ModuleLocation>> {
    let mut locations = Vec::new();
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|source| ExtensionSystemError::ManifestIo {
            path: dir.to_path_buf(),
            source,
        })?;

    while let Some(entry) =
        entries
            .next_entry()
            .await
            .map_err(|source| ExtensionSystemError::ManifestIo {
                path: dir.to_path_buf(),
                source,
            })?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|source| ExtensionSystemError::ManifestIo {
                path: entry.path(),
                source,
            })?;
        if !file_type.is_dir() {
            continue;
        }
        let identifier = entry.file_name().to_string_lossy().into_owned();
        locations.push(ModuleLocation::new(identifier, entry.path()));
    }

    // Directory iteration order is platform-dependent
    locations.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(locations)
}

/// Detect extensions across the given module locations.
///
/// A location without a manifest file is silently excluded; a manifest that
/// exists but fails to parse aborts the whole pass. Manifests that declare
/// no name are logged and excluded from the registry. The resulting
/// available set is persisted wholesale to the memory store, replacing any
/// previous cache.
pub async fn detect(
    locations: &[ModuleLocation],
    memory: &mut dyn MemoryStore,
) -> Result<ExtensionRegistry> {
    let mut registry = ExtensionRegistry::new();

    for location in locations {
        let manifest_path = location.manifest_path();
        let raw = match fs::read_to_string(&manifest_path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => continue,
            Err(source) => {
                return Err(ExtensionSystemError::ManifestIo {
                    path: manifest_path,
                    source,
                }
                .into())
            }
        };

        let manifest: RawManifest =
            serde_json::from_str(&raw).map_err(|source| ExtensionSystemError::ManifestParse {
                identifier: location.identifier.clone(),
                path: manifest_path.clone(),
                source,
            })?;

        match manifest.into_descriptor() {
            Some(descriptor) => {
                log::debug!(
                    "detected extension '{}' ({} v{})",
                    location.identifier,
                    descriptor.name,
                    descriptor.version
                );
                registry.insert(&location.identifier, descriptor);
            }
            None => {
                log::warn!(
                    "manifest at '{}' declares no name, excluding '{}'",
                    manifest_path.display(),
                    location.identifier
                );
            }
        }
    }

    registry.persist(memory)?;
    log::info!("detection pass cached {} extension(s)", registry.len());
    Ok(registry)
}
