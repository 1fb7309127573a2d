#![cfg(test)]

use std::path::Path;

use serde_json::json;
use tempfile::tempdir;

use crate::extension::error::ExtensionSystemError;
use crate::extension::loader::{detect, discover_locations, ModuleLocation};
use crate::extension::manifest::DEFAULT_VERSION;
use crate::extension::registry::ExtensionRegistry;
use crate::kernel::constants::MANIFEST_FILE_NAME;
use crate::kernel::error::Error;
use crate::memory::runtime::RuntimeMemory;

fn write_manifest(dir: &Path, identifier: &str, manifest: &serde_json::Value) {
    let module_dir = dir.join(identifier);
    std::fs::create_dir_all(&module_dir).unwrap();
    std::fs::write(
        module_dir.join(MANIFEST_FILE_NAME),
        serde_json::to_string_pretty(manifest).unwrap(),
    )
    .unwrap();
}

#[tokio::test]
async fn test_discover_locations_finds_subdirectories_only() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("blog")).unwrap();
    std::fs::create_dir(dir.path().join("forum")).unwrap();
    std::fs::write(dir.path().join("README.md"), "not a module").unwrap();

    let locations = discover_locations(dir.path()).await.unwrap();
    let identifiers: Vec<&str> = locations.iter().map(|l| l.identifier.as_str()).collect();
    assert_eq!(identifiers, vec!["blog", "forum"]);
}

#[tokio::test]
async fn test_detect_caches_manifests() {
    let dir = tempdir().unwrap();
    write_manifest(
        dir.path(),
        "blog",
        &json!({
            "name": "Blog",
            "version": "1.2",
            "config": {"per_page": 10},
            "require": {"Forum": ">=2.0"}
        }),
    );
    write_manifest(dir.path(), "forum", &json!({"name": "Forum"}));

    let locations = discover_locations(dir.path()).await.unwrap();
    let mut memory = RuntimeMemory::new();
    let registry = detect(&locations, &mut memory).await.unwrap();

    let blog = registry.get("blog").unwrap();
    assert_eq!(blog.name, "Blog");
    assert_eq!(blog.version, "1.2");
    assert_eq!(blog.config.get("per_page"), Some(&json!(10)));
    assert_eq!(blog.require.get("Forum").map(String::as_str), Some(">=2.0"));

    // Omitted fields fall back to their defaults
    let forum = registry.get("forum").unwrap();
    assert_eq!(forum.version, DEFAULT_VERSION);
    assert!(forum.config.is_empty());
    assert!(forum.require.is_empty());

    // The detection pass writes through to the store
    let reloaded = ExtensionRegistry::load(&memory).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.contains("blog"));
}

#[tokio::test]
async fn test_detect_skips_location_without_manifest() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "blog", &json!({"name": "Blog"}));
    std::fs::create_dir(dir.path().join("empty")).unwrap();

    let locations = discover_locations(dir.path()).await.unwrap();
    let mut memory = RuntimeMemory::new();
    let registry = detect(&locations, &mut memory).await.unwrap();

    assert_eq!(registry.len(), 1);
    assert!(!registry.contains("empty"));
}

#[tokio::test]
async fn test_detect_aborts_on_corrupt_manifest() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "blog", &json!({"name": "Blog"}));
    let corrupt_dir = dir.path().join("corrupt");
    std::fs::create_dir(&corrupt_dir).unwrap();
    std::fs::write(corrupt_dir.join(MANIFEST_FILE_NAME), "{not json").unwrap();

    let locations = discover_locations(dir.path()).await.unwrap();
    let mut memory = RuntimeMemory::new();
    let error = detect(&locations, &mut memory).await.unwrap_err();

    assert!(matches!(
        error,
        Error::Extension(ExtensionSystemError::ManifestParse { .. })
    ));
}

#[tokio::test]
async fn test_detect_excludes_nameless_manifest() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "anon", &json!({"version": "1.0"}));

    let locations = discover_locations(dir.path()).await.unwrap();
    let mut memory = RuntimeMemory::new();
    let registry = detect(&locations, &mut memory).await.unwrap();

    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_detect_replaces_previous_cache() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "blog", &json!({"name": "Blog"}));

    let mut memory = RuntimeMemory::new();
    let mut stale = ExtensionRegistry::new();
    stale.insert(
        "gone",
        crate::extension::manifest::ExtensionDescriptor::new("Gone", "1.0"),
    );
    stale.persist(&mut memory).unwrap();

    let locations = discover_locations(dir.path()).await.unwrap();
    let registry = detect(&locations, &mut memory).await.unwrap();

    assert!(registry.contains("blog"));
    let reloaded = ExtensionRegistry::load(&memory).unwrap();
    assert!(!reloaded.contains("gone"));
}

#[tokio::test]
async fn test_detect_with_explicit_location_list() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "blog", &json!({"name": "Blog"}));

    let locations = vec![ModuleLocation::new("blog", dir.path().join("blog"))];
    let mut memory = RuntimeMemory::new();
    let registry = detect(&locations, &mut memory).await.unwrap();

    assert!(registry.contains("blog"));
}
