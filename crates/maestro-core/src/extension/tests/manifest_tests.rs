#![cfg(test)]

use serde_json::json;

use crate::extension::manifest::{ExtensionDescriptor, RawManifest, DEFAULT_VERSION};

#[test]
fn test_manifest_full_fields() {
    let raw: RawManifest = serde_json::from_str(
        r#"{
            "name": "Blog",
            "version": "1.2",
            "config": {"per_page": 10},
            "require": {"forum": ">=1.0", "markdown": "bundle"}
        }"#,
    )
    .unwrap();

    let descriptor = raw.into_descriptor().unwrap();
    assert_eq!(descriptor.name, "Blog");
    assert_eq!(descriptor.version, "1.2");
    assert_eq!(descriptor.config.get("per_page"), Some(&json!(10)));
    assert_eq!(descriptor.require.get("forum"), Some(&">=1.0".to_string()));
    assert_eq!(descriptor.require.get("markdown"), Some(&"bundle".to_string()));
}

#[test]
fn test_manifest_missing_fields_use_defaults() {
    let raw: RawManifest = serde_json::from_str(r#"{"name": "Blog"}"#).unwrap();
    let descriptor = raw.into_descriptor().unwrap();
    assert_eq!(descriptor.version, DEFAULT_VERSION);
    assert!(descriptor.config.is_empty());
    assert!(descriptor.require.is_empty());
}

#[test]
fn test_manifest_unknown_fields_ignored() {
    let raw: RawManifest = serde_json::from_str(
        r#"{"name": "Blog", "author": "somebody", "homepage": "https://example.org"}"#,
    )
    .unwrap();
    assert!(raw.into_descriptor().is_some());
}

#[test]
fn test_manifest_without_name_yields_no_descriptor() {
    let raw: RawManifest = serde_json::from_str(r#"{"version": "1.0"}"#).unwrap();
    assert!(raw.into_descriptor().is_none());
}

#[test]
fn test_descriptor_builder_helpers() {
    let descriptor = ExtensionDescriptor::new("Blog", "1.0")
        .with_config("per_page", json!(25))
        .with_require("Forum", ">=1.0");

    assert_eq!(descriptor.config.get("per_page"), Some(&json!(25)));
    assert_eq!(descriptor.require.get("Forum"), Some(&">=1.0".to_string()));
}

#[test]
fn test_descriptor_serde_round_trip() {
    let descriptor = ExtensionDescriptor::new("Blog", "1.0").with_require("forum", ">=1.0");
    let value = serde_json::to_value(&descriptor).unwrap();
    let restored: ExtensionDescriptor = serde_json::from_value(value).unwrap();
    assert_eq!(restored, descriptor);
}
