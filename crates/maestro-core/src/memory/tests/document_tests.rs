#![cfg(test)]

use serde_json::{json, Value};

use crate::memory::document::Document;
use crate::memory::runtime::RuntimeMemory;
use crate::memory::store::MemoryStore;

#[test]
fn test_document_put_and_get_flat_key() {
    let mut doc = Document::new();
    doc.put("site", json!("Example"));
    assert_eq!(doc.get("site"), Some(&json!("Example")));
}

#[test]
fn test_document_dot_path_creates_intermediate_objects() {
    let mut doc = Document::new();
    doc.put("email.transports.smtp.host", json!("mail.example.org"));

    assert_eq!(
        doc.get("email.transports.smtp.host"),
        Some(&json!("mail.example.org"))
    );
    // Intermediate levels are addressable objects
    assert!(doc.get("email.transports.smtp").unwrap().is_object());
    assert!(doc.get("email").unwrap().is_object());
}

#[test]
fn test_document_put_replaces_scalar_intermediate() {
    let mut doc = Document::new();
    doc.put("site", json!("scalar"));
    doc.put("site.name", json!("Example"));
    assert_eq!(doc.get("site.name"), Some(&json!("Example")));
}

#[test]
fn test_document_get_missing_path() {
    let doc = Document::new();
    assert_eq!(doc.get("does.not.exist"), None);
}

#[test]
fn test_document_forget() {
    let mut doc = Document::new();
    doc.put("site.name", json!("Example"));
    assert_eq!(doc.forget("site.name"), Some(json!("Example")));
    assert_eq!(doc.get("site.name"), None);
    assert_eq!(doc.forget("site.name"), None);
}

#[test]
fn test_document_serde_round_trip() {
    let mut doc = Document::new();
    doc.put("extensions.active", json!({"blog": {}}));
    doc.put("site.name", json!("Example"));

    let raw = serde_json::to_string(&doc).unwrap();
    let restored: Document = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, doc);
}

#[test]
fn test_runtime_store_get_or_default() {
    let mut memory = RuntimeMemory::new();
    assert_eq!(memory.get_or("site.name", json!("fallback")), json!("fallback"));

    memory.put("site.name", json!("Example")).unwrap();
    assert_eq!(memory.get_or("site.name", json!("fallback")), json!("Example"));
}

#[test]
fn test_runtime_store_forget() {
    let mut memory = RuntimeMemory::new();
    memory.put("a.b", json!(1)).unwrap();
    assert_eq!(memory.forget("a.b").unwrap(), Some(Value::from(1)));
    assert_eq!(memory.get("a.b"), None);
}
