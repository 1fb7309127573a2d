#![cfg(test)]

use serde_json::json;

use crate::kernel::acl::Acl;
use crate::kernel::constants::ACL_ACTIONS_KEY;
use crate::kernel::menu::Menu;
use crate::memory::runtime::RuntimeMemory;
use crate::memory::store::MemoryStore;

#[test]
fn test_menu_add_and_lookup() {
    let mut menu = Menu::new();
    menu.add("home", "Home", "maestro")
        .add("users", "Users", "maestro/users");

    assert_eq!(menu.len(), 2);
    assert_eq!(menu.get("home").unwrap().link, "maestro");
    assert!(menu.contains("users"));
    assert!(!menu.contains("settings"));
}

#[test]
fn test_menu_duplicate_id_replaces_in_place() {
    let mut menu = Menu::new();
    menu.add("home", "Home", "maestro");
    menu.add("users", "Users", "maestro/users");
    menu.add("home", "Start", "maestro/start");

    assert_eq!(menu.len(), 2);
    let entry = menu.get("home").unwrap();
    assert_eq!(entry.title, "Start");
    assert_eq!(entry.link, "maestro/start");
    // Replacement keeps the original position
    assert_eq!(menu.iter().next().unwrap().id, "home");
}

#[test]
fn test_acl_attach_reads_granted_actions() {
    let mut memory = RuntimeMemory::new();
    memory
        .put(ACL_ACTIONS_KEY, json!(["manage-users", 42, "manage-platform"]))
        .unwrap();

    let acl = Acl::attach(&memory);
    assert!(acl.can("manage-users"));
    assert!(acl.can("manage-platform"));
    assert!(!acl.can("42"));
}

#[test]
fn test_acl_attach_tolerates_missing_or_wrong_shape() {
    let empty = Acl::attach(&RuntimeMemory::new());
    assert!(!empty.can("manage-users"));

    let mut memory = RuntimeMemory::new();
    memory.put(ACL_ACTIONS_KEY, json!("not-an-array")).unwrap();
    let acl = Acl::attach(&memory);
    assert!(!acl.can("not-an-array"));
}

#[test]
fn test_acl_allow_grants_directly() {
    let mut acl = Acl::new();
    assert!(!acl.can("manage-users"));
    acl.allow("manage-users");
    assert!(acl.can("manage-users"));
}
