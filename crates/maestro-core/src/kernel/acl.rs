use std::collections::HashSet;

use serde_json::Value;

use crate::kernel::constants::ACL_ACTIONS_KEY;
use crate::memory::store::MemoryStore;

/// Thin ACL state: the set of actions granted to the current operator.
///
/// Attached from the memory store at bootstrap (`acl.actions`, a JSON array
/// of action names). No roles or per-user resolution here; that belongs to
/// the surrounding platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acl {
    actions: HashSet<String>,
}

impl Acl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load granted actions from the memory store
    pub fn attach(memory: &dyn MemoryStore) -> Self {
        let mut actions = HashSet::new();
        if let Some(Value::Array(granted)) = memory.get(ACL_ACTIONS_KEY) {
            for action in granted {
                if let Value::String(action) = action {
                    actions.insert(action);
                }
            }
        }
        Self { actions }
    }

    /// Grant an action directly
    pub fn allow(&mut self, action: &str) {
        self.actions.insert(action.to_string());
    }

    /// Whether the operator can perform an action
    pub fn can(&self, action: &str) -> bool {
        self.actions.contains(action)
    }
}
