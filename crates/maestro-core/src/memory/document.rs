use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// In-memory representation of the key-path document backing a memory store.
///
/// Keys are addressed by dot-separated paths (e.g. `extensions.active`,
/// `email.transports.smtp.host`); each segment descends one level into a
/// nested JSON object. Intermediate objects are created on `put`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    values: Map<String, Value>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    /// Create a document from an existing JSON object map
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Whether the document holds no values at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at a dot-separated path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;

        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }

        Some(current)
    }

    /// Set the value at a dot-separated path, creating intermediate objects
    /// as needed. A non-object value sitting on an intermediate segment is
    /// replaced by an object.
    pub fn put(&mut self, path: &str, value: Value) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let leaf = match segments.pop() {
            Some(leaf) => leaf,
            None => return,
        };

        let mut current = &mut self.values;
        for segment in segments {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            // Safe: ensured object above
            current = entry.as_object_mut().unwrap();
        }

        current.insert(leaf.to_string(), value);
    }

    /// Remove the value at a dot-separated path, returning it if present
    pub fn forget(&mut self, path: &str) -> Option<Value> {
        let mut segments: Vec<&str> = path.split('.').collect();
        let leaf = segments.pop()?;

        let mut current = &mut self.values;
        for segment in segments {
            current = current.get_mut(segment)?.as_object_mut()?;
        }

        current.remove(leaf)
    }
}
