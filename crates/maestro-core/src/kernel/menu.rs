/// A single admin-menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    pub link: String,
}

/// Thin admin-menu state assembled at bootstrap.
///
/// Entries depend on the bootstrap mode and the operator's ACL; the menu is
/// presentation state only and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; duplicate ids are replaced in place
    pub fn add(&mut self, id: &str, title: &str, link: &str) -> &mut Self {
        let entry = MenuEntry {
            id: id.to_string(),
            title: title.to_string(),
            link: link.to_string(),
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
