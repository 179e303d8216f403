//! Documentation entries for inventory items.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ContentError;
use crate::identifiers::{InventoryKey, InventoryKind, ItemName};

/// Documentation for one capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: ItemName,
    pub kind: InventoryKind,
    pub display_name: String,
    pub category: String,
    /// Markdown description shown in the inventory panel.
    pub content: String,
}

impl InventoryItem {
    /// Create a documentation entry whose display name is the identifier itself.
    pub fn new(name: impl Into<ItemName>, kind: InventoryKind) -> Self {
        let name = name.into();
        Self {
            display_name: name.0.clone(),
            name,
            kind,
            category: String::new(),
            content: String::new(),
        }
    }

    /// Set the name shown on the inventory tile.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the category the tile is grouped under.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the documentation text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Key under which the item is documented.
    pub fn key(&self) -> InventoryKey {
        InventoryKey::new(self.name.clone(), self.kind)
    }
}

/// Append-only registry of inventory documentation shared by all levels.
///
/// Levels refer to entries by name only; an entry may be documented after the
/// levels that mention it, or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryDocs {
    entries: HashMap<InventoryKey, InventoryItem>,
}

impl InventoryDocs {
    /// Create empty documentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register documentation. Fails if `(name, kind)` is already documented.
    pub fn register(&mut self, item: InventoryItem) -> Result<(), ContentError> {
        let key = item.key();
        if self.entries.contains_key(&key) {
            return Err(ContentError::AlreadyDocumented {
                name: key.name.0,
                kind: key.kind,
            });
        }
        self.entries.insert(key, item);
        Ok(())
    }

    /// Look up the documentation of an item.
    pub fn get(&self, name: &ItemName, kind: InventoryKind) -> Option<&InventoryItem> {
        self.entries.get(&InventoryKey::new(name.clone(), kind))
    }

    /// Check whether an item is documented.
    pub fn contains(&self, name: &ItemName, kind: InventoryKind) -> bool {
        self.get(name, kind).is_some()
    }

    /// Add every entry of `other` not documented here yet.
    ///
    /// Existing entries are kept, since documentation never changes once
    /// registered.
    pub fn absorb(&mut self, other: InventoryDocs) {
        for (key, item) in other.entries {
            self.entries.entry(key).or_insert(item);
        }
    }

    /// Number of documented items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries of one kind, sorted by name.
    pub fn of_kind(&self, kind: InventoryKind) -> Vec<&InventoryItem> {
        let mut items: Vec<_> = self.entries.values().filter(|i| i.kind == kind).collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }
}
