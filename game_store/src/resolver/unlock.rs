//! Unlock state accumulated while folding over a level sequence.

use game_content::{ItemName, LevelRef};
use std::collections::HashMap;

/// Items unlocked so far, each tagged with the level that introduced it.
#[derive(Debug, Clone, Default)]
pub struct UnlockState {
    /// Items in the order they were first unlocked.
    order: Vec<ItemName>,
    introduced_at: HashMap<ItemName, LevelRef>,
}

impl UnlockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock an item. Returns `false` if it was already unlocked, in which
    /// case the original introduction is kept.
    pub fn unlock(&mut self, name: &ItemName, at: &LevelRef) -> bool {
        if self.introduced_at.contains_key(name) {
            return false;
        }
        self.introduced_at.insert(name.clone(), at.clone());
        self.order.push(name.clone());
        true
    }

    pub fn is_unlocked(&self, name: &ItemName) -> bool {
        self.introduced_at.contains_key(name)
    }

    /// Level where the item was first introduced.
    pub fn introduced_at(&self, name: &ItemName) -> Option<&LevelRef> {
        self.introduced_at.get(name)
    }

    /// Unlocked items with their introducing level, in unlock order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, &LevelRef)> {
        self.order
            .iter()
            .filter_map(|name| self.introduced_at.get(name).map(|at| (name, at)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
