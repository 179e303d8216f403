//! Inventory module - the capabilities a player may use in a level.
//!
//! Each level declares, per kind:
//! - **new**: identifiers introduced at this level
//! - **disabled**: identifiers hidden at this level even if already unlocked
//! - **only**: when non-empty, the exclusive allow-list for this level
//!
//! The `computed` list is filled in later by the inventory resolver.

mod docs;

pub use docs::*;

use serde::{Deserialize, Serialize};

use crate::identifiers::{InventoryKind, ItemName};

/// A resolved inventory entry as presented to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTile {
    pub name: ItemName,
    pub display_name: String,
    pub category: String,
    /// Not yet unlocked at this level.
    pub locked: bool,
    /// Unlocked but not usable at this level.
    pub disabled: bool,
    /// First introduced at exactly this level.
    pub new: bool,
}

/// Inventory deltas of one level for one kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventoryInfo {
    #[serde(default)]
    pub new: Vec<ItemName>,
    #[serde(default)]
    pub disabled: Vec<ItemName>,
    #[serde(default)]
    pub only: Vec<ItemName>,
    #[serde(default)]
    pub computed: Vec<InventoryTile>,
}

impl InventoryInfo {
    /// Create empty deltas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items introduced at this level.
    pub fn with_new<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemName>,
    {
        self.new.extend(names.into_iter().map(Into::into));
        self
    }

    /// Items hidden at this level.
    pub fn with_disabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemName>,
    {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    /// Exclusive allow-list for this level.
    pub fn with_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemName>,
    {
        self.only.extend(names.into_iter().map(Into::into));
        self
    }

    /// Every identifier this level mentions, in declaration order.
    pub fn referenced(&self) -> impl Iterator<Item = &ItemName> {
        self.new.iter().chain(&self.disabled).chain(&self.only)
    }
}

/// The three per-kind inventories of a level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelInventory {
    #[serde(default)]
    pub tactics: InventoryInfo,
    #[serde(default)]
    pub definitions: InventoryInfo,
    #[serde(default)]
    pub lemmas: InventoryInfo,
}

impl LevelInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deltas of one kind.
    pub fn get(&self, kind: InventoryKind) -> &InventoryInfo {
        match kind {
            InventoryKind::Tactic => &self.tactics,
            InventoryKind::Definition => &self.definitions,
            InventoryKind::Lemma => &self.lemmas,
        }
    }

    /// Deltas of one kind, mutably.
    pub fn get_mut(&mut self, kind: InventoryKind) -> &mut InventoryInfo {
        match kind {
            InventoryKind::Tactic => &mut self.tactics,
            InventoryKind::Definition => &mut self.definitions,
            InventoryKind::Lemma => &mut self.lemmas,
        }
    }

    /// Replace the inventory of one kind.
    pub fn with(mut self, kind: InventoryKind, info: InventoryInfo) -> Self {
        *self.get_mut(kind) = info;
        self
    }
}
