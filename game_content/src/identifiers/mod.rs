//! Stable names for games, worlds, levels and inventory items.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a level within its world, starting at 0.
pub type LevelIndex = usize;

/// Unique identifier for a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Create a game identifier from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a world within a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(pub String);

impl WorldId {
    /// Create a world identifier from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorldId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a capability (tactic, lemma or definition).
///
/// On its own a name is ambiguous: `rfl` may be both a tactic and a lemma.
/// Use [`InventoryKey`] when the kind matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(pub String);

impl ItemName {
    /// Create a item identifier from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kinds of capabilities a level can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryKind {
    Tactic,
    Lemma,
    Definition,
}

impl InventoryKind {
    /// All kinds, in the order levels present them.
    pub const ALL: [InventoryKind; 3] = [
        InventoryKind::Tactic,
        InventoryKind::Definition,
        InventoryKind::Lemma,
    ];

    /// Get the lowercase name used in serialized content.
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryKind::Tactic => "tactic",
            InventoryKind::Lemma => "lemma",
            InventoryKind::Definition => "definition",
        }
    }
}

impl fmt::Display for InventoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map key for inventory documentation: a name together with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InventoryKey {
    pub name: ItemName,
    pub kind: InventoryKind,
}

impl InventoryKey {
    /// Create a key from a name and kind.
    pub fn new(name: impl Into<ItemName>, kind: InventoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for InventoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// Address of a level inside one game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelRef {
    pub world: WorldId,
    pub index: LevelIndex,
}

impl LevelRef {
    /// Create a reference to level `index` of `world`.
    pub fn new(world: impl Into<WorldId>, index: LevelIndex) -> Self {
        Self {
            world: world.into(),
            index,
        }
    }
}

impl fmt::Display for LevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.world, self.index)
    }
}
