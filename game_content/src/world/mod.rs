//! Worlds and their level stores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::identifiers::{LevelIndex, WorldId};
use crate::level::GameLevel;

/// Levels of one world keyed by index.
///
/// Indices may have gaps. Iteration is always by ascending index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelStore {
    levels: BTreeMap<LevelIndex, GameLevel>,
}

impl LevelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a level, replacing whatever was stored at `index`.
    pub fn insert(&mut self, index: LevelIndex, level: GameLevel) -> Option<GameLevel> {
        self.levels.insert(index, level)
    }

    /// Get the level at `index`.
    pub fn get(&self, index: LevelIndex) -> Option<&GameLevel> {
        self.levels.get(&index)
    }

    /// Get the level at `index` mutably.
    pub fn get_mut(&mut self, index: LevelIndex) -> Option<&mut GameLevel> {
        self.levels.get_mut(&index)
    }

    /// Remove and return the level at `index`.
    pub fn remove(&mut self, index: LevelIndex) -> Option<GameLevel> {
        self.levels.remove(&index)
    }

    /// Check whether a level is stored at `index`.
    pub fn contains(&self, index: LevelIndex) -> bool {
        self.levels.contains_key(&index)
    }

    /// Iterate over levels by ascending index.
    pub fn iter(&self) -> impl Iterator<Item = (LevelIndex, &GameLevel)> {
        self.levels.iter().map(|(index, level)| (*index, level))
    }

    /// Iterate mutably over levels by ascending index.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (LevelIndex, &mut GameLevel)> {
        self.levels.iter_mut().map(|(index, level)| (*index, level))
    }

    /// Levels with an index up to and including `index`.
    pub fn up_to(&self, index: LevelIndex) -> impl Iterator<Item = (LevelIndex, &GameLevel)> {
        self.levels.range(..=index).map(|(i, level)| (*i, level))
    }

    /// Number of stored levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check whether no level is stored.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Highest stored index, if any.
    pub fn max_index(&self) -> Option<LevelIndex> {
        self.levels.keys().next_back().copied()
    }

    /// Stored indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = LevelIndex> + '_ {
        self.levels.keys().copied()
    }
}

impl IntoIterator for LevelStore {
    type Item = (LevelIndex, GameLevel);
    type IntoIter = std::collections::btree_map::IntoIter<LevelIndex, GameLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.into_iter()
    }
}

/// A named collection of levels. Worlds are the nodes of a game's graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: WorldId,
    pub title: String,
    pub introduction: String,
    pub conclusion: String,
    pub image: Option<String>,
    pub levels: LevelStore,
}

impl World {
    /// Create an empty world.
    pub fn new(id: impl Into<WorldId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            introduction: String::new(),
            conclusion: String::new(),
            image: None,
            levels: LevelStore::new(),
        }
    }

    /// Set the world title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the text shown when entering the world.
    pub fn with_introduction(mut self, text: impl Into<String>) -> Self {
        self.introduction = text.into();
        self
    }

    /// Set the text shown after the last level.
    pub fn with_conclusion(mut self, text: impl Into<String>) -> Self {
        self.conclusion = text.into();
        self
    }

    /// Add a level at its own index.
    pub fn with_level(mut self, level: GameLevel) -> Self {
        self.add_level(level);
        self
    }

    /// Store a level at its own index, returning the one it replaced.
    pub fn add_level(&mut self, level: GameLevel) -> Option<GameLevel> {
        self.levels.insert(level.index, level)
    }

    /// Get the level at `index`.
    pub fn level(&self, index: LevelIndex) -> Option<&GameLevel> {
        self.levels.get(index)
    }

    /// Number of levels, as shown on the world map.
    pub fn size(&self) -> usize {
        self.levels.len()
    }
}
