//! Games - the top-level content unit.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::graph::ContentGraph;
use crate::identifiers::{GameId, LevelIndex, WorldId};
use crate::level::GameLevel;
use crate::world::World;

/// The world graph of a game. An edge `A -> B` means B is unlocked after A.
pub type WorldGraph = ContentGraph<WorldId, World>;

/// A game: descriptive text plus a directed acyclic graph of worlds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub introduction: String,
    pub conclusion: String,
    /// Free-form text shown on the game's info page.
    pub info: String,
    pub authors: Vec<String>,
    pub worlds: WorldGraph,
}

impl Game {
    /// Create a game with no worlds.
    pub fn new(id: impl Into<GameId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            introduction: String::new(),
            conclusion: String::new(),
            info: String::new(),
            authors: Vec::new(),
            worlds: WorldGraph::new(),
        }
    }

    /// Set the game title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the text shown on the start screen.
    pub fn with_introduction(mut self, text: impl Into<String>) -> Self {
        self.introduction = text.into();
        self
    }

    /// Add a world, replacing one with the same identifier.
    pub fn with_world(mut self, world: World) -> Self {
        self.add_world(world);
        self
    }

    /// Declare that `to` is unlocked after `from`.
    pub fn with_unlock(mut self, from: impl Into<WorldId>, to: impl Into<WorldId>) -> Self {
        self.add_unlock(from, to);
        self
    }

    /// Insert a world, replacing any world with the same identifier.
    pub fn add_world(&mut self, world: World) -> Option<World> {
        self.worlds.insert_node(world.id.clone(), world)
    }

    /// Declare that `to` is unlocked after `from`.
    pub fn add_unlock(&mut self, from: impl Into<WorldId>, to: impl Into<WorldId>) -> bool {
        self.worlds.add_edge(from.into(), to.into())
    }

    /// Get a world by identifier.
    pub fn world(&self, id: &WorldId) -> Option<&World> {
        self.worlds.find_node(id)
    }

    /// Get a world by identifier mutably.
    pub fn world_mut(&mut self, id: &WorldId) -> Option<&mut World> {
        self.worlds.find_node_mut(id)
    }

    /// Get level `index` of `world`.
    pub fn level(&self, world: &WorldId, index: LevelIndex) -> Option<&GameLevel> {
        self.world(world).and_then(|w| w.level(index))
    }

    /// Number of levels per world, in world insertion order.
    pub fn world_sizes(&self) -> Vec<(&WorldId, usize)> {
        self.worlds.nodes().map(|(id, world)| (id, world.size())).collect()
    }

    /// Total number of levels over all worlds.
    pub fn level_count(&self) -> usize {
        self.worlds.nodes().map(|(_, world)| world.size()).sum()
    }

    /// Validate the world graph, returning the worlds in play order.
    pub fn validate(&self) -> Result<Vec<WorldId>, ContentError> {
        self.worlds.validate()
    }
}
