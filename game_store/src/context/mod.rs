//! Authoring context - where newly built content attaches.
//!
//! The cursor is a strict three-layer stack:
//! 1. **Game**: the game being authored
//! 2. **World**: a world of that game
//! 3. **Level**: a level index within that world
//!
//! A deeper layer is only meaningful when every layer above it is set.

mod build;

pub use build::*;

use game_content::{GameId, LevelIndex, WorldId};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A layer of the authoring context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    Game,
    World,
    Level,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Layer::Game => "game",
            Layer::World => "world",
            Layer::Level => "level",
        };
        f.write_str(name)
    }
}

/// The current game, world and level index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentContext {
    game: Option<GameId>,
    world: Option<WorldId>,
    level: Option<LevelIndex>,
}

impl CurrentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_game(&mut self, id: impl Into<GameId>) {
        self.game = Some(id.into());
    }

    pub fn set_world(&mut self, id: impl Into<WorldId>) {
        self.world = Some(id.into());
    }

    pub fn set_level(&mut self, index: LevelIndex) {
        self.level = Some(index);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn game_id(&self) -> Result<&GameId, StoreError> {
        self.game.as_ref().ok_or(StoreError::ContextNotSet(Layer::Game))
    }

    /// The current world. Fails if the game is not set either.
    pub fn world_id(&self) -> Result<&WorldId, StoreError> {
        self.game_id()?;
        self.world.as_ref().ok_or(StoreError::ContextNotSet(Layer::World))
    }

    /// The current level index. Fails if the world or game is not set either.
    pub fn level_index(&self) -> Result<LevelIndex, StoreError> {
        self.world_id()?;
        self.level.ok_or(StoreError::ContextNotSet(Layer::Level))
    }

    /// The deepest layer that is set together with all layers above it.
    pub fn layer(&self) -> Result<Layer, StoreError> {
        match (self.game.is_some(), self.world.is_some(), self.level.is_some()) {
            (true, true, true) => Ok(Layer::Level),
            (true, true, false) => Ok(Layer::World),
            (true, false, false) => Ok(Layer::Game),
            (game, world, level) => Err(StoreError::InvalidLayer { game, world, level }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getters_require_ancestors() {
        let mut cursor = CurrentContext::new();
        assert!(matches!(cursor.game_id(), Err(StoreError::ContextNotSet(Layer::Game))));

        // A level without a game still reports the missing game.
        cursor.set_level(3);
        assert!(matches!(cursor.level_index(), Err(StoreError::ContextNotSet(Layer::Game))));

        cursor.set_game("TestGame");
        assert!(matches!(cursor.level_index(), Err(StoreError::ContextNotSet(Layer::World))));

        cursor.set_world("Proposition");
        assert_eq!(cursor.level_index().unwrap(), 3);
        assert_eq!(cursor.world_id().unwrap().as_str(), "Proposition");
    }

    #[test]
    fn test_layer() {
        let mut cursor = CurrentContext::new();
        cursor.set_game("TestGame");
        assert_eq!(cursor.layer().unwrap(), Layer::Game);

        cursor.set_world("Proposition");
        assert_eq!(cursor.layer().unwrap(), Layer::World);

        cursor.set_level(11);
        assert_eq!(cursor.layer().unwrap(), Layer::Level);
    }

    #[test]
    fn test_inconsistent_layers_are_invalid() {
        let cursor = CurrentContext::new();
        assert!(matches!(
            cursor.layer(),
            Err(StoreError::InvalidLayer { game: false, world: false, level: false })
        ));

        let mut cursor = CurrentContext::new();
        cursor.set_game("TestGame");
        cursor.set_level(1);
        assert!(matches!(
            cursor.layer(),
            Err(StoreError::InvalidLayer { game: true, world: false, level: true })
        ));
    }

    #[test]
    fn test_clear() {
        let mut cursor = CurrentContext::new();
        cursor.set_game("TestGame");
        cursor.clear();
        assert_eq!(cursor, CurrentContext::new());
    }
}
