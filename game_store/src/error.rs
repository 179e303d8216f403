//! Errors raised while building and querying games.

use game_content::{ContentError, GameId, InventoryKind, ItemName, LevelIndex, LevelRef, WorldId};
use thiserror::Error;

use crate::context::Layer;

/// Errors of the content-graph store.
///
/// None of these are transient: each one points at a defect in the calling
/// code or in the authored content.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A getter needed a context layer that was never set.
    #[error("context not set: no current {0}")]
    ContextNotSet(Layer),

    /// The context holds a combination of layers that setters never produce,
    /// e.g. a level index without a world.
    #[error("invalid context layer (game set: {game}, world set: {world}, level set: {level})")]
    InvalidLayer { game: bool, world: bool, level: bool },

    #[error("game `{0}` not found")]
    GameNotFound(GameId),

    #[error("world `{world}` not found in game `{game}`")]
    WorldNotFound { game: GameId, world: WorldId },

    #[error("level {index} not found in world `{world}` of game `{game}`")]
    LevelNotFound {
        game: GameId,
        world: WorldId,
        index: LevelIndex,
    },

    /// An entity written through the context no longer matches the key its
    /// container stores it under.
    #[error("{layer} stored under `{expected}` identifies itself as `{found}`")]
    KeyMismatch {
        layer: Layer,
        expected: String,
        found: String,
    },

    /// Raised only when documentation is required by configuration.
    #[error("{kind} `{name}` referenced by level {level} is not documented")]
    UndocumentedItem {
        name: ItemName,
        kind: InventoryKind,
        level: LevelRef,
    },

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
