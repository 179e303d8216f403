//! Game registry - all games known to a build, keyed by identifier.
//!
//! A registry is appended to and merged into while content is built, and read
//! only afterwards. Registries produced by separate build units are combined
//! with [`link`].

mod merge;

pub use merge::*;

use game_content::{Game, GameId, GameLevel, LevelIndex, WorldId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Identifier of a build unit that contributed content to a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keyed collection of games.
///
/// Two registries are equal when they hold the same games; the contributing
/// units are not compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRegistry {
    games: BTreeMap<GameId, Game>,

    /// Build units whose content this registry holds, in link order.
    units: Vec<UnitId>,
}

impl GameRegistry {
    /// Create an empty registry for a fresh build unit.
    pub fn new() -> Self {
        Self {
            games: BTreeMap::new(),
            units: vec![UnitId::new()],
        }
    }

    fn without_units() -> Self {
        Self {
            games: BTreeMap::new(),
            units: Vec::new(),
        }
    }

    /// Insert a game, replacing any game with the same identifier wholesale.
    pub fn register(&mut self, game: Game) -> Option<Game> {
        let id = game.id.clone();
        let replaced = self.games.insert(id.clone(), game);
        debug!(game = %id, replaced = replaced.is_some(), "registered game");
        replaced
    }

    /// Merge a game into the one already registered under its identifier, or
    /// register it if there is none.
    pub fn merge_game(&mut self, game: Game) {
        let id = game.id.clone();
        let merged = match self.games.remove(&id) {
            Some(existing) => {
                debug!(game = %id, "merging game into existing entry");
                existing.merge(game)
            }
            None => game,
        };
        self.games.insert(id, merged);
    }

    /// Merge every game of `other` into this registry.
    pub fn absorb(&mut self, other: GameRegistry) {
        for game in other.games.into_values() {
            self.merge_game(game);
        }
        for unit in other.units {
            if !self.units.contains(&unit) {
                self.units.push(unit);
            }
        }
    }

    pub fn get(&self, id: &GameId) -> Option<&Game> {
        self.games.get(id)
    }

    pub fn contains(&self, id: &GameId) -> bool {
        self.games.contains_key(id)
    }

    pub fn get_level(&self, game: &GameId, world: &WorldId, index: LevelIndex) -> Option<&GameLevel> {
        self.get(game).and_then(|g| g.level(world, index))
    }

    /// Games ordered by identifier.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn units(&self) -> &[UnitId] {
        &self.units
    }
}

impl PartialEq for GameRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.games == other.games
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Combine the registries of several build units into one.
///
/// Units are absorbed in the given order, so for colliding keys the unit
/// linked last wins.
pub fn link<I>(units: I) -> GameRegistry
where
    I: IntoIterator<Item = GameRegistry>,
{
    let linked = units
        .into_iter()
        .fold(GameRegistry::without_units(), |mut acc, unit| {
            acc.absorb(unit);
            acc
        });
    info!(
        units = linked.units.len(),
        games = linked.len(),
        "linked build units"
    );
    linked
}
