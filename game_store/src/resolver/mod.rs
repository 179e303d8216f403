//! Inventory Resolver - which capabilities a player may use in a level.
//!
//! Resolution works as follows:
//! 1. **Sequence**: collect the levels of every ancestor world, in world graph
//!    order and level order, followed by the target world up to the target
//! 2. **Unlock**: fold the `new` lists over the sequence, remembering where
//!    each item was first introduced
//! 3. **Restrict**: at the target only, apply `disabled`, or `only` when it is
//!    non-empty
//! 4. **Present**: emit one tile per unlocked item, optionally followed by
//!    locked tiles for items the player has not reached yet

mod path;
mod unlock;

pub use unlock::*;

use game_content::{
    Game, InventoryDocs, InventoryInfo, InventoryKind, InventoryTile, ItemName, LevelIndex,
    LevelInventory, LevelRef, WorldId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::error::StoreError;

/// Configuration for inventory resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Also emit `locked` tiles for items introduced elsewhere in the game
    /// that are not unlocked yet.
    pub include_locked: bool,

    /// Make the statement proven in a level available as a lemma in every
    /// level after it.
    pub exercises_unlock_lemmas: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            include_locked: false,
            exercises_unlock_lemmas: true,
        }
    }
}

/// The resolved inventory of one kind at one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInventory {
    pub kind: InventoryKind,
    pub level: LevelRef,
    pub tiles: Vec<InventoryTile>,
    /// Items usable at this level, in unlock order.
    pub visible: Vec<ItemName>,
}

impl ResolvedInventory {
    pub fn is_available(&self, name: &ItemName) -> bool {
        self.visible.contains(name)
    }

    /// Items from `used` that are not available at this level, deduplicated
    /// and in the order given.
    pub fn forbidden<'a, I>(&self, used: I) -> Vec<ItemName>
    where
        I: IntoIterator<Item = &'a ItemName>,
    {
        let mut seen = HashSet::new();
        used.into_iter()
            .filter(|name| !self.is_available(name) && seen.insert(*name))
            .cloned()
            .collect()
    }

    pub fn tile(&self, name: &ItemName) -> Option<&InventoryTile> {
        self.tiles.iter().find(|t| &t.name == name)
    }
}

/// Computes effective inventories from the deltas stored in levels.
#[derive(Debug, Clone, Default)]
pub struct InventoryResolver {
    config: ResolverConfig,
}

impl InventoryResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ResolverConfig::default())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the inventory of one kind at `world`/`index`.
    #[instrument(skip_all, fields(game = %game.id, world = %world, index = index, kind = %kind))]
    pub fn resolve(
        &self,
        game: &Game,
        world: &WorldId,
        index: LevelIndex,
        kind: InventoryKind,
        docs: &InventoryDocs,
    ) -> Result<ResolvedInventory, StoreError> {
        let sequence = path::level_sequence(game, world, index)?;
        let Some(((target_ref, target), earlier)) = sequence.split_last() else {
            return Err(StoreError::LevelNotFound {
                game: game.id.clone(),
                world: world.clone(),
                index,
            });
        };

        let mut unlocked = UnlockState::new();
        for (at, level) in earlier {
            for name in &level.inventory(kind).new {
                unlocked.unlock(name, at);
            }
            if let Some(name) = self.exercise_unlock(kind, level.statement_name.as_ref()) {
                unlocked.unlock(name, at);
            }
        }

        let info = target.inventory(kind);
        for name in &info.new {
            unlocked.unlock(name, target_ref);
        }

        let visible: Vec<ItemName> = unlocked
            .iter()
            .map(|(name, _)| name)
            .filter(|name| is_visible(info, name))
            .cloned()
            .collect();

        let mut tiles: Vec<InventoryTile> = unlocked
            .iter()
            .map(|(name, at)| {
                let mut tile = unlocked_tile(docs, kind, name);
                tile.disabled = !visible.contains(name);
                tile.new = at == target_ref;
                tile
            })
            .collect();

        if self.config.include_locked {
            for name in self.introduced_in(game, kind)? {
                if !unlocked.is_unlocked(&name) {
                    let mut tile = unlocked_tile(docs, kind, &name);
                    tile.locked = true;
                    tiles.push(tile);
                }
            }
        }

        debug!(
            unlocked = unlocked.len(),
            visible = visible.len(),
            tiles = tiles.len(),
            "resolved inventory"
        );

        Ok(ResolvedInventory {
            kind,
            level: target_ref.clone(),
            tiles,
            visible,
        })
    }

    /// Resolve all kinds at one level. The returned inventory carries the
    /// level's own deltas with `computed` filled in.
    pub fn resolve_level(
        &self,
        game: &Game,
        world: &WorldId,
        index: LevelIndex,
        docs: &InventoryDocs,
    ) -> Result<LevelInventory, StoreError> {
        let level = game.level(world, index).ok_or_else(|| StoreError::LevelNotFound {
            game: game.id.clone(),
            world: world.clone(),
            index,
        })?;

        let mut inventory = level.inventory.clone();
        for kind in InventoryKind::ALL {
            inventory.get_mut(kind).computed = self.resolve(game, world, index, kind, docs)?.tiles;
        }
        Ok(inventory)
    }

    /// Fill in `computed` for every level of the game.
    #[instrument(skip_all, fields(game = %game.id))]
    pub fn fill_game(&self, game: &mut Game, docs: &InventoryDocs) -> Result<(), StoreError> {
        let targets: Vec<(WorldId, LevelIndex)> = game
            .worlds
            .nodes()
            .flat_map(|(id, world)| world.levels.indices().map(move |i| (id.clone(), i)))
            .collect();

        let mut resolved = Vec::with_capacity(targets.len());
        for (world, index) in targets {
            let inventory = self.resolve_level(game, &world, index, docs)?;
            resolved.push((world, index, inventory));
        }

        for (world, index, inventory) in resolved {
            if let Some(level) = game.world_mut(&world).and_then(|w| w.levels.get_mut(index)) {
                level.inventory = inventory;
            }
        }

        debug!(levels = game.level_count(), "filled computed inventories");
        Ok(())
    }

    fn exercise_unlock<'a>(
        &self,
        kind: InventoryKind,
        statement_name: Option<&'a ItemName>,
    ) -> Option<&'a ItemName> {
        if kind == InventoryKind::Lemma && self.config.exercises_unlock_lemmas {
            statement_name
        } else {
            None
        }
    }

    /// Every item of `kind` unlocked anywhere in the game, in play order.
    fn introduced_in(&self, game: &Game, kind: InventoryKind) -> Result<Vec<ItemName>, StoreError> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        for world_id in game.worlds.topological_order()? {
            let Some(world) = game.world(&world_id) else {
                continue;
            };
            for (_, level) in world.levels.iter() {
                let exercise = self.exercise_unlock(kind, level.statement_name.as_ref());
                for name in level.inventory(kind).new.iter().chain(exercise) {
                    if seen.insert(name) {
                        names.push(name.clone());
                    }
                }
            }
        }

        Ok(names)
    }
}

/// Whether an unlocked item is usable at the level described by `info`.
fn is_visible(info: &InventoryInfo, name: &ItemName) -> bool {
    if info.only.is_empty() {
        !info.disabled.contains(name)
    } else {
        info.only.contains(name)
    }
}

fn unlocked_tile(docs: &InventoryDocs, kind: InventoryKind, name: &ItemName) -> InventoryTile {
    let (display_name, category) = match docs.get(name, kind) {
        Some(doc) => (doc.display_name.clone(), doc.category.clone()),
        None => (name.to_string(), String::new()),
    };
    InventoryTile {
        name: name.clone(),
        display_name,
        category,
        locked: false,
        disabled: false,
        new: false,
    }
}
