//! Build context - the single writer of a build unit.

use std::fmt;

use game_content::{
    Game, GameId, GameLevel, InventoryDocs, InventoryItem, InventoryKind, ItemName, LevelIndex,
    LevelRef, World, WorldId,
};
use tracing::{debug, info, instrument, warn};

use super::{CurrentContext, Layer};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::registry::GameRegistry;
use crate::resolver::{InventoryResolver, ResolvedInventory};

/// Owns everything a build unit writes: the game registry, the inventory
/// documentation and the authoring cursor.
///
/// Entities are only modified through the `modify_cur_*` methods, which
/// write the changed entity back through its parent so containers always
/// agree with their children.
#[derive(Debug, Clone)]
pub struct BuildContext {
    registry: GameRegistry,
    docs: InventoryDocs,
    cursor: CurrentContext,
    config: StoreConfig,
    resolver: InventoryResolver,
}

impl BuildContext {
    pub fn new(config: StoreConfig) -> Self {
        let resolver = InventoryResolver::new(config.resolver.clone());
        Self {
            registry: GameRegistry::new(),
            docs: InventoryDocs::new(),
            cursor: CurrentContext::new(),
            config,
            resolver,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn cursor(&self) -> &CurrentContext {
        &self.cursor
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn docs(&self) -> &InventoryDocs {
        &self.docs
    }

    pub fn set_cur_game_id(&mut self, id: impl Into<GameId>) {
        self.cursor.set_game(id);
    }

    pub fn set_cur_world_id(&mut self, id: impl Into<WorldId>) {
        self.cursor.set_world(id);
    }

    pub fn set_cur_level_idx(&mut self, index: LevelIndex) {
        self.cursor.set_level(index);
    }

    pub fn cur_layer(&self) -> Result<Layer, StoreError> {
        self.cursor.layer()
    }

    pub fn cur_game(&self) -> Result<&Game, StoreError> {
        let id = self.cursor.game_id()?;
        self.registry
            .get(id)
            .ok_or_else(|| StoreError::GameNotFound(id.clone()))
    }

    pub fn cur_world(&self) -> Result<&World, StoreError> {
        let world_id = self.cursor.world_id()?;
        let game = self.cur_game()?;
        game.world(world_id).ok_or_else(|| StoreError::WorldNotFound {
            game: game.id.clone(),
            world: world_id.clone(),
        })
    }

    pub fn cur_level(&self) -> Result<&GameLevel, StoreError> {
        let index = self.cursor.level_index()?;
        let game = self.cur_game()?;
        let world = self.cur_world()?;
        world.level(index).ok_or_else(|| StoreError::LevelNotFound {
            game: game.id.clone(),
            world: world.id.clone(),
            index,
        })
    }

    /// Read-modify-write the current game. Nothing is written if `f` fails
    /// or changes the game's identifier.
    pub fn modify_cur_game<F, R>(&mut self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Game) -> Result<R, StoreError>,
    {
        let id = self.cursor.game_id()?.clone();
        let mut game = self.cur_game()?.clone();
        let out = f(&mut game)?;
        check_key(Layer::Game, &id, &game.id)?;
        self.registry.register(game);
        Ok(out)
    }

    /// Read-modify-write the current world, replacing its node in the game.
    /// The world's identifier must stay unchanged.
    pub fn modify_cur_world<F, R>(&mut self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut World) -> Result<R, StoreError>,
    {
        let world_id = self.cursor.world_id()?.clone();
        let mut world = self.cur_world()?.clone();
        let out = f(&mut world)?;
        check_key(Layer::World, &world_id, &world.id)?;
        self.modify_cur_game(|game| {
            game.worlds.insert_node(world_id, world);
            Ok(())
        })?;
        Ok(out)
    }

    /// Read-modify-write the current level, replacing its entry in the world.
    /// The level's index must stay unchanged.
    pub fn modify_cur_level<F, R>(&mut self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut GameLevel) -> Result<R, StoreError>,
    {
        let index = self.cursor.level_index()?;
        let mut level = self.cur_level()?.clone();
        let out = f(&mut level)?;
        check_key(Layer::Level, &index, &level.index)?;
        self.modify_cur_world(|world| {
            world.levels.insert(index, level);
            Ok(())
        })?;
        Ok(out)
    }

    /// Register a game, replacing any game with the same identifier.
    pub fn add_game(&mut self, game: Game) {
        self.registry.register(game);
    }

    /// Merge a game into the registered game with the same identifier.
    pub fn merge_game(&mut self, game: Game) {
        self.registry.merge_game(game);
    }

    /// Add a world to the current game.
    pub fn add_world(&mut self, world: World) -> Result<(), StoreError> {
        debug!(world = %world.id, "adding world");
        self.modify_cur_game(|game| {
            game.add_world(world);
            Ok(())
        })
    }

    /// Add a level to the current world at the current level index. The
    /// level's own index has to agree with the cursor.
    pub fn add_level(&mut self, level: GameLevel) -> Result<(), StoreError> {
        let index = self.cursor.level_index()?;
        check_key(Layer::Level, &index, &level.index)?;
        debug!(index, "adding level");
        self.modify_cur_world(|world| {
            if world.levels.insert(index, level).is_some() {
                debug!(index, "replaced earlier level declaration");
            }
            Ok(())
        })
    }

    /// Declare that world `to` is unlocked after `from` in the current game.
    pub fn add_unlock(&mut self, from: impl Into<WorldId>, to: impl Into<WorldId>) -> Result<(), StoreError> {
        let (from, to) = (from.into(), to.into());
        self.modify_cur_game(|game| {
            game.add_unlock(from, to);
            Ok(())
        })
    }

    pub fn document_item(&mut self, item: InventoryItem) -> Result<(), StoreError> {
        self.docs.register(item)?;
        Ok(())
    }

    /// Merge the registry and documentation of another build unit.
    pub fn import(&mut self, registry: GameRegistry, docs: InventoryDocs) {
        info!(
            games = registry.len(),
            docs = docs.len(),
            "importing build unit"
        );
        self.registry.absorb(registry);
        self.docs.absorb(docs);
    }

    pub fn get_game(&self, id: &GameId) -> Option<&Game> {
        self.registry.get(id)
    }

    pub fn get_level(&self, game: &GameId, world: &WorldId, index: LevelIndex) -> Option<&GameLevel> {
        self.registry.get_level(game, world, index)
    }

    pub fn get_inventory_doc(&self, name: &ItemName, kind: InventoryKind) -> Option<&InventoryItem> {
        self.docs.get(name, kind)
    }

    /// Resolve one kind of inventory at the current level.
    pub fn cur_inventory(&self, kind: InventoryKind) -> Result<ResolvedInventory, StoreError> {
        let index = self.cursor.level_index()?;
        let world = self.cursor.world_id()?;
        self.resolver
            .resolve(self.cur_game()?, world, index, kind, &self.docs)
    }

    /// Validate a game and fill in the computed inventory of every level.
    #[instrument(skip_all, fields(game = %id))]
    pub fn finalize_game(&mut self, id: &GameId) -> Result<&Game, StoreError> {
        let mut game = self
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::GameNotFound(id.clone()))?;

        if self.config.validation.require_acyclic {
            let order = game.validate()?;
            debug!(worlds = order.len(), "world graph is acyclic");
        }
        self.check_documentation(&game)?;

        self.resolver.fill_game(&mut game, &self.docs)?;
        self.registry.register(game);
        info!("finalized game");

        self.registry
            .get(id)
            .ok_or_else(|| StoreError::GameNotFound(id.clone()))
    }

    /// Finish the build, keeping only the registry.
    pub fn into_registry(self) -> GameRegistry {
        self.registry
    }

    /// Finish the build, handing out the registry and documentation for
    /// read-only use.
    pub fn into_parts(self) -> (GameRegistry, InventoryDocs) {
        (self.registry, self.docs)
    }

    fn check_documentation(&self, game: &Game) -> Result<(), StoreError> {
        for (world_id, world) in game.worlds.nodes() {
            for (index, level) in world.levels.iter() {
                for kind in InventoryKind::ALL {
                    for name in level.inventory(kind).referenced() {
                        if self.docs.contains(name, kind) {
                            continue;
                        }
                        let at = LevelRef::new(world_id.clone(), index);
                        if self.config.validation.require_documented {
                            return Err(StoreError::UndocumentedItem {
                                name: name.clone(),
                                kind,
                                level: at,
                            });
                        }
                        warn!(item = %name, %kind, level = %at, "inventory item is not documented");
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn check_key<K>(layer: Layer, expected: &K, found: &K) -> Result<(), StoreError>
where
    K: PartialEq + fmt::Display,
{
    if expected == found {
        return Ok(());
    }
    Err(StoreError::KeyMismatch {
        layer,
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use game_content::{ContentError, InventoryInfo};

    fn context_with_world() -> BuildContext {
        let mut ctx = BuildContext::with_defaults();
        ctx.add_game(Game::new("TestGame"));
        ctx.set_cur_game_id("TestGame");
        ctx.add_world(World::new("Proposition")).unwrap();
        ctx.set_cur_world_id("Proposition");
        ctx
    }

    #[test]
    fn test_getters_fail_without_context() {
        let ctx = BuildContext::with_defaults();
        assert!(matches!(ctx.cur_level(), Err(StoreError::ContextNotSet(Layer::Game))));
        assert!(matches!(ctx.cur_layer(), Err(StoreError::InvalidLayer { .. })));
    }

    #[test]
    fn test_lookup_misses_name_the_identifier() {
        let mut ctx = BuildContext::with_defaults();
        ctx.set_cur_game_id("Missing");
        match ctx.cur_game() {
            Err(StoreError::GameNotFound(id)) => assert_eq!(id.as_str(), "Missing"),
            other => panic!("expected GameNotFound, got {other:?}"),
        }

        let mut ctx = context_with_world();
        ctx.set_cur_level_idx(7);
        assert!(matches!(ctx.cur_level(), Err(StoreError::LevelNotFound { index: 7, .. })));
    }

    #[test]
    fn test_add_world_requires_game() {
        let mut ctx = BuildContext::with_defaults();
        ctx.set_cur_game_id("TestGame");
        assert!(matches!(
            ctx.add_world(World::new("Proposition")),
            Err(StoreError::GameNotFound(_))
        ));
    }

    #[test]
    fn test_add_level_writes_through_world_and_game() {
        let mut ctx = context_with_world();
        ctx.set_cur_level_idx(0);
        ctx.add_level(GameLevel::new(0).with_title("first")).unwrap();

        assert_eq!(ctx.cur_level().unwrap().title, "first");
        let game = ctx.get_game(&GameId::from("TestGame")).unwrap();
        assert_eq!(game.world(&WorldId::from("Proposition")).unwrap().size(), 1);
    }

    #[test]
    fn test_add_level_requires_level_cursor() {
        let mut ctx = context_with_world();
        assert!(matches!(
            ctx.add_level(GameLevel::new(4)),
            Err(StoreError::ContextNotSet(Layer::Level))
        ));
        assert_eq!(ctx.cur_world().unwrap().size(), 0);
    }

    #[test]
    fn test_add_level_rejects_index_other_than_cursor() {
        let mut ctx = context_with_world();
        ctx.set_cur_level_idx(11);

        let err = ctx.add_level(GameLevel::new(4)).unwrap_err();
        assert!(matches!(err, StoreError::KeyMismatch { layer: Layer::Level, .. }));
        assert_eq!(ctx.cur_world().unwrap().size(), 0);

        ctx.add_level(GameLevel::new(11).with_title("L11_Or")).unwrap();
        assert_eq!(ctx.cur_level().unwrap().title, "L11_Or");
    }

    #[test]
    fn test_level_redeclaration_is_last_write_wins() {
        let mut ctx = context_with_world();
        ctx.set_cur_level_idx(3);
        ctx.add_level(GameLevel::new(3).with_goal("A")).unwrap();
        ctx.add_level(GameLevel::new(3).with_goal("B")).unwrap();

        let world = ctx.cur_world().unwrap();
        assert_eq!(world.size(), 1);
        assert_eq!(world.level(3).unwrap().goal, "B");
    }

    #[test]
    fn test_modify_cur_level() {
        let mut ctx = context_with_world();
        ctx.set_cur_level_idx(0);
        ctx.add_level(GameLevel::new(0)).unwrap();

        let hints = ctx
            .modify_cur_level(|level| {
                level.statement_name = Some(ItemName::from("and_comm"));
                Ok(level.hints.len())
            })
            .unwrap();

        assert_eq!(hints, 0);
        let stored = ctx
            .get_level(&GameId::from("TestGame"), &WorldId::from("Proposition"), 0)
            .unwrap();
        assert_eq!(stored.statement_name, Some(ItemName::from("and_comm")));
    }

    #[test]
    fn test_modification_cannot_rekey_entities() {
        let mut ctx = context_with_world();
        ctx.set_cur_level_idx(0);
        ctx.add_level(GameLevel::new(0)).unwrap();

        let err = ctx
            .modify_cur_level(|level| {
                level.index = 5;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::KeyMismatch { layer: Layer::Level, .. }));
        let world = ctx.cur_world().unwrap();
        assert_eq!(world.level(0).unwrap().index, 0);
        assert!(world.level(5).is_none());

        let err = ctx
            .modify_cur_world(|world| {
                world.id = WorldId::from("Implication");
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::KeyMismatch { layer: Layer::World, .. }));
        assert_eq!(ctx.cur_world().unwrap().id.as_str(), "Proposition");

        let err = ctx
            .modify_cur_game(|game| {
                game.id = GameId::from("OtherGame");
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::KeyMismatch { layer: Layer::Game, .. }));
        assert!(ctx.get_game(&GameId::from("OtherGame")).is_none());
    }

    #[test]
    fn test_failed_modification_writes_nothing() {
        let mut ctx = context_with_world();
        let result: Result<(), StoreError> = ctx.modify_cur_world(|world| {
            world.title = "changed".to_string();
            Err(StoreError::ContextNotSet(Layer::Level))
        });

        assert!(result.is_err());
        assert!(ctx.cur_world().unwrap().title.is_empty());
    }

    #[test]
    fn test_finalize_rejects_cycles() {
        let mut ctx = context_with_world();
        ctx.add_world(World::new("Implication")).unwrap();
        ctx.add_unlock("Proposition", "Implication").unwrap();
        ctx.add_unlock("Implication", "Proposition").unwrap();

        let err = ctx.finalize_game(&GameId::from("TestGame")).unwrap_err();
        assert!(matches!(err, StoreError::Content(ContentError::Cycle { .. })));
    }

    #[test]
    fn test_finalize_requires_documentation_when_configured() {
        let config = StoreConfig {
            validation: ValidationConfig {
                require_documented: true,
                ..ValidationConfig::default()
            },
            ..StoreConfig::default()
        };
        let mut ctx = BuildContext::new(config);
        ctx.add_game(Game::new("TestGame"));
        ctx.set_cur_game_id("TestGame");
        ctx.add_world(World::new("Proposition")).unwrap();
        ctx.set_cur_world_id("Proposition");
        ctx.set_cur_level_idx(0);
        ctx.add_level(
            GameLevel::new(0).with_inventory(InventoryKind::Tactic, InventoryInfo::new().with_new(["rfl"])),
        )
        .unwrap();

        let err = ctx.finalize_game(&GameId::from("TestGame")).unwrap_err();
        assert!(matches!(err, StoreError::UndocumentedItem { kind: InventoryKind::Tactic, .. }));

        ctx.document_item(InventoryItem::new("rfl", InventoryKind::Tactic))
            .unwrap();
        let game = ctx.finalize_game(&GameId::from("TestGame")).unwrap();
        let level = game.level(&WorldId::from("Proposition"), 0).unwrap();
        assert_eq!(level.inventory(InventoryKind::Tactic).computed.len(), 1);
    }

    #[test]
    fn test_import_merges_other_unit() {
        let mut ctx = context_with_world();

        let mut other = BuildContext::with_defaults();
        other.add_game(Game::new("TestGame").with_world(World::new("Implication")));
        other.set_cur_game_id("TestGame");
        other.add_unlock("Proposition", "Implication").unwrap();
        other
            .document_item(InventoryItem::new("intro", InventoryKind::Tactic))
            .unwrap();
        let (registry, docs) = other.into_parts();

        ctx.import(registry, docs);

        let game = ctx.cur_game().unwrap();
        assert_eq!(game.worlds.node_count(), 2);
        assert!(game.worlds.contains_edge(&WorldId::from("Proposition"), &WorldId::from("Implication")));
        assert!(ctx
            .get_inventory_doc(&ItemName::from("intro"), InventoryKind::Tactic)
            .is_some());
        assert_eq!(ctx.registry().units().len(), 2);
    }

    #[test]
    fn test_merge_game_keeps_existing_worlds() {
        let mut ctx = context_with_world();
        ctx.merge_game(Game::new("TestGame").with_world(World::new("Implication")));

        let registry = ctx.into_registry();
        let game = registry.get(&GameId::from("TestGame")).unwrap();
        assert!(game.world(&WorldId::from("Proposition")).is_some());
        assert!(game.world(&WorldId::from("Implication")).is_some());
    }
}
