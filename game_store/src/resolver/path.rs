//! The sequence of levels a player passes through before reaching a level.

use game_content::{Game, GameLevel, LevelIndex, LevelRef, WorldId};

use crate::error::StoreError;

/// Levels preceding the target, followed by the target itself.
///
/// Every ancestor world of the target's world contributes all of its levels,
/// worlds in topological order and levels by ascending index. A world reached
/// along several paths is visited once. The target world contributes its
/// levels up to and including `index`.
pub(crate) fn level_sequence<'a>(
    game: &'a Game,
    world_id: &WorldId,
    index: LevelIndex,
) -> Result<Vec<(LevelRef, &'a GameLevel)>, StoreError> {
    let world = game.world(world_id).ok_or_else(|| StoreError::WorldNotFound {
        game: game.id.clone(),
        world: world_id.clone(),
    })?;
    if world.level(index).is_none() {
        return Err(StoreError::LevelNotFound {
            game: game.id.clone(),
            world: world_id.clone(),
            index,
        });
    }

    let ancestors = game.worlds.ancestors(world_id);
    let mut sequence = Vec::new();

    for ancestor_id in game.worlds.topological_order()? {
        if &ancestor_id == world_id || !ancestors.contains(&ancestor_id) {
            continue;
        }
        if let Some(ancestor) = game.world(&ancestor_id) {
            sequence.extend(
                ancestor
                    .levels
                    .iter()
                    .map(|(i, level)| (LevelRef::new(ancestor_id.clone(), i), level)),
            );
        }
    }

    sequence.extend(
        world
            .levels
            .up_to(index)
            .map(|(i, level)| (LevelRef::new(world_id.clone(), i), level)),
    );

    Ok(sequence)
}
