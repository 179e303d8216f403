//! Merging of independently built content.
//!
//! Everything merges with "incoming wins" on scalars. Keyed collections merge
//! per key, recursing into entries present on both sides. Levels are the
//! exception: a level is replaced whole.

use std::hash::Hash;

use game_content::{ContentGraph, Game, GameLevel, LevelStore, World};

/// Combine an existing value with one imported later.
pub trait Merge {
    fn merge(self, incoming: Self) -> Self;
}

/// Free-function form of [`Merge::merge`].
pub fn merge<T: Merge>(existing: T, incoming: T) -> T {
    existing.merge(incoming)
}

impl Merge for GameLevel {
    fn merge(self, incoming: Self) -> Self {
        incoming
    }
}

impl Merge for LevelStore {
    fn merge(mut self, incoming: Self) -> Self {
        for (index, level) in incoming {
            let level = match self.remove(index) {
                Some(existing) => existing.merge(level),
                None => level,
            };
            self.insert(index, level);
        }
        self
    }
}

impl Merge for World {
    fn merge(self, incoming: Self) -> Self {
        World {
            id: incoming.id,
            title: incoming.title,
            introduction: incoming.introduction,
            conclusion: incoming.conclusion,
            image: incoming.image,
            levels: self.levels.merge(incoming.levels),
        }
    }
}

/// Nodes merge by key; existing edges keep their order and incoming edges
/// not already present are appended in incoming order.
impl<K, N> Merge for ContentGraph<K, N>
where
    K: Clone + Eq + Hash,
    N: Merge,
{
    fn merge(mut self, incoming: Self) -> Self {
        let (nodes, edges) = incoming.into_parts();
        for (id, node) in nodes {
            self.merge_node(id, node, N::merge);
        }
        for edge in edges {
            self.add_edge(edge.from, edge.to);
        }
        self
    }
}

impl Merge for Game {
    fn merge(self, incoming: Self) -> Self {
        Game {
            id: incoming.id,
            title: incoming.title,
            introduction: incoming.introduction,
            conclusion: incoming.conclusion,
            info: incoming.info,
            authors: incoming.authors,
            worlds: self.worlds.merge(incoming.worlds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::{Edge, WorldId};

    fn world(id: &str, levels: &[&str]) -> World {
        let mut world = World::new(id).with_title(format!("{id} world"));
        for (i, title) in levels.iter().enumerate() {
            world.add_level(GameLevel::new(i).with_title(*title));
        }
        world
    }

    fn world_ids(game: &Game) -> Vec<&str> {
        let mut ids: Vec<_> = game.worlds.node_ids().iter().map(WorldId::as_str).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_disjoint_merge_is_union_both_ways() {
        let g1 = Game::new("TestGame")
            .with_world(world("Proposition", &["a"]))
            .with_world(world("Implication", &["b"]))
            .with_unlock("Proposition", "Implication");
        let g2 = Game::new("TestGame")
            .with_world(world("Predicate", &["c"]))
            .with_world(world("Inequality", &["d"]))
            .with_unlock("Predicate", "Inequality");

        let forward = merge(g1.clone(), g2.clone());
        let backward = merge(g2, g1);

        assert_eq!(world_ids(&forward), world_ids(&backward));
        assert_eq!(forward.worlds.node_count(), 4);
        assert_eq!(forward.worlds.edge_count(), 2);
        assert_eq!(
            forward.world(&WorldId::from("Predicate")),
            backward.world(&WorldId::from("Predicate"))
        );
    }

    #[test]
    fn test_self_merge_is_idempotent() {
        let game = Game::new("TestGame")
            .with_title("Logic")
            .with_world(world("Proposition", &["a", "b"]))
            .with_world(world("Implication", &["c"]))
            .with_unlock("Proposition", "Implication");

        assert_eq!(merge(game.clone(), game.clone()), game);
    }

    #[test]
    fn test_incoming_scalars_win() {
        let existing = Game::new("TestGame").with_title("Old").with_introduction("old intro");
        let incoming = Game::new("TestGame").with_title("New");

        let merged = merge(existing, incoming);
        assert_eq!(merged.title, "New");
        assert_eq!(merged.introduction, "");
    }

    #[test]
    fn test_edges_keep_existing_order_and_append_new() {
        let existing = Game::new("G")
            .with_unlock("B", "C")
            .with_unlock("A", "B");
        let incoming = Game::new("G")
            .with_unlock("A", "B")
            .with_unlock("A", "D")
            .with_unlock("D", "C");

        let merged = merge(existing, incoming);
        let edges: Vec<_> = merged
            .worlds
            .edges()
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(edges, [("B", "C"), ("A", "B"), ("A", "D"), ("D", "C")]);
        assert_eq!(merged.worlds.edges()[0], Edge::new(WorldId::from("B"), WorldId::from("C")));
    }

    #[test]
    fn test_levels_merge_by_index_and_replace_whole() {
        let mut draft = GameLevel::new(1).with_title("draft").with_goal("A → A");
        draft.statement_name = Some("self_imp".into());
        let existing = world("Implication", &["zero"]).with_level(draft);
        let incoming = World::new("Implication")
            .with_title("Implication")
            .with_level(GameLevel::new(1).with_title("final"))
            .with_level(GameLevel::new(2).with_title("two"));

        let merged = merge(existing, incoming);

        assert_eq!(merged.title, "Implication");
        assert_eq!(merged.size(), 3);
        assert_eq!(merged.level(0).unwrap().title, "zero");
        let one = merged.level(1).unwrap();
        assert_eq!(one.title, "final");
        // Whole-level replacement: nothing of the draft survives.
        assert!(one.goal.is_empty());
        assert!(one.statement_name.is_none());
    }

    #[test]
    fn test_colliding_worlds_last_import_wins() {
        let first = Game::new("G").with_world(world("W", &["first"]));
        let second = Game::new("G").with_world(world("W", &["second"]));

        let merged = merge(first.clone(), second.clone());
        assert_eq!(merged.level(&WorldId::from("W"), 0).unwrap().title, "second");

        let merged = merge(second, first);
        assert_eq!(merged.level(&WorldId::from("W"), 0).unwrap().title, "first");
    }
}
