//! # Game Content
//!
//! The content model for level-based learning games. A game is a graph of
//! worlds, a world is an ordered collection of levels, and every level carries
//! its goal, hints and the inventory deltas that gate which tactics, lemmas
//! and definitions a player may use there.
//!
//! This crate only holds data and the structural operations on it. Building,
//! merging and inventory resolution live in `game_store`.

pub mod error;
pub mod game;
pub mod graph;
pub mod identifiers;
pub mod inventory;
pub mod level;
pub mod world;

pub use error::*;
pub use game::*;
pub use graph::*;
pub use identifiers::*;
pub use inventory::*;
pub use level::*;
pub use world::*;
