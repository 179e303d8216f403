//! # Game Store
//!
//! The content-graph store for level-based learning games. Content is built
//! incrementally through a [`BuildContext`], registries from separately built
//! units are combined with [`link`], and the [`InventoryResolver`] answers
//! "what can the player use in this level?".
//!
//! ## Core Components
//!
//! - **registry**: games keyed by identifier, plus the merge used for linking
//! - **context**: the authoring cursor and the build context that owns it
//! - **resolver**: folds inventory deltas along every path into a level
//! - **config**: TOML-loadable settings for validation and resolution
//!
//! ## Lifecycle
//!
//! - **Build**: a single writer registers games, worlds and levels
//! - **Link**: registries of independent units are merged at join points
//! - **Freeze**: the finished [`GameRegistry`] is plain data, shared read-only

pub mod config;
pub mod context;
pub mod error;
pub mod registry;
pub mod resolver;

pub use config::*;
pub use context::*;
pub use error::*;
pub use registry::*;
pub use resolver::*;
