//! Errors raised by the content model.

use thiserror::Error;

use crate::identifiers::InventoryKind;

/// Structural errors in game content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// Documentation entries are immutable once registered.
    #[error("{kind} `{name}` is already documented")]
    AlreadyDocumented { name: String, kind: InventoryKind },

    /// An edge references a node that was never inserted.
    #[error("edge {from} -> {to} references a missing node")]
    DanglingEdge { from: String, to: String },

    /// The graph is not acyclic. Lists the nodes that could not be ordered.
    #[error("cycle detected among: {}", .nodes.join(", "))]
    Cycle { nodes: Vec<String> },
}
