use std::path::PathBuf;

use crate::actor::ActorId;
use crate::node::NodeId;

/// Alias for `Result<T, DialogueError>`.
pub type DialogueResult<T> = Result<T, DialogueError>;

/// Errors that can occur when authoring, loading, or saving a dialogue.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    /// The requested node ID does not exist in the graph.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node with the same ID already exists in the graph.
    #[error("node already exists: {0}")]
    DuplicateNode(NodeId),

    /// The requested actor ID is not registered.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// Every ID above the allocation counter is taken.
    #[error("no free {0} IDs left")]
    IdsExhausted(&'static str),

    /// An element index was out of range for its node.
    #[error("node {node} has no {kind} at index {index}")]
    ElementNotFound {
        /// The node that was searched.
        node: NodeId,
        /// The element list that was searched.
        kind: &'static str,
        /// The requested index.
        index: usize,
    },

    /// Reading or writing a dialogue file failed.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The file that was being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A dialogue file was not valid JSON for the expected schema.
    #[error("invalid dialogue data: {0}")]
    Json(#[from] serde_json::Error),
}
