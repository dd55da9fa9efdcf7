//! Core types for Dynamic Dialogue: the dialogue graph, the key store, and
//! the condition logic that gates node content.
//!
//! This crate is pure data plus evaluation. Traversal lives in
//! `dd-runtime`; an editor can author graphs with the operations on
//! [`DialogueGraph`] and persist them through [`io::DialogueFile`].

/// Speaking characters and their registry.
pub mod actor;
/// Key comparisons used to gate elements.
pub mod condition;
/// Lines, options, redirections, and actions.
pub mod element;
/// Error types used throughout the crate.
pub mod error;
/// The dialogue graph container and its authoring operations.
pub mod graph;
/// JSON persistence for dialogues and key stores.
pub mod io;
/// Named integer counters.
pub mod keys;
/// Nodes, node IDs, and outputs.
pub mod node;
/// Static graph validation.
pub mod validate;
/// Condition filtering of element lists.
pub mod visibility;

/// Re-export actor types.
pub use actor::{Actor, ActorId, ActorRegistry, Anchor, Placement};
/// Re-export condition types.
pub use condition::{Comparison, Condition};
/// Re-export element types.
pub use element::{Action, AnyElement, Choice, Conditional, Element, ElementRef, Line, Redirection};
/// Re-export error types.
pub use error::{DialogueError, DialogueResult};
/// Re-export graph types.
pub use graph::{DialogueGraph, OutputRef};
/// Re-export the dialogue file bundle.
pub use io::DialogueFile;
/// Re-export key store types.
pub use keys::{Key, KeyOperation, KeySort, KeyStore};
/// Re-export node types.
pub use node::{Node, NodeId, Output};
/// Re-export validation entry points.
pub use validate::{Severity, ValidationIssue, validate_file, validate_graph};
/// Re-export visibility helpers.
pub use visibility::{filter_visible, is_visible, visible};
