//! Configuration for a conversation session.

use dd_core::NodeId;

/// Configuration for a [`crate::Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Node that [`crate::Session::open`] starts from.
    pub start_node: NodeId,
    /// Forward cues to the cue sink.
    pub emit_cues: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_node: NodeId::START,
            emit_cues: true,
        }
    }
}

impl SessionConfig {
    /// Set the default start node.
    pub fn with_start_node(mut self, node: NodeId) -> Self {
        self.start_node = node;
        self
    }

    /// Enable or disable cues.
    pub fn with_cues(mut self, enabled: bool) -> Self {
        self.emit_cues = enabled;
        self
    }
}
