use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::element::{Element, ElementRef, Line};
use crate::error::{DialogueError, DialogueResult};
use crate::node::{Node, NodeId, Output};

/// Identifies one output slot in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputRef {
    /// A node's default output.
    Node(NodeId),
    /// An option's output.
    Option {
        /// The owning node.
        node: NodeId,
        /// Index into the node's options.
        index: usize,
    },
    /// A redirection's output.
    Redirection {
        /// The owning node.
        node: NodeId,
        /// Index into the node's redirections.
        index: usize,
    },
}

impl OutputRef {
    /// The node owning this output.
    pub fn node(self) -> NodeId {
        match self {
            Self::Node(node) | Self::Option { node, .. } | Self::Redirection { node, .. } => node,
        }
    }
}

/// On-disk shape of a graph. The ID index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct GraphData {
    nodes: Vec<Node>,
    #[serde(default = "first_id")]
    next_id: u32,
}

fn first_id() -> u32 {
    1
}

/// A dialogue graph: an ordered list of nodes linked by ID.
///
/// Node order is the editor's draw order and has no effect on traversal.
/// If a loaded file contains duplicate IDs, lookups resolve to the first
/// node with that ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphData", into = "GraphData")]
pub struct DialogueGraph {
    nodes: Vec<Node>,
    next_id: u32,

    // Index
    by_id: HashMap<NodeId, usize>,
}

impl Default for DialogueGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GraphData> for DialogueGraph {
    fn from(data: GraphData) -> Self {
        let mut graph = Self {
            nodes: data.nodes,
            next_id: data.next_id.max(first_id()),
            by_id: HashMap::new(),
        };
        graph.reindex();
        graph
    }
}

impl From<DialogueGraph> for GraphData {
    fn from(graph: DialogueGraph) -> Self {
        Self {
            nodes: graph.nodes,
            next_id: graph.next_id,
        }
    }
}

impl DialogueGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_id: first_id(),
            by_id: HashMap::new(),
        }
    }

    /// Build a graph from nodes, rejecting duplicate IDs.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> DialogueResult<Self> {
        let mut graph = Self::new();
        for node in nodes {
            graph.insert_node(node)?;
        }
        Ok(graph)
    }

    fn reindex(&mut self) {
        self.by_id.clear();
        for (pos, node) in self.nodes.iter().enumerate() {
            self.by_id.entry(node.id).or_insert(pos);
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Look up a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.by_id.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Mutable lookup. The node's ID must not be changed through this.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.by_id.get(&id).map(|&pos| &mut self.nodes[pos])
    }

    /// The start node, if present.
    pub fn start(&self) -> Option<&Node> {
        self.node(NodeId::START)
    }

    /// Whether a node with this ID exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All nodes in draw order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The ID the next [`DialogueGraph::create_node`] call will try first.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.next_id)
    }

    // -----------------------------------------------------------------------
    // Node authoring
    // -----------------------------------------------------------------------

    /// Add a new node with a fresh ID and a single empty line.
    pub fn create_node(&mut self) -> DialogueResult<NodeId> {
        let exhausted = || DialogueError::IdsExhausted("node");
        let mut next = self.next_id;
        while self.by_id.contains_key(&NodeId(next)) {
            next = next.checked_add(1).ok_or_else(exhausted)?;
        }
        let id = NodeId(next);
        self.next_id = next.saturating_add(1);

        let node = Node::new(id).with_line(Element::new(Line::default()));
        self.by_id.insert(id, self.nodes.len());
        self.nodes.push(node);
        tracing::debug!(node = %id, "created node");
        Ok(id)
    }

    /// Add the start node. Fails if the graph already has one.
    pub fn create_start(&mut self) -> DialogueResult<NodeId> {
        self.insert_node(Node::new(NodeId::START))?;
        Ok(NodeId::START)
    }

    /// Add a prepared node. Fails if its ID is taken.
    pub fn insert_node(&mut self, node: Node) -> DialogueResult<()> {
        if self.by_id.contains_key(&node.id) {
            return Err(DialogueError::DuplicateNode(node.id));
        }
        self.next_id = self.next_id.max(node.id.0.saturating_add(1));
        self.by_id.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node and disconnect every output that pointed at it.
    pub fn remove_node(&mut self, id: NodeId) -> DialogueResult<Node> {
        let pos = *self.by_id.get(&id).ok_or(DialogueError::NodeNotFound(id))?;
        let removed = self.nodes.remove(pos);

        let mut cleared = 0usize;
        for node in &mut self.nodes {
            for output in node.outputs_mut() {
                if output.next == Some(id) {
                    *output = Output::UNSET;
                    cleared += 1;
                }
            }
        }
        self.reindex();
        tracing::debug!(node = %id, cleared, "removed node");
        Ok(removed)
    }

    /// Point an output at `target`, or disconnect it with `None`.
    pub fn connect(&mut self, from: OutputRef, target: Option<NodeId>) -> DialogueResult<()> {
        let node_id = from.node();
        let node = self
            .node_mut(node_id)
            .ok_or(DialogueError::NodeNotFound(node_id))?;
        let missing = |kind, index| DialogueError::ElementNotFound {
            node: node_id,
            kind,
            index,
        };
        let output = match from {
            OutputRef::Node(_) => &mut node.output,
            OutputRef::Option { index, .. } => {
                &mut node
                    .options
                    .get_mut(index)
                    .ok_or_else(|| missing("option", index))?
                    .body
                    .output
            }
            OutputRef::Redirection { index, .. } => {
                &mut node
                    .redirections
                    .get_mut(index)
                    .ok_or_else(|| missing("redirection", index))?
                    .body
                    .output
            }
        };
        output.next = target;
        Ok(())
    }

    /// Append a copy of an element to the end of its list.
    pub fn duplicate_element(&mut self, node: NodeId, at: ElementRef) -> DialogueResult<()> {
        let n = self.node_mut(node).ok_or(DialogueError::NodeNotFound(node))?;
        let missing = || DialogueError::ElementNotFound {
            node,
            kind: at.kind(),
            index: at.index(),
        };
        match at {
            ElementRef::Line(i) => {
                let copy = n.lines.get(i).cloned().ok_or_else(missing)?;
                n.lines.push(copy);
            }
            ElementRef::Option(i) => {
                let copy = n.options.get(i).cloned().ok_or_else(missing)?;
                n.options.push(copy);
            }
            ElementRef::Redirection(i) => {
                let copy = n.redirections.get(i).cloned().ok_or_else(missing)?;
                n.redirections.push(copy);
            }
            ElementRef::Action(i) => {
                let copy = n.actions.get(i).cloned().ok_or_else(missing)?;
                n.actions.push(copy);
            }
        }
        Ok(())
    }

    /// Delete one element from a node.
    pub fn remove_element(&mut self, node: NodeId, at: ElementRef) -> DialogueResult<()> {
        let n = self.node_mut(node).ok_or(DialogueError::NodeNotFound(node))?;
        let len = match at {
            ElementRef::Line(_) => n.lines.len(),
            ElementRef::Option(_) => n.options.len(),
            ElementRef::Redirection(_) => n.redirections.len(),
            ElementRef::Action(_) => n.actions.len(),
        };
        if at.index() >= len {
            return Err(DialogueError::ElementNotFound {
                node,
                kind: at.kind(),
                index: at.index(),
            });
        }
        match at {
            ElementRef::Line(i) => {
                n.lines.remove(i);
            }
            ElementRef::Option(i) => {
                n.options.remove(i);
            }
            ElementRef::Redirection(i) => {
                n.redirections.remove(i);
            }
            ElementRef::Action(i) => {
                n.actions.remove(i);
            }
        }
        Ok(())
    }

    /// Move a node to the start of the draw order.
    pub fn bring_to_front(&mut self, id: NodeId) -> DialogueResult<()> {
        let pos = *self.by_id.get(&id).ok_or(DialogueError::NodeNotFound(id))?;
        let node = self.nodes.remove(pos);
        self.nodes.insert(0, node);
        self.reindex();
        Ok(())
    }

    /// Move a node to the end of the draw order.
    pub fn send_to_back(&mut self, id: NodeId) -> DialogueResult<()> {
        let pos = *self.by_id.get(&id).ok_or(DialogueError::NodeNotFound(id))?;
        let node = self.nodes.remove(pos);
        self.nodes.push(node);
        self.reindex();
        Ok(())
    }

    /// Reset every node spoken by `actor` to no actor.
    pub fn clear_actor(&mut self, actor: ActorId) {
        for node in self.nodes.iter_mut().filter(|n| n.actor == actor) {
            node.actor = ActorId::NONE;
        }
    }
}
