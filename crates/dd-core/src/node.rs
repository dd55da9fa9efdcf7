use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::actor::ActorId;
use crate::element::{Action, AnyElement, Choice, Element, ElementRef, Line, Redirection};

/// Identifier of a node within one dialogue graph. `0` is the start node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The reserved ID of the start node.
    pub const START: NodeId = NodeId(0);

    /// Whether this is the start node's ID.
    pub fn is_start(self) -> bool {
        self == Self::START
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An edge to another node, stored by ID and resolved on every traversal.
///
/// An unset output is written as `-1` in dialogue files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Output {
    /// The target node, or `None` when unconnected.
    pub next: Option<NodeId>,
}

impl Output {
    /// An unconnected output.
    pub const UNSET: Output = Output { next: None };

    /// An output pointing at `id`.
    pub fn to(id: NodeId) -> Self {
        Self { next: Some(id) }
    }

    /// Whether the output leads anywhere.
    pub fn is_set(&self) -> bool {
        self.next.is_some()
    }
}

impl From<NodeId> for Output {
    fn from(id: NodeId) -> Self {
        Self::to(id)
    }
}

impl From<Option<NodeId>> for Output {
    fn from(next: Option<NodeId>) -> Self {
        Self { next }
    }
}

impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.next {
            Some(id) => serializer.serialize_i64(i64::from(id.0)),
            None => serializer.serialize_i64(-1),
        }
    }
}

impl<'de> Deserialize<'de> for Output {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            return Ok(Self::UNSET);
        }
        let id = u32::try_from(raw).map_err(serde::de::Error::custom)?;
        Ok(Self::to(NodeId(id)))
    }
}

/// A unit of dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique ID within the graph.
    pub id: NodeId,
    /// Speaking actor, `0` for none.
    #[serde(default)]
    pub actor: ActorId,
    /// Spoken lines.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<Element<Line>>,
    /// Player replies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Element<Choice>>,
    /// Textless edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirections: Vec<Element<Redirection>>,
    /// Key changes applied on arrival.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Element<Action>>,
    /// Editor connection anchor for incoming edges. Not read at runtime.
    #[serde(default)]
    pub input: Output,
    /// Default edge, followed when the node has no options or manual
    /// redirection.
    #[serde(default)]
    pub output: Output,
    /// Editor canvas position.
    #[serde(default)]
    pub position: [f32; 2],
}

impl Node {
    /// Create an empty node.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            actor: ActorId::NONE,
            lines: Vec::new(),
            options: Vec::new(),
            redirections: Vec::new(),
            actions: Vec::new(),
            input: Output::UNSET,
            output: Output::UNSET,
            position: [0.0, 0.0],
        }
    }

    /// Create the start node pointing at `first`.
    pub fn start(first: NodeId) -> Self {
        Self::new(NodeId::START).with_output(first)
    }

    /// Whether this is the start node.
    pub fn is_start(&self) -> bool {
        self.id.is_start()
    }

    /// Set the speaking actor.
    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = actor;
        self
    }

    /// Add a line.
    pub fn with_line(mut self, line: Element<Line>) -> Self {
        self.lines.push(line);
        self
    }

    /// Add an option.
    pub fn with_option(mut self, option: Element<Choice>) -> Self {
        self.options.push(option);
        self
    }

    /// Add a redirection.
    pub fn with_redirection(mut self, redirection: Element<Redirection>) -> Self {
        self.redirections.push(redirection);
        self
    }

    /// Add an action.
    pub fn with_action(mut self, action: Element<Action>) -> Self {
        self.actions.push(action);
        self
    }

    /// Set the default output.
    pub fn with_output(mut self, next: impl Into<Output>) -> Self {
        self.output = next.into();
        self
    }

    /// Look up an element by reference.
    pub fn element(&self, at: ElementRef) -> Option<AnyElement<'_>> {
        match at {
            ElementRef::Line(i) => self.lines.get(i).map(AnyElement::Line),
            ElementRef::Option(i) => self.options.get(i).map(AnyElement::Option),
            ElementRef::Redirection(i) => self.redirections.get(i).map(AnyElement::Redirection),
            ElementRef::Action(i) => self.actions.get(i).map(AnyElement::Action),
        }
    }

    /// All elements in list order: lines, options, redirections, actions.
    pub fn elements(&self) -> impl Iterator<Item = AnyElement<'_>> {
        self.lines
            .iter()
            .map(AnyElement::Line)
            .chain(self.options.iter().map(AnyElement::Option))
            .chain(self.redirections.iter().map(AnyElement::Redirection))
            .chain(self.actions.iter().map(AnyElement::Action))
    }

    /// Every outgoing edge target: the default output, then option and
    /// redirection outputs.
    pub fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.output
            .next
            .into_iter()
            .chain(self.elements().filter_map(|e| e.target()))
    }

    /// Mutable references to every output on this node, excluding `input`.
    pub(crate) fn outputs_mut(&mut self) -> impl Iterator<Item = &mut Output> {
        std::iter::once(&mut self.output)
            .chain(self.options.iter_mut().map(|o| &mut o.body.output))
            .chain(self.redirections.iter_mut().map(|r| &mut r.body.output))
    }
}
