//! Conditionally visible node content: lines, options, redirections, and
//! actions.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::keys::KeyOperation;
use crate::node::{NodeId, Output};

/// A piece of node content gated by conditions.
///
/// All conditions must hold for the element to be visible. An element with
/// no conditions is always visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element<T> {
    /// Conditions that must all pass.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// The variant-specific payload.
    #[serde(flatten)]
    pub body: T,
}

impl<T> Element<T> {
    /// Wrap a payload with no conditions.
    pub fn new(body: T) -> Self {
        Self {
            conditions: Vec::new(),
            body,
        }
    }

    /// Add a condition.
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// Anything carrying a condition list.
pub trait Conditional {
    /// The conditions gating this item.
    fn conditions(&self) -> &[Condition];
}

impl<T> Conditional for Element<T> {
    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

impl<C: Conditional + ?Sized> Conditional for &C {
    fn conditions(&self) -> &[Condition] {
        (**self).conditions()
    }
}

/// A line of spoken text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// The text shown to the player.
    pub text: String,
}

/// A player-selectable reply that branches to another node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
    /// Where selecting this option leads.
    #[serde(default)]
    pub output: Output,
}

/// An edge with no text.
///
/// Automatic redirections are followed as soon as a node is reached. Manual
/// ones act as the "continue" link when a node has no visible options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirection {
    /// Follow immediately instead of waiting for input.
    #[serde(default)]
    pub automatic: bool,
    /// The redirection target.
    #[serde(default)]
    pub output: Output,
}

/// A change to one key, applied when the owning node is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The key to change.
    pub name: String,
    /// How to change it.
    pub operation: KeyOperation,
    /// The operand.
    pub number: i32,
}

impl Element<Line> {
    /// A line with the given text.
    pub fn line(text: impl Into<String>) -> Self {
        Self::new(Line { text: text.into() })
    }
}

impl Element<Choice> {
    /// An option with the given text and target.
    pub fn option(text: impl Into<String>, next: impl Into<Output>) -> Self {
        Self::new(Choice {
            text: text.into(),
            output: next.into(),
        })
    }
}

impl Element<Redirection> {
    /// An automatic redirection to `next`.
    pub fn automatic(next: impl Into<Output>) -> Self {
        Self::new(Redirection {
            automatic: true,
            output: next.into(),
        })
    }

    /// A manual redirection to `next`.
    pub fn manual(next: impl Into<Output>) -> Self {
        Self::new(Redirection {
            automatic: false,
            output: next.into(),
        })
    }
}

impl Element<Action> {
    /// An action changing `name` by `operation` and `number`.
    pub fn action(name: impl Into<String>, operation: KeyOperation, number: i32) -> Self {
        Self::new(Action {
            name: name.into(),
            operation,
            number,
        })
    }
}

/// Identifies one element within a node by list and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    /// An entry in `lines`.
    Line(usize),
    /// An entry in `options`.
    Option(usize),
    /// An entry in `redirections`.
    Redirection(usize),
    /// An entry in `actions`.
    Action(usize),
}

impl ElementRef {
    /// Name of the list this reference points into.
    pub fn kind(self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Option(_) => "option",
            Self::Redirection(_) => "redirection",
            Self::Action(_) => "action",
        }
    }

    /// The index within the list.
    pub fn index(self) -> usize {
        match self {
            Self::Line(i) | Self::Option(i) | Self::Redirection(i) | Self::Action(i) => i,
        }
    }
}

/// A borrowed element of any variant.
#[derive(Debug, Clone, Copy)]
pub enum AnyElement<'a> {
    /// A line.
    Line(&'a Element<Line>),
    /// An option.
    Option(&'a Element<Choice>),
    /// A redirection.
    Redirection(&'a Element<Redirection>),
    /// An action.
    Action(&'a Element<Action>),
}

impl AnyElement<'_> {
    /// The node this element links to, if it is an edge.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::Option(o) => o.body.output.next,
            Self::Redirection(r) => r.body.output.next,
            Self::Line(_) | Self::Action(_) => None,
        }
    }
}

impl Conditional for AnyElement<'_> {
    fn conditions(&self) -> &[Condition] {
        match self {
            Self::Line(e) => &e.conditions,
            Self::Option(e) => &e.conditions,
            Self::Redirection(e) => &e.conditions,
            Self::Action(e) => &e.conditions,
        }
    }
}
