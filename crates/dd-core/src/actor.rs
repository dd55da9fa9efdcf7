//! Speaking characters and the registry that numbers them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DialogueError, DialogueResult};
use crate::graph::DialogueGraph;

/// Identifier of an actor. `0` means "no actor".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ActorId(pub u32);

impl ActorId {
    /// The "no actor" sentinel.
    pub const NONE: ActorId = ActorId(0);

    /// Whether this is the sentinel.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen anchor for statically placed dialogue boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Anchor {
    UpperLeft,
    UpperCenter,
    UpperRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    LowerLeft,
    #[default]
    LowerCenter,
    LowerRight,
}

/// Where the presentation layer should draw an actor's dialogue box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Placement {
    /// Fixed screen anchor plus a screen-relative offset.
    Static {
        /// The anchor.
        anchor: Anchor,
        /// Fractional screen offset.
        offset: [f32; 2],
    },
    /// Follows a world object.
    Dynamic {
        /// Host-defined handle of the tracked object.
        target: Option<String>,
        /// Offset from the object in its local axes.
        offset: [f32; 3],
        /// Place above the object's bounds instead of its origin.
        auto_position: bool,
    },
}

impl Default for Placement {
    fn default() -> Self {
        Self::Static {
            anchor: Anchor::default(),
            offset: [0.0, 0.0],
        }
    }
}

/// A speaking character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique actor ID.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Host-defined portrait handle.
    #[serde(default)]
    pub portrait: Option<String>,
    /// Draw the portrait on the right.
    #[serde(default)]
    pub portrait_right: bool,
    /// Dialogue box placement.
    #[serde(default)]
    pub placement: Placement,
}

impl Actor {
    /// Create an actor with default presentation settings.
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            portrait: None,
            portrait_right: false,
            placement: Placement::default(),
        }
    }
}

/// Ordered list of actors with ID allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRegistry {
    actors: Vec<Actor>,
    #[serde(default = "first_id")]
    next_id: u32,
}

fn first_id() -> u32 {
    1
}

impl Default for ActorRegistry {
    fn default() -> Self {
        Self {
            actors: Vec::new(),
            next_id: first_id(),
        }
    }
}

impl ActorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new actor with a fresh ID.
    pub fn create(&mut self, name: impl Into<String>) -> DialogueResult<ActorId> {
        let mut next = self.next_id.max(first_id());
        while self.actors.iter().any(|a| a.id.0 == next) {
            next = next
                .checked_add(1)
                .ok_or(DialogueError::IdsExhausted("actor"))?;
        }
        let id = ActorId(next);
        self.next_id = next.saturating_add(1);
        self.actors.push(Actor::new(id, name));
        Ok(id)
    }

    /// Register a prepared actor, replacing any actor with the same ID.
    pub fn insert(&mut self, actor: Actor) {
        self.next_id = self.next_id.max(actor.id.0.saturating_add(1));
        match self.actors.iter_mut().find(|a| a.id == actor.id) {
            Some(existing) => *existing = actor,
            None => self.actors.push(actor),
        }
    }

    /// Look up an actor. The sentinel never resolves.
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        if id.is_none() {
            return None;
        }
        self.actors.iter().find(|a| a.id == id)
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// Remove an actor and clear it from every node in `graphs`.
    pub fn remove<'a>(
        &mut self,
        id: ActorId,
        graphs: impl IntoIterator<Item = &'a mut DialogueGraph>,
    ) -> Option<Actor> {
        let pos = self.actors.iter().position(|a| a.id == id)?;
        for graph in graphs {
            graph.clear_actor(id);
        }
        Some(self.actors.remove(pos))
    }

    /// Move an actor one place earlier. Returns whether it moved.
    pub fn move_up(&mut self, id: ActorId) -> bool {
        match self.actors.iter().position(|a| a.id == id) {
            Some(pos) if pos > 0 => {
                self.actors.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    /// Move an actor one place later. Returns whether it moved.
    pub fn move_down(&mut self, id: ActorId) -> bool {
        match self.actors.iter().position(|a| a.id == id) {
            Some(pos) if pos + 1 < self.actors.len() => {
                self.actors.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// All actors in list order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Number of registered actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether no actors are registered.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
