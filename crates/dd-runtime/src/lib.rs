//! Conversation runtime for Dynamic Dialogue.
//!
//! A [`Session`] walks a [`dd_core::DialogueGraph`] in response to player
//! input: it skips start and automatically redirected nodes, applies the
//! actions of each node it lands on, tracks the highlighted option, and
//! reports audio cues and runtime diagnostics through pluggable sinks.

/// Session configuration.
pub mod config;
/// Audio cue events.
pub mod cue;
/// Runtime problems found while traversing a graph.
pub mod diagnostics;
/// The conversation session.
pub mod session;

pub use config::SessionConfig;
pub use cue::{Cue, CueLog, CueSink, NullCues, TracingCues};
pub use diagnostics::{Diagnostic, DiagnosticLog, DiagnosticSink, TracingDiagnostics};
pub use session::{Direction, Input, Session};
