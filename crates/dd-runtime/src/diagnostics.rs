//! Non-fatal problems found while walking a graph.
//!
//! None of these interrupt the host. The session reports them to a
//! [`DiagnosticSink`] and closes the conversation.

use std::fmt;

use dd_core::NodeId;

/// Something went wrong while resolving the next node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An output named a node that does not exist.
    DanglingReference {
        /// The node whose output was followed, if any.
        from: Option<NodeId>,
        /// The missing target.
        target: NodeId,
    },
    /// The start node is missing or its output is unset.
    MissingStart,
    /// Pass-through nodes led back to a node already visited in the same
    /// resolve.
    RedirectCycle {
        /// Nodes visited, ending with the repeated one.
        path: Vec<NodeId>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingReference {
                from: Some(from),
                target,
            } => write!(f, "node {from}: a node with ID {target} was not found"),
            Self::DanglingReference { from: None, target } => {
                write!(f, "a node with ID {target} was not found")
            }
            Self::MissingStart => f.write_str("no start node found"),
            Self::RedirectCycle { path } => {
                let route: Vec<String> = path.iter().map(|id| id.to_string()).collect();
                write!(f, "redirect loop: {}", route.join(" -> "))
            }
        }
    }
}

/// Receives diagnostics as they happen.
pub trait DiagnosticSink {
    /// Handle one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Logs diagnostics as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "dialogue diagnostic");
    }
}

/// Collects diagnostics and also logs them.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics received so far.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Whether anything was reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn report(&mut self, diagnostic: Diagnostic) {
        TracingDiagnostics.report(diagnostic.clone());
        self.entries.push(diagnostic);
    }
}
