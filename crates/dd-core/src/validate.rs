//! Static checks over an authored dialogue graph.
//!
//! These are the problems the runtime would only discover mid-conversation:
//! missing start node, dangling outputs, redirect loops. Conditions are
//! ignored, so every edge counts as possibly taken.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::actor::ActorRegistry;
use crate::graph::DialogueGraph;
use crate::node::NodeId;

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The dialogue cannot be played correctly.
    Error,
    /// The dialogue plays but probably not as intended.
    Warning,
}

/// A problem found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// How serious the issue is.
    pub severity: Severity,
    /// The node where the issue was found, if any.
    pub node: Option<NodeId>,
    /// A human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn error(node: Option<NodeId>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            node,
            message: message.into(),
        }
    }

    fn warning(node: Option<NodeId>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            node,
            message: message.into(),
        }
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match self.node {
            Some(node) => write!(f, "{level}: node {node}: {}", self.message),
            None => write!(f, "{level}: {}", self.message),
        }
    }
}

/// Validate a graph on its own.
pub fn validate_graph(graph: &DialogueGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_start(graph, &mut issues);
    check_duplicates(graph, &mut issues);
    check_dangling(graph, &mut issues);
    check_reachability(graph, &mut issues);
    check_redirect_cycles(graph, &mut issues);

    issues
}

/// Validate a graph together with the actors its nodes refer to.
pub fn validate_file(graph: &DialogueGraph, actors: &ActorRegistry) -> Vec<ValidationIssue> {
    let mut issues = validate_graph(graph);
    for node in graph.nodes() {
        if !node.actor.is_none() && actors.get(node.actor).is_none() {
            issues.push(ValidationIssue::warning(
                Some(node.id),
                format!("actor {} is not registered", node.actor),
            ));
        }
    }
    issues
}

fn check_start(graph: &DialogueGraph, issues: &mut Vec<ValidationIssue>) {
    match graph.start() {
        None => issues.push(ValidationIssue::error(None, "no start node found")),
        Some(start) if !start.output.is_set() => issues.push(ValidationIssue::error(
            Some(NodeId::START),
            "start node output is not connected",
        )),
        Some(_) => {}
    }
}

fn check_duplicates(graph: &DialogueGraph, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for node in graph.nodes() {
        if !seen.insert(node.id) && reported.insert(node.id) {
            issues.push(ValidationIssue::error(
                Some(node.id),
                "duplicate node ID; only the first node with this ID is reachable",
            ));
        }
    }
}

fn check_dangling(graph: &DialogueGraph, issues: &mut Vec<ValidationIssue>) {
    for node in graph.nodes() {
        for target in node.targets() {
            if !graph.contains(target) {
                issues.push(ValidationIssue::warning(
                    Some(node.id),
                    format!("output points to missing node {target}"),
                ));
            }
        }
    }
}

fn check_reachability(graph: &DialogueGraph, issues: &mut Vec<ValidationIssue>) {
    if graph.start().is_none() {
        return;
    }

    let mut reached = HashSet::from([NodeId::START]);
    let mut queue = VecDeque::from([NodeId::START]);
    while let Some(id) = queue.pop_front() {
        let Some(node) = graph.node(id) else { continue };
        for target in node.targets() {
            if graph.contains(target) && reached.insert(target) {
                queue.push_back(target);
            }
        }
    }

    let mut reported = HashSet::new();
    for node in graph.nodes() {
        if !reached.contains(&node.id) && reported.insert(node.id) {
            issues.push(ValidationIssue::warning(
                Some(node.id),
                "unreachable from the start node",
            ));
        }
    }
}

/// Edges that are followed without player input: the start node's output
/// and every automatic redirection.
fn pass_through_edges(graph: &DialogueGraph) -> HashMap<NodeId, Vec<NodeId>> {
    let mut edges: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for node in graph.nodes() {
        if edges.contains_key(&node.id) {
            continue;
        }
        let targets = edges.entry(node.id).or_default();
        if node.is_start() {
            targets.extend(node.output.next);
        }
        targets.extend(
            node.redirections
                .iter()
                .filter(|r| r.body.automatic)
                .filter_map(|r| r.body.output.next)
                .filter(|t| graph.contains(*t)),
        );
    }
    edges
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Open,
    Done,
}

fn check_redirect_cycles(graph: &DialogueGraph, issues: &mut Vec<ValidationIssue>) {
    let edges = pass_through_edges(graph);
    let mut marks: HashMap<NodeId, Mark> = HashMap::new();
    let mut reported: HashSet<Vec<NodeId>> = HashSet::new();

    let mut roots: Vec<NodeId> = edges.keys().copied().collect();
    roots.sort();

    for root in roots {
        if marks.contains_key(&root) {
            continue;
        }
        let mut path = Vec::new();
        visit(root, &edges, &mut marks, &mut path, &mut |cycle: &[NodeId]| {
            let mut key = cycle.to_vec();
            key.sort();
            if reported.insert(key) {
                let route: Vec<String> = cycle
                    .iter()
                    .chain(cycle.first())
                    .map(|id| id.to_string())
                    .collect();
                issues.push(ValidationIssue::warning(
                    Some(cycle[0]),
                    format!("automatic redirections form a loop: {}", route.join(" -> ")),
                ));
            }
        });
    }
}

fn visit(
    id: NodeId,
    edges: &HashMap<NodeId, Vec<NodeId>>,
    marks: &mut HashMap<NodeId, Mark>,
    path: &mut Vec<NodeId>,
    on_cycle: &mut dyn FnMut(&[NodeId]),
) {
    marks.insert(id, Mark::Open);
    path.push(id);

    for &next in edges.get(&id).map(Vec::as_slice).unwrap_or_default() {
        match marks.get(&next) {
            Some(Mark::Open) => {
                if let Some(pos) = path.iter().position(|&p| p == next) {
                    on_cycle(&path[pos..]);
                }
            }
            Some(Mark::Done) => {}
            None => visit(next, edges, marks, path, on_cycle),
        }
    }

    path.pop();
    marks.insert(id, Mark::Done);
}
