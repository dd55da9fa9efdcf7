//! Conversation session: walks a dialogue graph in response to player input.

use std::sync::Arc;

use dd_core::{
    Actor, ActorId, ActorRegistry, DialogueGraph, KeyStore, Node, NodeId, filter_visible, visible,
};

use crate::config::SessionConfig;
use crate::cue::{Cue, CueSink, NullCues};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingDiagnostics};

/// Direction for moving the option highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the first option.
    Up,
    /// Towards the last option.
    Down,
}

/// An abstract player command. Device bindings are up to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Continue, taking the highlighted option if there is one.
    Advance,
    /// Highlight the previous option.
    SelectUp,
    /// Highlight the next option.
    SelectDown,
    /// End the conversation.
    Close,
}

/// The node currently shown to the player.
#[derive(Debug, Clone)]
struct Conversation {
    graph: Arc<DialogueGraph>,
    node: NodeId,
    actor: Option<ActorId>,
    selection: usize,
}

/// Owns the player's key state and at most one active conversation.
///
/// The graph is shared read-only; the session never mutates it. All state
/// changes happen synchronously inside [`Session::open`],
/// [`Session::advance`], [`Session::select`], and [`Session::close`].
#[derive(Debug)]
pub struct Session<C = NullCues, D = TracingDiagnostics> {
    config: SessionConfig,
    keys: KeyStore,
    actors: ActorRegistry,
    active: Option<Conversation>,
    cues: C,
    diagnostics: D,
}

impl Session {
    /// Create a session that discards cues and logs diagnostics.
    pub fn new(actors: ActorRegistry) -> Self {
        Self::with_sinks(actors, NullCues, TracingDiagnostics)
    }
}

impl<C: CueSink, D: DiagnosticSink> Session<C, D> {
    /// Create a session with custom cue and diagnostic sinks.
    pub fn with_sinks(actors: ActorRegistry, cues: C, diagnostics: D) -> Self {
        Self {
            config: SessionConfig::default(),
            keys: KeyStore::new(),
            actors,
            active: None,
            cues,
            diagnostics,
        }
    }

    /// Start from previously saved key state.
    pub fn with_keys(mut self, keys: KeyStore) -> Self {
        self.keys = keys;
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Open a conversation at the configured start node.
    pub fn open(&mut self, graph: impl Into<Arc<DialogueGraph>>) -> bool {
        let start = self.config.start_node;
        self.open_at(graph, start)
    }

    /// Open a conversation at `start`.
    ///
    /// Ignored while another conversation is active. Returns whether a
    /// playable node was reached.
    pub fn open_at(&mut self, graph: impl Into<Arc<DialogueGraph>>, start: NodeId) -> bool {
        if self.active.is_some() {
            tracing::debug!(%start, "conversation already active, open ignored");
            return false;
        }
        if self.resolve(graph.into(), Some(start), None) {
            self.emit(Cue::Open);
            true
        } else {
            false
        }
    }

    /// Move on from the current node.
    ///
    /// The target is the highlighted visible option, else the first visible
    /// manual redirection, else the node's own output.
    pub fn advance(&mut self) {
        let Some(conversation) = &self.active else {
            return;
        };
        let graph = Arc::clone(&conversation.graph);
        let (current, selection) = (conversation.node, conversation.selection);
        let Some(node) = graph.node(current) else {
            self.close();
            return;
        };

        let options = filter_visible(&node.options, &self.keys);
        let next = match options.len().checked_sub(1) {
            Some(last) => options[selection.min(last)].body.output.next,
            None => visible(&node.redirections, &self.keys)
                .find(|r| !r.body.automatic)
                .map_or(node.output.next, |r| r.body.output.next),
        };

        if next.is_some_and(|id| graph.contains(id)) {
            self.emit(Cue::Advance);
        }
        self.resolve(Arc::clone(&graph), next, Some(current));
    }

    /// Move the option highlight, saturating at either end. Returns whether
    /// it moved.
    pub fn select(&mut self, direction: Direction) -> bool {
        let count = self.visible_options().len();
        let Some(conversation) = self.active.as_mut() else {
            return false;
        };
        let selection = conversation.selection;
        conversation.selection = match direction {
            Direction::Down if selection + 1 < count => selection + 1,
            Direction::Up if selection > 0 => selection - 1,
            _ => return false,
        };
        self.emit(Cue::SelectChange);
        true
    }

    /// End the conversation. The close cue only plays if one was active.
    pub fn close(&mut self) {
        if self.active.take().is_some() {
            self.emit(Cue::Close);
        }
    }

    /// Apply one abstract input.
    pub fn handle(&mut self, input: Input) {
        match input {
            Input::Advance => self.advance(),
            Input::SelectUp => {
                self.select(Direction::Up);
            }
            Input::SelectDown => {
                self.select(Direction::Down);
            }
            Input::Close => self.close(),
        }
    }

    // -----------------------------------------------------------------------
    // Presentation queries
    // -----------------------------------------------------------------------

    /// Whether a conversation is active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The graph of the active conversation.
    pub fn graph(&self) -> Option<&DialogueGraph> {
        self.active.as_ref().map(|c| c.graph.as_ref())
    }

    /// The node being shown.
    pub fn current_node(&self) -> Option<&Node> {
        let conversation = self.active.as_ref()?;
        conversation.graph.node(conversation.node)
    }

    /// The actor speaking the current node.
    pub fn current_actor(&self) -> Option<&Actor> {
        self.actors.get(self.active.as_ref()?.actor?)
    }

    /// Text of the current node's visible lines.
    pub fn visible_lines(&self) -> Vec<&str> {
        self.current_node()
            .map(|node| {
                visible(&node.lines, &self.keys)
                    .map(|l| l.body.text.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Text of the current node's visible options.
    pub fn visible_options(&self) -> Vec<&str> {
        self.current_node()
            .map(|node| {
                visible(&node.options, &self.keys)
                    .map(|o| o.body.text.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Index of the highlighted option. Zero when closed.
    pub fn selection_index(&self) -> usize {
        self.active.as_ref().map_or(0, |c| c.selection)
    }

    /// Text of the highlighted option, if the node has options.
    pub fn selected_option(&self) -> Option<&str> {
        self.visible_options().get(self.selection_index()).copied()
    }

    // -----------------------------------------------------------------------
    // State access
    // -----------------------------------------------------------------------

    /// The player's key state.
    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    /// Mutable key state, for hosts that change keys outside dialogue.
    pub fn keys_mut(&mut self) -> &mut KeyStore {
        &mut self.keys
    }

    /// Consume the session, keeping the key state.
    pub fn into_keys(self) -> KeyStore {
        self.keys
    }

    /// The actor registry.
    pub fn actors(&self) -> &ActorRegistry {
        &self.actors
    }

    /// The cue sink.
    pub fn cues(&self) -> &C {
        &self.cues
    }

    /// Mutable cue sink.
    pub fn cues_mut(&mut self) -> &mut C {
        &mut self.cues
    }

    /// The diagnostic sink.
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    fn emit(&mut self, cue: Cue) {
        if self.config.emit_cues {
            self.cues.cue(cue);
        }
    }

    fn fail(&mut self, diagnostic: Diagnostic) -> bool {
        self.diagnostics.report(diagnostic);
        self.close();
        false
    }

    /// Follow `requested` through start and automatic-redirect nodes to the
    /// next playable node, apply its actions, and make it current.
    ///
    /// Closes the conversation when the chain ends, a target is missing, or
    /// a node repeats within this call. Returns whether a node was reached.
    fn resolve(
        &mut self,
        graph: Arc<DialogueGraph>,
        requested: Option<NodeId>,
        mut from: Option<NodeId>,
    ) -> bool {
        let mut visited: Vec<NodeId> = Vec::new();
        let mut next = requested;

        loop {
            let Some(id) = next else {
                self.close();
                return false;
            };
            let Some(node) = graph.node(id) else {
                return self.fail(if id.is_start() {
                    Diagnostic::MissingStart
                } else {
                    Diagnostic::DanglingReference { from, target: id }
                });
            };
            if visited.contains(&id) {
                visited.push(id);
                return self.fail(Diagnostic::RedirectCycle { path: visited });
            }
            visited.push(id);

            if node.is_start() {
                if !node.output.is_set() {
                    return self.fail(Diagnostic::MissingStart);
                }
                next = node.output.next;
                from = Some(id);
                continue;
            }

            if let Some(redirect) =
                visible(&node.redirections, &self.keys).find(|r| r.body.automatic)
            {
                tracing::trace!(node = %id, target = ?redirect.body.output.next, "automatic redirect");
                next = redirect.body.output.next;
                from = Some(id);
                continue;
            }

            for action in filter_visible(&node.actions, &self.keys) {
                let action = &action.body;
                self.keys.apply(&action.name, action.operation, action.number);
                tracing::trace!(
                    key = %action.name,
                    op = %action.operation,
                    amount = action.number,
                    value = self.keys.get(&action.name),
                    "applied action"
                );
            }

            let actor = self.actors.get(node.actor).map(|a| a.id);
            self.active = Some(Conversation {
                graph: Arc::clone(&graph),
                node: id,
                actor,
                selection: 0,
            });
            return true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::CueLog;
    use crate::diagnostics::DiagnosticLog;
    use dd_core::{Comparison, Condition, Element, KeyOperation};
    use proptest::prelude::*;

    type TestSession = Session<CueLog, DiagnosticLog>;

    fn session() -> TestSession {
        let mut actors = ActorRegistry::new();
        actors.insert(Actor::new(ActorId(5), "Goblin"));
        Session::with_sinks(actors, CueLog::new(), DiagnosticLog::new())
    }

    fn graph(nodes: impl IntoIterator<Item = Node>) -> Arc<DialogueGraph> {
        Arc::new(DialogueGraph::from_nodes(nodes).unwrap())
    }

    fn met_is(n: i32) -> Condition {
        Condition::new("met", Comparison::Equals, n)
    }

    /// Start -> 1 ("Hello", option "Bye" -> 2) -> 2 ("Farewell").
    fn greeting() -> Arc<DialogueGraph> {
        graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_actor(ActorId(5))
                .with_line(Element::line("Hello"))
                .with_option(Element::option("Bye", NodeId(2))),
            Node::new(NodeId(2)).with_line(Element::line("Farewell")),
        ])
    }

    #[test]
    fn open_resolves_through_start() {
        let mut s = session();
        assert!(s.open(greeting()));

        assert_eq!(s.current_node().unwrap().id, NodeId(1));
        assert_eq!(s.visible_lines(), ["Hello"]);
        assert_eq!(s.visible_options(), ["Bye"]);
        assert_eq!(s.selection_index(), 0);
        assert_eq!(s.current_actor().unwrap().name, "Goblin");
        assert_eq!(s.cues().cues(), [Cue::Open]);
        assert!(s.diagnostics().is_empty());
    }

    #[test]
    fn open_while_active_is_ignored() {
        let mut s = session();
        s.open(greeting());
        assert!(!s.open_at(greeting(), NodeId(2)));
        assert_eq!(s.current_node().unwrap().id, NodeId(1));
        assert_eq!(s.cues().cues(), [Cue::Open]);
    }

    #[test]
    fn advance_follows_selected_option_then_closes_at_end() {
        let mut s = session();
        s.open(greeting());

        s.advance();
        assert_eq!(s.current_node().unwrap().id, NodeId(2));
        assert_eq!(s.visible_lines(), ["Farewell"]);
        assert!(s.current_actor().is_none());

        // node 2 has no output: the conversation ends quietly
        s.advance();
        assert!(!s.is_active());
        assert!(s.visible_lines().is_empty());
        assert_eq!(s.cues().cues(), [Cue::Open, Cue::Advance, Cue::Close]);
        assert!(s.diagnostics().is_empty());
    }

    #[test]
    fn action_applied_on_arrival() {
        let mut s = session();
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1)).with_action(Element::action("met", KeyOperation::Set, 1)),
        ]));
        assert_eq!(s.keys().get("met"), 1);
    }

    #[test]
    fn gated_action_only_applies_when_visible() {
        let g = graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_action(Element::action("gold", KeyOperation::Add, 10).when(met_is(1)))
                .with_action(Element::action("visits", KeyOperation::Add, 1)),
        ]);

        let mut s = session();
        s.open(Arc::clone(&g));
        assert_eq!(s.keys().get("gold"), 0);
        assert_eq!(s.keys().get("visits"), 1);
        assert!(!s.keys().contains("gold"));

        s.close();
        s.keys_mut().set("met", 1);
        s.open(g);
        assert_eq!(s.keys().get("gold"), 10);
        assert_eq!(s.keys().get("visits"), 2);
    }

    #[test]
    fn sibling_actions_see_arrival_state() {
        let mut s = session();
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_action(Element::action("met", KeyOperation::Set, 1))
                .with_action(Element::action("first_meeting", KeyOperation::Set, 1).when(met_is(0))),
        ]));
        assert_eq!(s.keys().get("met"), 1);
        assert_eq!(s.keys().get("first_meeting"), 1);
    }

    #[test]
    fn option_appears_after_earlier_node_sets_key() {
        let g = graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_line(Element::line("Who goes there?"))
                .with_output(NodeId(2)),
            Node::new(NodeId(2))
                .with_option(Element::option("Remember me?", NodeId(3)).when(met_is(1)))
                .with_option(Element::option("Leave", NodeId(3))),
            Node::new(NodeId(3)).with_action(Element::action("met", KeyOperation::Set, 1)),
        ]);

        let mut s = session();
        s.open_at(Arc::clone(&g), NodeId(2));
        assert_eq!(s.visible_options(), ["Leave"]);

        s.advance();
        assert_eq!(s.current_node().unwrap().id, NodeId(3));
        assert_eq!(s.keys().get("met"), 1);

        s.close();
        s.open_at(g, NodeId(2));
        assert_eq!(s.visible_options(), ["Remember me?", "Leave"]);
    }

    #[test]
    fn dangling_output_reports_and_closes() {
        let mut s = session();
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1)).with_output(NodeId(99)),
        ]));

        s.advance();
        assert!(!s.is_active());
        assert_eq!(
            s.diagnostics().entries(),
            [Diagnostic::DanglingReference {
                from: Some(NodeId(1)),
                target: NodeId(99)
            }]
        );
        // no advance cue for a missing target
        assert_eq!(s.cues().cues(), [Cue::Open, Cue::Close]);
    }

    #[test]
    fn missing_start_node() {
        let mut s = session();
        assert!(!s.open(graph([Node::new(NodeId(1))])));
        assert_eq!(s.diagnostics().entries(), [Diagnostic::MissingStart]);
        assert!(s.cues().cues().is_empty());
    }

    #[test]
    fn unconnected_start_node() {
        let mut s = session();
        assert!(!s.open(graph([Node::new(NodeId::START)])));
        assert_eq!(s.diagnostics().entries(), [Diagnostic::MissingStart]);
    }

    #[test]
    fn open_at_missing_node() {
        let mut s = session();
        assert!(!s.open_at(greeting(), NodeId(42)));
        assert_eq!(
            s.diagnostics().entries(),
            [Diagnostic::DanglingReference {
                from: None,
                target: NodeId(42)
            }]
        );
    }

    #[test]
    fn automatic_redirect_is_transparent() {
        let mut s = session();
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_line(Element::line("never shown"))
                .with_action(Element::action("skipped", KeyOperation::Set, 1))
                .with_redirection(Element::automatic(NodeId(2))),
            Node::new(NodeId(2)).with_line(Element::line("Landed")),
        ]));

        assert_eq!(s.current_node().unwrap().id, NodeId(2));
        assert_eq!(s.visible_lines(), ["Landed"]);
        // actions on pass-through nodes do not run
        assert!(!s.keys().contains("skipped"));
    }

    #[test]
    fn first_visible_automatic_redirect_wins() {
        let g = graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_redirection(Element::automatic(NodeId(2)).when(met_is(1)))
                .with_redirection(Element::automatic(NodeId(3)))
                .with_redirection(Element::automatic(NodeId(2))),
            Node::new(NodeId(2)),
            Node::new(NodeId(3)),
        ]);

        let mut s = session();
        s.open(Arc::clone(&g));
        assert_eq!(s.current_node().unwrap().id, NodeId(3));

        s.close();
        s.keys_mut().set("met", 1);
        s.open(g);
        assert_eq!(s.current_node().unwrap().id, NodeId(2));
    }

    #[test]
    fn hidden_automatic_redirect_leaves_node_playable() {
        let mut s = session();
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_line(Element::line("Stay"))
                .with_redirection(Element::automatic(NodeId(2)).when(met_is(1))),
            Node::new(NodeId(2)),
        ]));
        assert_eq!(s.current_node().unwrap().id, NodeId(1));
    }

    #[test]
    fn automatic_redirect_cycle_is_detected() {
        let mut s = session();
        assert!(!s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1)).with_redirection(Element::automatic(NodeId(2))),
            Node::new(NodeId(2)).with_redirection(Element::automatic(NodeId(1))),
        ])));
        assert!(!s.is_active());
        assert_eq!(
            s.diagnostics().entries(),
            [Diagnostic::RedirectCycle {
                path: vec![NodeId(0), NodeId(1), NodeId(2), NodeId(1)]
            }]
        );
    }

    #[test]
    fn revisiting_a_node_across_advances_is_fine() {
        let mut s = session();
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_action(Element::action("loops", KeyOperation::Add, 1))
                .with_output(NodeId(1)),
        ]));
        s.advance();
        s.advance();
        assert!(s.is_active());
        assert_eq!(s.keys().get("loops"), 3);
        assert!(s.diagnostics().is_empty());
    }

    #[test]
    fn manual_redirect_is_fallback_when_no_options() {
        let g = graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_line(Element::line("Hmm."))
                .with_redirection(Element::manual(NodeId(2)).when(met_is(1)))
                .with_redirection(Element::manual(NodeId(3)))
                .with_output(NodeId(4)),
            Node::new(NodeId(2)),
            Node::new(NodeId(3)),
            Node::new(NodeId(4)),
        ]);

        let mut s = session();
        s.open(Arc::clone(&g));
        s.advance();
        assert_eq!(s.current_node().unwrap().id, NodeId(3));

        s.close();
        s.keys_mut().set("met", 1);
        s.open(g);
        s.advance();
        assert_eq!(s.current_node().unwrap().id, NodeId(2));
    }

    #[test]
    fn options_take_precedence_over_manual_redirect() {
        let mut s = session();
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_option(Element::option("Go", NodeId(2)))
                .with_redirection(Element::manual(NodeId(3)))
                .with_output(NodeId(3)),
            Node::new(NodeId(2)),
            Node::new(NodeId(3)),
        ]));
        s.advance();
        assert_eq!(s.current_node().unwrap().id, NodeId(2));
    }

    #[test]
    fn falls_back_to_output_when_only_gated_options() {
        let mut s = session();
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_option(Element::option("Secret", NodeId(2)).when(met_is(1)))
                .with_output(NodeId(3)),
            Node::new(NodeId(2)),
            Node::new(NodeId(3)),
        ]));
        assert!(s.visible_options().is_empty());
        s.advance();
        assert_eq!(s.current_node().unwrap().id, NodeId(3));
    }

    fn three_options() -> Arc<DialogueGraph> {
        graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_option(Element::option("A", NodeId(2)))
                .with_option(Element::option("B", NodeId(3)))
                .with_option(Element::option("C", NodeId(4))),
            Node::new(NodeId(2)),
            Node::new(NodeId(3)),
            Node::new(NodeId(4)),
        ])
    }

    #[test]
    fn selection_saturates_and_picks_target() {
        let mut s = session();
        s.open(three_options());

        assert!(!s.select(Direction::Up));
        assert!(s.select(Direction::Down));
        assert!(s.select(Direction::Down));
        assert!(!s.select(Direction::Down));
        assert_eq!(s.selection_index(), 2);
        assert_eq!(s.selected_option(), Some("C"));

        assert!(s.select(Direction::Up));
        assert_eq!(s.selection_index(), 1);

        s.advance();
        assert_eq!(s.current_node().unwrap().id, NodeId(3));
        assert_eq!(s.selection_index(), 0);
        assert_eq!(
            s.cues().cues(),
            [
                Cue::Open,
                Cue::SelectChange,
                Cue::SelectChange,
                Cue::SelectChange,
                Cue::Advance
            ]
        );
    }

    #[test]
    fn inputs_while_closed_are_noops() {
        let mut s = session();
        s.advance();
        assert!(!s.select(Direction::Down));
        s.close();
        assert!(s.cues().cues().is_empty());
        assert!(s.diagnostics().is_empty());
        assert_eq!(s.selection_index(), 0);
        assert!(s.selected_option().is_none());
    }

    #[test]
    fn handle_maps_inputs() {
        let mut s = session();
        s.open(three_options());
        s.handle(Input::SelectDown);
        s.handle(Input::Advance);
        assert_eq!(s.current_node().unwrap().id, NodeId(3));
        s.handle(Input::Close);
        assert!(!s.is_active());
    }

    #[test]
    fn cues_can_be_disabled() {
        let mut s = session().with_config(SessionConfig::default().with_cues(false));
        s.open(greeting());
        s.advance();
        assert!(s.cues().cues().is_empty());
    }

    #[test]
    fn configured_start_node() {
        let mut s = session().with_config(SessionConfig::default().with_start_node(NodeId(2)));
        s.open(greeting());
        assert_eq!(s.current_node().unwrap().id, NodeId(2));
    }

    #[test]
    fn keys_persist_across_conversations() {
        let mut keys = KeyStore::new();
        keys.set("met", 1);
        let mut s = session().with_keys(keys);
        s.open(graph([
            Node::start(NodeId(1)),
            Node::new(NodeId(1)).with_action(Element::action("met", KeyOperation::Add, 1)),
        ]));
        let keys = s.into_keys();
        assert_eq!(keys.get("met"), 2);
    }

    proptest! {
        #[test]
        fn selection_always_within_visible_options(moves in proptest::collection::vec(any::<bool>(), 0..20)) {
            let mut s = session();
            s.open(three_options());
            for down in moves {
                s.select(if down { Direction::Down } else { Direction::Up });
                prop_assert!(s.selection_index() < 3);
            }
        }

        #[test]
        fn current_node_never_start_or_auto_redirect(met in 0i32..3) {
            let mut s = session();
            s.keys_mut().set("met", met);
            s.open(graph([
                Node::start(NodeId(1)),
                Node::new(NodeId(1)).with_redirection(Element::automatic(NodeId(2)).when(met_is(1))),
                Node::new(NodeId(2)).with_redirection(Element::automatic(NodeId(3)).when(met_is(2))),
                Node::new(NodeId(3)),
            ]));
            let node = s.current_node().unwrap();
            prop_assert!(!node.is_start());
            let keys = s.keys();
            prop_assert!(visible(&node.redirections, keys).all(|r| !r.body.automatic));
        }
    }
}
