//! Full playthroughs of dialogues loaded from JSON.

use std::sync::Arc;

use dd_core::{DialogueFile, DialogueGraph, KeyStore, NodeId};
use dd_runtime::{Cue, CueLog, Diagnostic, DiagnosticLog, Direction, Input, Session};

const INNKEEPER: &str = r#"{
  "graph": {
    "nodes": [
      { "id": 0, "output": 1 },
      {
        "id": 1,
        "actor": 1,
        "lines": [
          { "text": "Welcome, stranger.", "conditions": [{ "name": "visits", "operation": "equals", "number": 0 }] },
          { "text": "Back again?", "conditions": [{ "name": "visits", "operation": "greater_than", "number": 0 }] }
        ],
        "options": [
          { "text": "A room, please.", "output": 2 },
          { "text": "The usual.", "output": 3, "conditions": [{ "name": "visits", "operation": "greater_or_equal", "number": 2 }] },
          { "text": "Goodbye.", "output": -1 }
        ],
        "actions": [{ "name": "visits", "operation": "add", "number": 1 }]
      },
      {
        "id": 2,
        "actor": 1,
        "lines": [{ "text": "That will be five gold." }],
        "actions": [{ "name": "gold", "operation": "subtract", "number": 5 }],
        "output": -1
      },
      {
        "id": 3,
        "redirections": [{ "automatic": true, "output": 2 }]
      }
    ]
  },
  "actors": { "actors": [{ "id": 1, "name": "Innkeeper" }] }
}"#;

fn load() -> (Arc<DialogueGraph>, DialogueFile) {
    let file = DialogueFile::from_json(INNKEEPER).unwrap();
    (Arc::new(file.graph.clone()), file)
}

#[test]
fn first_visit_then_return() {
    let (graph, file) = load();
    let mut keys = KeyStore::new();
    keys.set("gold", 20);
    let mut session = Session::with_sinks(file.actors, CueLog::new(), DiagnosticLog::new())
        .with_keys(keys);

    assert!(session.open(Arc::clone(&graph)));
    assert_eq!(session.current_actor().unwrap().name, "Innkeeper");
    // lines are filtered after the node's own actions run
    assert_eq!(session.visible_lines(), ["Back again?"]);
    assert_eq!(session.visible_options(), ["A room, please.", "Goodbye."]);

    session.advance();
    assert_eq!(session.visible_lines(), ["That will be five gold."]);
    assert_eq!(session.keys().get("gold"), 15);
    session.advance();
    assert!(!session.is_active());

    session.open(Arc::clone(&graph));
    assert_eq!(session.keys().get("visits"), 2);
    assert_eq!(
        session.visible_options(),
        ["A room, please.", "The usual.", "Goodbye."]
    );

    // "The usual." jumps to a pass-through node that lands on node 2
    session.select(Direction::Down);
    session.advance();
    assert_eq!(session.current_node().unwrap().id, NodeId(2));
    assert_eq!(session.keys().get("gold"), 10);

    assert!(session.diagnostics().is_empty());
}

#[test]
fn goodbye_option_ends_quietly() {
    let (graph, file) = load();
    let mut session = Session::with_sinks(file.actors, CueLog::new(), DiagnosticLog::new());

    session.open(graph);
    session.handle(Input::SelectDown);
    session.handle(Input::Advance);

    assert!(!session.is_active());
    assert!(session.diagnostics().is_empty());
    assert_eq!(
        session.cues().cues(),
        [Cue::Open, Cue::SelectChange, Cue::Close]
    );
}

#[test]
fn removed_node_clears_references() {
    let (_, mut file) = load();
    let removed = file.graph.remove_node(NodeId(2)).unwrap();
    assert_eq!(removed.id, NodeId(2));

    // removing node 2 cleared the redirection that pointed at it
    let pass_through = file.graph.node(NodeId(3)).unwrap();
    assert!(!pass_through.redirections[0].body.output.is_set());

    let mut session = Session::with_sinks(file.actors, CueLog::new(), DiagnosticLog::new());
    let graph = Arc::new(file.graph);
    assert!(session.open(Arc::clone(&graph)));
    session.close();
    assert!(!session.open_at(graph, NodeId(7)));
    assert_eq!(
        session.diagnostics().entries(),
        [Diagnostic::DanglingReference {
            from: None,
            target: NodeId(7)
        }]
    );
}
