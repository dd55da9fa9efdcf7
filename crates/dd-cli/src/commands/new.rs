use std::path::Path;

use dd_core::{ActorRegistry, DialogueFile, DialogueGraph, Element, Output, OutputRef};

pub fn run(file: &Path) -> Result<(), String> {
    if file.exists() {
        return Err(format!("{} already exists", file.display()));
    }

    let dialogue = starter()?;
    dialogue
        .save(file)
        .map_err(|e| format!("cannot write {}: {e}", file.display()))?;

    println!("  Created {}", file.display());
    println!("  Play it with: dd play {}", file.display());

    Ok(())
}

/// A start node leading to one greeting with a goodbye option.
fn starter() -> Result<DialogueFile, String> {
    let mut actors = ActorRegistry::new();
    let narrator = actors.create("Narrator").map_err(|e| e.to_string())?;

    let mut graph = DialogueGraph::new();
    let start = graph.create_start().map_err(|e| e.to_string())?;
    let greeting = graph.create_node().map_err(|e| e.to_string())?;
    graph
        .connect(OutputRef::Node(start), Some(greeting))
        .map_err(|e| e.to_string())?;

    let node = graph
        .node_mut(greeting)
        .ok_or_else(|| format!("node {greeting} vanished"))?;
    node.actor = narrator;
    node.lines = vec![Element::line("Hello there.")];
    node.options = vec![Element::option("Goodbye.", Output::UNSET)];

    Ok(DialogueFile::new(graph, actors))
}
