use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use dd_core::{ActorRegistry, Condition, Element, Node, Output};

pub fn run(file: &Path) -> Result<(), String> {
    let dialogue = super::load(file)?;
    let graph = &dialogue.graph;

    if graph.is_empty() {
        println!("  No nodes.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "ID",
        "Actor",
        "Lines",
        "Options",
        "Redirections",
        "Actions",
        "Output",
    ]);

    for node in graph.nodes() {
        table.add_row(vec![
            node_label(node),
            actor_label(node, &dialogue.actors),
            list(&node.lines, |l| format!("\"{}\"", l.text)),
            list(&node.options, |o| format!("\"{}\" -> {}", o.text, target(o.output))),
            list(&node.redirections, |r| {
                let kind = if r.automatic { "auto" } else { "manual" };
                format!("{kind} -> {}", target(r.output))
            }),
            list(&node.actions, |a| format!("{} {} {}", a.name, a.operation, a.number)),
            target(node.output),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} nodes, {} actors",
        graph.len(),
        dialogue.actors.len()
    );

    Ok(())
}

fn node_label(node: &Node) -> String {
    if node.is_start() {
        format!("{} (start)", node.id)
    } else {
        node.id.to_string()
    }
}

fn actor_label(node: &Node, actors: &ActorRegistry) -> String {
    if node.actor.is_none() {
        return "-".to_string();
    }
    match actors.get(node.actor) {
        Some(actor) => actor.name.clone(),
        None => format!("#{} (missing)", node.actor),
    }
}

fn target(output: Output) -> String {
    output
        .next
        .map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// One row per element, with its conditions appended.
fn list<T>(elements: &[Element<T>], describe: impl Fn(&T) -> String) -> String {
    elements
        .iter()
        .map(|e| {
            let text = describe(&e.body);
            if e.conditions.is_empty() {
                text
            } else {
                format!("{text} [if {}]", conditions(&e.conditions))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn conditions(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(Condition::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}
