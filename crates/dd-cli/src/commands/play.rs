//! Play a dialogue in the terminal, one command per line.

use std::io::{self, BufRead};
use std::path::Path;

use colored::Colorize;
use dd_core::io::{load_keys, save_keys};
use dd_core::{KeySort, KeyStore, NodeId};
use dd_runtime::{
    CueSink, DiagnosticSink, Input, Session, SessionConfig, TracingCues, TracingDiagnostics,
};

pub fn run(
    file: &Path,
    start: u32,
    keys_path: Option<&Path>,
    script: Option<&str>,
) -> Result<(), String> {
    let dialogue = super::load(file)?;
    let keys = match keys_path {
        Some(path) => {
            load_keys(path).map_err(|e| format!("cannot load {}: {e}", path.display()))?
        }
        None => KeyStore::new(),
    };

    let config = SessionConfig::default().with_start_node(NodeId(start));
    let mut session = Session::with_sinks(dialogue.actors, TracingCues, TracingDiagnostics)
        .with_keys(keys)
        .with_config(config);

    if !session.open(dialogue.graph) {
        return Err(format!("could not open a conversation at node {start}"));
    }
    render(&session);

    let commands: Box<dyn Iterator<Item = String>> = match script {
        Some(script) => Box::new(
            script
                .split(',')
                .map(|c| c.trim().to_string())
                .collect::<Vec<_>>()
                .into_iter(),
        ),
        None => Box::new(io::stdin().lock().lines().map_while(Result::ok)),
    };

    for command in commands {
        let Some(input) = parse_input(&command) else {
            eprintln!("  unknown command '{command}' (n)ext, (u)p, (d)own, (q)uit");
            continue;
        };
        tracing::debug!(?input, "player input");
        session.handle(input);
        if !session.is_active() {
            break;
        }
        render(&session);
    }
    session.close();
    println!();
    println!("  {}", "Conversation ended.".dimmed());

    let keys = session.into_keys();
    print_keys(&keys);
    if let Some(path) = keys_path {
        save_keys(path, &keys).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        println!("  Saved keys to {}", path.display());
    }

    Ok(())
}

fn parse_input(command: &str) -> Option<Input> {
    match command.to_lowercase().as_str() {
        "" | "n" | "next" => Some(Input::Advance),
        "u" | "up" => Some(Input::SelectUp),
        "d" | "down" => Some(Input::SelectDown),
        "q" | "quit" => Some(Input::Close),
        _ => None,
    }
}

fn render<C: CueSink, D: DiagnosticSink>(session: &Session<C, D>) {
    println!();
    if let Some(actor) = session.current_actor() {
        println!("  {}", actor.name.bold());
    }
    for line in session.visible_lines() {
        println!("  {line}");
    }

    let selected = session.selection_index();
    for (i, option) in session.visible_options().iter().enumerate() {
        if i == selected {
            println!("  {}", format!("> {option}").green());
        } else {
            println!("    {option}");
        }
    }
}

fn print_keys(keys: &KeyStore) {
    if keys.is_empty() {
        return;
    }
    println!();
    for key in keys.sorted(KeySort::Name, false) {
        println!("  {} = {}", key.name, key.number);
    }
}
