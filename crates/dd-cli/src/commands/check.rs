use std::path::Path;

use colored::Colorize;
use dd_core::{Severity, validate_file};

pub fn run(file: &Path) -> Result<(), String> {
    let dialogue = super::load(file)?;
    let issues = validate_file(&dialogue.graph, &dialogue.actors);
    tracing::debug!(path = %file.display(), issues = issues.len(), "validated dialogue");

    for issue in &issues {
        let rendered = issue.to_string();
        match issue.severity {
            Severity::Error => eprintln!("  {}", rendered.red()),
            Severity::Warning => eprintln!("  {}", rendered.yellow()),
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        return Err(format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ));
    }

    println!("  All checks passed for '{}'.", file.display());
    println!(
        "  {} nodes, {} actors",
        dialogue.graph.len(),
        dialogue.actors.len()
    );
    if warnings > 0 {
        println!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
