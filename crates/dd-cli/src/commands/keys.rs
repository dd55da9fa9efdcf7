use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use dd_core::io::{load_keys, save_keys};
use dd_core::{KeySort, KeyStore};

pub fn run(file: &Path, sort: KeySort, descending: bool) -> Result<(), String> {
    let keys = load(file)?;

    if keys.is_empty() {
        println!("  No keys.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Value"]);
    for key in keys.sorted(sort, descending) {
        table.add_row(vec![key.name, key.number.to_string()]);
    }

    println!("{table}");
    println!();
    println!("  {} keys", keys.len());

    Ok(())
}

/// Create a key, or overwrite the value of an existing one.
pub fn set(file: &Path, name: &str, number: i32) -> Result<(), String> {
    let mut keys = load(file)?;
    let previous = keys.contains(name).then(|| keys.get(name));
    keys.set(name, number);
    save(file, &keys)?;

    match previous {
        Some(old) => println!("  Updated {name}: {old} -> {number}"),
        None => println!("  Created {name} = {number}"),
    }
    Ok(())
}

pub fn remove(file: &Path, name: &str) -> Result<(), String> {
    let mut keys = load(file)?;
    let old = keys
        .remove(name)
        .ok_or_else(|| format!("key not found: \"{name}\""))?;
    save(file, &keys)?;

    println!("  Removed {name} (was {old})");
    Ok(())
}

fn load(file: &Path) -> Result<KeyStore, String> {
    load_keys(file).map_err(|e| format!("cannot load {}: {e}", file.display()))
}

fn save(file: &Path, keys: &KeyStore) -> Result<(), String> {
    save_keys(file, keys).map_err(|e| format!("cannot write {}: {e}", file.display()))?;
    tracing::debug!(path = %file.display(), keys = keys.len(), "saved key store");
    Ok(())
}
