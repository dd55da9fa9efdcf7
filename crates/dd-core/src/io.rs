//! Reading and writing dialogue files.
//!
//! A dialogue file is pretty-printed JSON holding one graph and the actors
//! it speaks through.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actor::ActorRegistry;
use crate::error::{DialogueError, DialogueResult};
use crate::graph::DialogueGraph;
use crate::keys::KeyStore;

/// Everything the runtime needs to play one dialogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueFile {
    /// The dialogue graph.
    pub graph: DialogueGraph,
    /// Actors referenced by the graph's nodes.
    #[serde(default)]
    pub actors: ActorRegistry,
}

impl DialogueFile {
    /// Bundle a graph with its actors.
    pub fn new(graph: DialogueGraph, actors: ActorRegistry) -> Self {
        Self { graph, actors }
    }

    /// Parse a dialogue from JSON text.
    pub fn from_json(json: &str) -> DialogueResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> DialogueResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a dialogue file from disk.
    pub fn load(path: &Path) -> DialogueResult<Self> {
        let text = read(path)?;
        let file = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            nodes = file.graph.len(),
            actors = file.actors.len(),
            "loaded dialogue"
        );
        Ok(file)
    }

    /// Write this dialogue to disk, replacing any existing file.
    pub fn save(&self, path: &Path) -> DialogueResult<()> {
        write(path, &self.to_json()?)
    }
}

/// Load a saved key store. A missing file yields an empty store.
pub fn load_keys(path: &Path) -> DialogueResult<KeyStore> {
    if !path.exists() {
        return Ok(KeyStore::new());
    }
    Ok(serde_json::from_str(&read(path)?)?)
}

/// Save a key store as pretty JSON.
pub fn save_keys(path: &Path, keys: &KeyStore) -> DialogueResult<()> {
    write(path, &serde_json::to_string_pretty(keys)?)
}

fn read(path: &Path) -> DialogueResult<String> {
    fs::read_to_string(path).map_err(|source| DialogueError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> DialogueResult<()> {
    fs::write(path, contents).map_err(|source| DialogueError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::node::{Node, NodeId};
    use tempfile::TempDir;

    fn sample() -> DialogueFile {
        let mut actors = ActorRegistry::new();
        let goblin = actors.create("Goblin").unwrap();
        let graph = DialogueGraph::from_nodes([
            Node::start(NodeId(1)),
            Node::new(NodeId(1))
                .with_actor(goblin)
                .with_line(Element::line("Hello"))
                .with_option(Element::option("Bye", NodeId(2))),
            Node::new(NodeId(2)),
        ])
        .unwrap();
        DialogueFile::new(graph, actors)
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("goblin.json");
        let file = sample();
        file.save(&path).unwrap();

        let loaded = DialogueFile::load(&path).unwrap();
        assert_eq!(loaded, file);
        assert_eq!(loaded.graph.next_id(), NodeId(3));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = DialogueFile::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DialogueError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_json_error() {
        let err = DialogueFile::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DialogueError::Json(_)));
    }

    #[test]
    fn minimal_file_uses_defaults() {
        let file = DialogueFile::from_json(r#"{"graph":{"nodes":[{"id":0,"output":1}]}}"#).unwrap();
        assert!(file.actors.is_empty());
        assert_eq!(file.graph.start().unwrap().output.next, Some(NodeId(1)));
        assert!(file.graph.start().unwrap().actor.is_none());
    }

    #[test]
    fn keys_round_trip_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keys.json");
        assert!(load_keys(&path).unwrap().is_empty());

        let mut keys = KeyStore::new();
        keys.set("met", 1);
        save_keys(&path, &keys).unwrap();
        assert_eq!(load_keys(&path).unwrap(), keys);
    }
}
