//! Persistent named integer counters that dialogue conditions read and
//! actions write.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single named counter, as stored on disk and listed by tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// The key name.
    pub name: String,
    /// The current value.
    pub number: i32,
}

impl Key {
    /// Create a key with the given name and value.
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}

/// How an action changes a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOperation {
    /// Add the amount to the current value.
    Add,
    /// Subtract the amount from the current value.
    Subtract,
    /// Replace the current value with the amount.
    Set,
}

impl std::fmt::Display for KeyOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+=",
            Self::Subtract => "-=",
            Self::Set => "=",
        };
        f.write_str(symbol)
    }
}

/// Sort order for [`KeyStore::sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySort {
    /// Order by key name.
    Name,
    /// Order by value, ties broken by name.
    Number,
}

/// The player's key state. Absent keys read as zero.
///
/// Keys are only ever created or changed by [`KeyStore::apply`] during a
/// conversation. [`KeyStore::remove`] exists for authoring tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Key>", into = "Vec<Key>")]
pub struct KeyStore {
    values: BTreeMap<String, i32>,
}

impl KeyStore {
    /// Create an empty key store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a key, or 0 if it has never been set.
    pub fn get(&self, name: &str) -> i32 {
        self.values.get(name).copied().unwrap_or(0)
    }

    /// Whether the key has been created.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Apply an action's operation to a key, creating it if needed.
    pub fn apply(&mut self, name: &str, operation: KeyOperation, amount: i32) {
        match operation {
            KeyOperation::Add => {
                let value = self.entry(name);
                *value = value.wrapping_add(amount);
            }
            KeyOperation::Subtract => {
                let value = self.entry(name);
                *value = value.wrapping_sub(amount);
            }
            KeyOperation::Set => self.set(name, amount),
        }
    }

    fn entry(&mut self, name: &str) -> &mut i32 {
        self.values.entry(name.to_string()).or_insert(0)
    }

    /// Assign a value directly, creating the key if needed.
    pub fn set(&mut self, name: impl Into<String>, number: i32) {
        self.values.insert(name.into(), number);
    }

    /// Delete a key. Returns its last value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<i32> {
        self.values.remove(name)
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys have been created.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Snapshot of all keys in the requested order.
    pub fn sorted(&self, by: KeySort, descending: bool) -> Vec<Key> {
        let mut keys: Vec<Key> = self.iter().map(|(n, v)| Key::new(n, v)).collect();
        if by == KeySort::Number {
            keys.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));
        }
        if descending {
            keys.reverse();
        }
        keys
    }
}

impl From<Vec<Key>> for KeyStore {
    fn from(keys: Vec<Key>) -> Self {
        Self {
            values: keys.into_iter().map(|k| (k.name, k.number)).collect(),
        }
    }
}

impl From<KeyStore> for Vec<Key> {
    fn from(store: KeyStore) -> Self {
        store
            .values
            .into_iter()
            .map(|(name, number)| Key { name, number })
            .collect()
    }
}
