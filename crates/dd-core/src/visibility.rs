//! Filtering of conditional elements against the current key state.
//!
//! Visibility is a view, not stored state: every call re-evaluates the
//! conditions, so results always reflect the latest [`KeyStore`].

use crate::condition::Condition;
use crate::element::Conditional;
use crate::keys::KeyStore;

/// Whether every condition passes. An empty list always passes.
pub fn is_visible(conditions: &[Condition], keys: &KeyStore) -> bool {
    conditions.iter().all(|c| c.evaluate(keys))
}

/// Lazily yield the visible items, preserving order.
pub fn visible<'a, T: Conditional>(
    items: &'a [T],
    keys: &'a KeyStore,
) -> impl Iterator<Item = &'a T> + 'a {
    items
        .iter()
        .filter(move |item| is_visible(item.conditions(), keys))
}

/// Collect the visible items, preserving order.
pub fn filter_visible<'a, T: Conditional>(items: &'a [T], keys: &KeyStore) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| is_visible(item.conditions(), keys))
        .collect()
}
