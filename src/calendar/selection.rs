use indexmap::IndexSet;

use crate::calendar::date::DateKey;

/// Selected date keys in the order they were picked.
///
/// Equality compares membership only; use [`SelectionStore::render`] when
/// order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    keys: IndexSet<DateKey>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store with `key` removed if present, appended otherwise.
    #[must_use]
    pub fn toggle(&self, key: &DateKey) -> Self {
        let mut keys = self.keys.clone();
        if !keys.shift_remove(key) {
            keys.insert(key.clone());
        }
        Self { keys }
    }

    pub fn is_selected(&self, key: &DateKey) -> bool {
        self.keys.contains(key)
    }

    pub fn render(&self) -> Vec<DateKey> {
        self.keys.iter().cloned().collect()
    }

    /// `[k1, k2, ...]`
    pub fn display(&self) -> String {
        let joined = self
            .keys
            .iter()
            .map(DateKey::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{joined}]")
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::default()
    }
}

impl FromIterator<DateKey> for SelectionStore {
    fn from_iter<I: IntoIterator<Item = DateKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
