//! Per-exercise completion ledger.
//!
//! Each exercise maps to one flag per set. Entries are created lazily the
//! first time an exercise is rendered or toggled and keep their length for
//! the rest of the session.

use std::collections::HashMap;

use crate::Exercise;

#[derive(Clone, Debug, Default)]
pub struct CompletionLedger {
    entries: HashMap<String, Vec<bool>>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an all-false entry for `exercise` unless one already exists
    pub fn ensure(&mut self, exercise: &Exercise) -> &[bool] {
        self.entries
            .entry(exercise.name.clone())
            .or_insert_with(|| {
                tracing::debug!(
                    "Initialized ledger entry for '{}' ({} sets)",
                    exercise.name,
                    exercise.set_count
                );
                vec![false; exercise.set_count]
            })
            .as_slice()
    }

    /// Flip one set and return its new value
    ///
    /// The caller checks `set_index < exercise.set_count`.
    pub fn toggle(&mut self, exercise: &Exercise, set_index: usize) -> bool {
        let sets = self
            .entries
            .entry(exercise.name.clone())
            .or_insert_with(|| vec![false; exercise.set_count]);
        sets[set_index] = !sets[set_index];
        sets[set_index]
    }

    pub fn entry(&self, name: &str) -> Option<&[bool]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn is_set_complete(&self, name: &str, set_index: usize) -> bool {
        self.entry(name)
            .and_then(|sets| sets.get(set_index).copied())
            .unwrap_or(false)
    }

    pub fn completed_sets(&self, name: &str) -> usize {
        self.entry(name)
            .map(|sets| sets.iter().filter(|done| **done).count())
            .unwrap_or(0)
    }

    /// Every declared set is present and done
    pub fn is_fully_complete(&self, exercise: &Exercise) -> bool {
        self.entry(&exercise.name)
            .map(|sets| sets.len() == exercise.set_count && sets.iter().all(|done| *done))
            .unwrap_or(false)
    }

    /// Clear every flag for the given exercises, creating entries as needed
    pub fn reset<'a>(&mut self, exercises: impl IntoIterator<Item = &'a Exercise>) {
        for exercise in exercises {
            self.entries
                .insert(exercise.name.clone(), vec![false; exercise.set_count]);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
