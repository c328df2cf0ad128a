//! Bounded log of material signal changes.

use std::collections::VecDeque;

use crate::types::{Action, HistoryEntry};

/// Entries kept before the oldest is evicted.
pub const HISTORY_CAPACITY: usize = 20;

/// Score change that counts as material even when the action is unchanged.
pub const SCORE_CHANGE_THRESHOLD: i16 = 10;

/// Ring buffer of signal changes, oldest first.
#[derive(Debug, Clone)]
pub struct SignalHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for SignalHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl SignalHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry when the signal changed materially: first entry,
    /// different action, or a score move of at least 10 points.
    ///
    /// Returns whether an entry was appended.
    pub fn record(&mut self, action: Action, score: i8, price: f64, timestamp: i64) -> bool {
        let changed = match self.entries.back() {
            None => true,
            Some(last) => {
                last.action != action
                    || (score as i16 - last.score as i16).abs() >= SCORE_CHANGE_THRESHOLD
            }
        };
        if !changed {
            return false;
        }

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            action,
            score,
            price,
            timestamp,
            color_tag: action.color_tag(),
        });
        true
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
