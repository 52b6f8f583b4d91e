//! Bounded, newest-first transaction history.

use std::collections::VecDeque;

use super::types::{HISTORY_CAPACITY, Transaction};

/// Ordered transaction log holding at most [`HISTORY_CAPACITY`] entries.
///
/// The most recently recorded transaction is always at index 0; recording
/// past capacity evicts the oldest entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: VecDeque<Transaction>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from entries already ordered newest first.
    ///
    /// Entries beyond capacity (the oldest ones) are dropped.
    pub fn from_newest_first(entries: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            entries: entries.into_iter().take(HISTORY_CAPACITY).collect(),
        }
    }

    /// Prepends `tx` and truncates to capacity.
    pub fn record(&mut self, tx: Transaction) {
        self.entries.push_front(tx);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Most recent transaction, if any.
    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.front()
    }

    /// Transaction at `index` (0 = newest).
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.entries.get(index)
    }

    /// Highest transaction id in the log.
    pub fn max_id(&self) -> Option<u64> {
        self.entries.iter().map(|tx| tx.id).max()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Copies the log into a `Vec`, newest first.
    pub fn to_vec(&self) -> Vec<Transaction> {
        self.entries.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Transaction;
    type IntoIter = std::collections::vec_deque::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
