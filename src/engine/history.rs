use std::collections::VecDeque;

use super::grid::{Grid, Score};

/// Maximum number of moves that can be undone.
pub const HISTORY_LIMIT: usize = 10;

/// The state of a session immediately before a move was applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: Score,
}

/// History is a bounded stack of snapshots. Pushing past the limit drops the oldest entry;
/// popping yields the most recent one.
#[derive(Clone, Debug, Default)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
}

impl History {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > HISTORY_LIMIT {
            let _ = self.snapshots.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
