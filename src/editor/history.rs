//! Bounded undo/redo history over full snapshots.
//!
//! The history is a sliding window: once `capacity` snapshots are stored,
//! committing another evicts the oldest one. The cursor marks the snapshot
//! currently displayed; everything after it is redo state.

use std::collections::VecDeque;

/// Default number of snapshots kept, including the freshly loaded state.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// A bounded list of snapshots with a cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: VecDeque<T>,
    index: usize,
    capacity: usize,
}

impl<T> History<T> {
    /// Create an empty history holding at most `capacity` snapshots.
    ///
    /// A capacity of zero is raised to one so the loaded state always fits.
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Drop everything and start over from `initial` (cursor 0).
    pub fn reset(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push_back(initial);
        self.index = 0;
    }

    /// Record a new state after the cursor.
    ///
    /// Redo states are discarded first. When the window is full the oldest
    /// snapshot is evicted and the cursor stays on the new tail.
    pub fn commit(&mut self, snapshot: T) {
        if self.snapshots.is_empty() {
            self.reset(snapshot);
            return;
        }

        if self.index + 1 < self.snapshots.len() {
            self.snapshots.truncate(self.index + 1);
        }

        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        } else {
            self.index += 1;
        }
    }

    /// Step the cursor back. Returns the snapshot to display, or `None` at
    /// the oldest state.
    pub fn undo(&mut self) -> Option<&T> {
        if self.index == 0 || self.snapshots.is_empty() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Step the cursor forward. Returns the snapshot to display, or `None`
    /// at the newest state.
    pub fn redo(&mut self) -> Option<&T> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.snapshots.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}
