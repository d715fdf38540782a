//! Bounded real-time window.
//!
//! A FIFO ring of the most recent `capacity` correlated samples.  Pushing
//! onto a full window evicts the oldest entry, so `len() <= capacity()`
//! holds at all times.

use std::collections::VecDeque;

use chrono::NaiveDateTime;

/// One point of the live view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry {
    pub timestamp: NaiveDateTime,
    pub lux: u16,
    pub humidity: u16,
}

#[derive(Debug, Clone)]
pub struct RealTimeWindow {
    entries: VecDeque<WindowEntry>,
    capacity: usize,
}

impl RealTimeWindow {
    /// `capacity` is clamped to at least one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, returning the one evicted to make room (if any).
    pub fn push(&mut self, entry: WindowEntry) -> Option<WindowEntry> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    pub fn latest(&self) -> Option<&WindowEntry> {
        self.entries.back()
    }

    pub fn latest_mut(&mut self) -> Option<&mut WindowEntry> {
        self.entries.back_mut()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &WindowEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<WindowEntry> {
        self.entries.iter().copied().collect()
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
