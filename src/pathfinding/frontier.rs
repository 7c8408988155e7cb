//! Stable priority frontier.

use std::collections::VecDeque;

/// A min-priority queue that is FIFO among equal priorities.
///
/// Items are kept sorted; a new item goes after every queued item with a
/// lower or equal priority, so discovery order survives ties. Each station
/// is queued at most once at a time.
#[derive(Debug)]
pub(crate) struct Frontier {
    items: VecDeque<(u64, usize)>,
    queued: Vec<bool>,
}

impl Frontier {
    pub(crate) fn new(num_stations: usize) -> Self {
        Self {
            items: VecDeque::new(),
            queued: vec![false; num_stations],
        }
    }

    /// Queues `station`. Returns `false` (and leaves the queue untouched)
    /// if it is already queued.
    pub(crate) fn push(&mut self, station: usize, priority: u64) -> bool {
        if self.queued[station] {
            return false;
        }
        let at = self.items.partition_point(|&(p, _)| p <= priority);
        self.items.insert(at, (priority, station));
        self.queued[station] = true;
        true
    }

    /// Removes the lowest-priority (earliest inserted on ties) station.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        let (_, station) = self.items.pop_front()?;
        self.queued[station] = false;
        Some(station)
    }
}
