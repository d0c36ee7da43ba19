use std::cmp::Ordering;
use std::collections::BinaryHeap;

use grid_util::point::Point;

/// An entry waiting in the [Frontier]. Carries the insertion sequence number
/// so that entries with equal keys pop in insertion order.
struct FrontierEntry {
    key: i32,
    seq: u64,
    cell: Point,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key.eq(&other.key) && self.seq.eq(&other.seq)
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted on both fields: BinaryHeap is a max-heap, the frontier
        // must pop the smallest key and, among equal keys, the oldest entry.
        match other.key.cmp(&self.key) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

/// The set of discovered-but-not-finalized cells, ordered by priority key.
///
/// Duplicate positions are allowed: rediscovering a queued cell with a
/// cheaper key pushes a second entry instead of mutating the first, and the
/// search layer discards the stale entry when it eventually pops. This trades
/// a little heap growth for not needing decrease-key support.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    seq: u64,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    pub fn push(&mut self, key: i32, cell: Point) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(FrontierEntry { key, seq, cell });
    }

    /// Removes and returns the entry with the smallest key, oldest first
    /// among equal keys.
    pub fn pop_min(&mut self) -> Option<(i32, Point)> {
        self.heap.pop().map(|e| (e.key, e.cell))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
