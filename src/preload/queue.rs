//! Preload Queue Module
//!
//! Binary heap ordered by priority rank, FIFO within a rank.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::preload::PreloadTask;

#[derive(Debug)]
struct Queued {
    task: PreloadTask,
    seq: u64,
}

impl Queued {
    fn sort_key(&self) -> (u8, u64) {
        (self.task.priority.rank(), self.seq)
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    // BinaryHeap is a max-heap: the smallest (rank, seq) must compare greatest.
    fn cmp(&self, other: &Self) -> Ordering {
        other.sort_key().cmp(&self.sort_key())
    }
}

// == Preload Queue ==
#[derive(Debug, Default)]
pub struct PreloadQueue {
    heap: BinaryHeap<Queued>,
    next_seq: u64,
}

impl PreloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: PreloadTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued { task, seq });
    }

    /// Removes the most urgent task.
    pub fn pop(&mut self) -> Option<PreloadTask> {
        self.heap.pop().map(|queued| queued.task)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Extend<PreloadTask> for PreloadQueue {
    fn extend<I: IntoIterator<Item = PreloadTask>>(&mut self, tasks: I) {
        for task in tasks {
            self.push(task);
        }
    }
}
