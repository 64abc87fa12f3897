//! Cost-ordered frontier for weighted walkers.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::node::{NodeId, SearchNode};

/// Heap entry: a node id with the cost it had when queued.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    id: NodeId,
    cost: i32,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops the lowest cost first, and
        // the earliest insertion among equal costs.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of node ids keyed by [`SearchNode::cost`].
///
/// The cost is captured at [`enqueue`](PriorityQueue::enqueue) time. To
/// change a queued node's priority, [`remove`](PriorityQueue::remove) it and
/// enqueue it again.
#[derive(Clone, Debug, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `id`, ordered by `node.cost()`.
    pub fn enqueue<N: SearchNode>(&mut self, id: NodeId, node: &N) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            id,
            cost: node.cost(),
            seq,
        });
    }

    /// Pop the lowest-cost node.
    pub fn dequeue(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|e| e.id)
    }

    /// Cost of the node [`dequeue`](PriorityQueue::dequeue) would return.
    pub fn peek_cost(&self) -> Option<i32> {
        self.heap.peek().map(|e| e.cost)
    }

    /// Drop every entry for `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let before = self.heap.len();
        self.heap.retain(|e| e.id != id);
        self.heap.len() != before
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.heap.iter().any(|e| e.id == id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove every entry. Capacity is kept.
    pub fn make_empty(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}
