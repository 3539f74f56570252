use std::{cmp::Reverse, collections::BinaryHeap};

use radix_heap::RadixHeapMap;

use crate::graphs::{Distance, Vertex};

/// A priority queue of vertices keyed by `K`, smallest key first.
///
/// Implementations do not offer decrease-key: a vertex may be queued several
/// times and callers skip entries of vertices that are already expanded.
pub trait VertexDistanceQueue<K> {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    fn insert(&mut self, vertex: Vertex, key: K);

    /// Removes and returns the entry with the smallest key.
    fn pop(&mut self) -> Option<(Vertex, K)>;

    fn is_empty(&self) -> bool;
}

/// Binary heap backed queue. Accepts keys in any order.
pub struct VertexDistanceQueueBinaryHeap<K: Ord> {
    heap: BinaryHeap<Reverse<(K, Vertex)>>,
}

impl<K: Ord + Copy> Default for VertexDistanceQueueBinaryHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> VertexDistanceQueueBinaryHeap<K> {
    pub fn new() -> Self {
        VertexDistanceQueueBinaryHeap {
            heap: BinaryHeap::new(),
        }
    }

    pub fn peek(&self) -> Option<(Vertex, K)> {
        self.heap
            .peek()
            .map(|&Reverse((key, vertex))| (vertex, key))
    }

    /// Removes and returns every queued vertex, in no particular order.
    pub fn drain_vertices(&mut self) -> Vec<Vertex> {
        self.heap
            .drain()
            .map(|Reverse((_key, vertex))| vertex)
            .collect()
    }
}

impl<K: Ord + Copy> VertexDistanceQueue<K> for VertexDistanceQueueBinaryHeap<K> {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: Vertex, key: K) {
        self.heap.push(Reverse((key, vertex)));
    }

    fn pop(&mut self) -> Option<(Vertex, K)> {
        let Reverse((key, vertex)) = self.heap.pop()?;

        Some((vertex, key))
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Radix heap backed queue. Keys must never be smaller than the last popped
/// key, which holds for plain Dijkstra over non-negative weights.
pub struct VertexDistanceQueueRadixHeap {
    heap: RadixHeapMap<i64, Vertex>,
}

impl Default for VertexDistanceQueueRadixHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDistanceQueueRadixHeap {
    pub fn new() -> Self {
        VertexDistanceQueueRadixHeap {
            heap: RadixHeapMap::new(),
        }
    }
}

impl VertexDistanceQueue<Distance> for VertexDistanceQueueRadixHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: Vertex, key: Distance) {
        // RadixHeapMap is a max-heap, negating turns it into a min-heap.
        self.heap.push(-(key as i64), vertex);
    }

    fn pop(&mut self) -> Option<(Vertex, Distance)> {
        let (negative_key, vertex) = self.heap.pop()?;

        Some((vertex, (-negative_key) as Distance))
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_heap_pops_smallest_first() {
        let mut queue = VertexDistanceQueueBinaryHeap::new();
        queue.insert(1, 30u64);
        queue.insert(2, 10);
        queue.insert(3, 20);

        assert_eq!(queue.peek(), Some((2, 10)));
        assert_eq!(queue.pop(), Some((2, 10)));
        assert_eq!(queue.pop(), Some((3, 20)));
        assert_eq!(queue.pop(), Some((1, 30)));
        assert!(queue.is_empty());
    }

    #[test]
    fn radix_heap_pops_smallest_first() {
        let mut queue = VertexDistanceQueueRadixHeap::new();
        queue.insert(7, 4);
        queue.insert(8, 2);
        assert_eq!(queue.pop(), Some((8, 2)));
        queue.insert(9, 3);
        assert_eq!(queue.pop(), Some((9, 3)));
        assert_eq!(queue.pop(), Some((7, 4)));
        assert_eq!(queue.pop(), None);
    }
}
