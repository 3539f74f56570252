use fixedbitset::FixedBitSet;

use crate::graphs::{Distance, Vertex};

/// Per-query labels of a single search direction: tentative distances,
/// predecessors and the set of expanded (settled) vertices.
///
/// Vertices outside of `0..number_of_vertices` are never reached and report
/// neither a distance nor a predecessor.
#[derive(Clone, Debug)]
pub struct DijkstraData {
    predecessors: Vec<Vertex>,
    distances: Vec<Distance>,
    expanded: FixedBitSet,
}

impl DijkstraData {
    pub fn new(number_of_vertices: u32) -> Self {
        DijkstraData {
            predecessors: vec![Vertex::MAX; number_of_vertices as usize],
            distances: vec![Distance::MAX; number_of_vertices as usize],
            expanded: FixedBitSet::with_capacity(number_of_vertices as usize),
        }
    }

    /// Clears all stored data, preparing for a new search.
    pub fn clear(&mut self) {
        self.predecessors.fill(Vertex::MAX);
        self.distances.fill(Distance::MAX);
        self.expanded.clear();
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.distances.len() as u32
    }

    pub fn get_predecessor(&self, vertex: Vertex) -> Option<Vertex> {
        let predecessor = *self.predecessors.get(vertex as usize)?;

        if predecessor == Vertex::MAX {
            return None;
        }

        Some(predecessor)
    }

    pub fn get_distance(&self, vertex: Vertex) -> Option<Distance> {
        let distance = *self.distances.get(vertex as usize)?;

        if distance == Distance::MAX {
            return None;
        }

        Some(distance)
    }

    /// Marks `vertex` as the root of the search.
    pub fn set_root(&mut self, vertex: Vertex) {
        self.distances[vertex as usize] = 0;
        self.predecessors[vertex as usize] = Vertex::MAX;
    }

    /// Marks `vertex` as expanded. Returns true if it already was.
    pub fn expand(&mut self, vertex: Vertex) -> bool {
        self.expanded.put(vertex as usize)
    }

    pub fn is_expanded(&self, vertex: Vertex) -> bool {
        self.expanded.contains(vertex as usize)
    }

    pub fn number_of_expanded(&self) -> usize {
        self.expanded.count_ones(..)
    }

    /// Relaxes the edge `tail -> head`. Returns the new tentative distance of
    /// `head` if it improved.
    pub fn update(&mut self, tail: Vertex, head: Vertex, edge_weight: Distance) -> Option<Distance> {
        let alternative_distance = self.get_distance(tail)?.checked_add(edge_weight)?;
        let current_distance = *self.distances.get(head as usize)?;
        if alternative_distance < current_distance {
            self.distances[head as usize] = alternative_distance;
            self.predecessors[head as usize] = tail;
            return Some(alternative_distance);
        }

        None
    }

    /// Distances of all vertices, `Distance::MAX` for unreached ones.
    pub fn into_distances(self) -> Vec<Distance> {
        self.distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_only_improves() {
        let mut data = DijkstraData::new(3);
        data.set_root(0);

        assert_eq!(data.update(0, 1, 5), Some(5));
        assert_eq!(data.update(0, 1, 7), None);
        assert_eq!(data.update(0, 1, 4), Some(4));
        assert_eq!(data.get_predecessor(1), Some(0));
        assert_eq!(data.update(2, 1, 1), None);
        assert_eq!(data.get_distance(2), None);
    }

    #[test]
    fn expand_reports_second_visit() {
        let mut data = DijkstraData::new(2);
        assert!(!data.expand(1));
        assert!(data.expand(1));
        assert!(data.is_expanded(1));
        assert!(!data.is_expanded(5));

        data.clear();
        assert!(!data.is_expanded(1));
        assert_eq!(data.number_of_expanded(), 0);
    }
}
