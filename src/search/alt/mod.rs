use log::trace;

use landmark::Landmarks;

use super::{
    astar::AStar, heuristics::Heuristic, observer::SearchObserver, path::PathResult, SearchError,
    SearchStatus, SteppedSearch,
};
use crate::graphs::{Graph, Vertex};

pub mod landmark;

/// A* over the maximum of the best `number_of_landmarks` landmark bounds.
///
/// The landmarks are chosen for `source -> target` when the query starts and,
/// if `update_interval` is non-zero, chosen again every `update_interval`
/// expansions for the vertex expanded last.
pub struct AltSearch<'a> {
    landmarks: &'a Landmarks,
    astar: AStar<'a>,
    number_of_landmarks: u32,
    update_interval: u32,
    expansions: u32,
}

impl<'a> AltSearch<'a> {
    pub fn new(
        graph: &'a Graph,
        landmarks: &'a Landmarks,
        number_of_landmarks: u32,
        update_interval: u32,
    ) -> Self {
        AltSearch {
            landmarks,
            astar: AStar::new(graph, Heuristic::Zero),
            number_of_landmarks,
            update_interval,
            expansions: 0,
        }
    }

    /// Landmarks currently guiding the search.
    pub fn active_landmarks(&self) -> Vec<Vertex> {
        match self.astar.heuristic() {
            Heuristic::Landmarks(landmarks) => {
                landmarks.iter().map(|landmark| landmark.vertex).collect()
            }
            _ => Vec::new(),
        }
    }

    fn select_landmarks(&mut self, source: Vertex, target: Vertex) {
        let landmarks = self.landmarks;
        let best = landmarks.find_best_landmarks(source, target, self.number_of_landmarks);
        trace!(
            "landmarks for {} -> {}: {:?}",
            source,
            target,
            best.iter().map(|landmark| landmark.vertex).collect::<Vec<_>>()
        );
        self.astar.change_heuristic(Heuristic::Landmarks(best));
    }
}

impl SteppedSearch for AltSearch<'_> {
    fn init(&mut self, source: Vertex, target: Vertex) {
        self.expansions = 0;
        self.astar.init(source, target);
        self.select_landmarks(source, target);
    }

    fn step(&mut self, observer: &mut dyn SearchObserver) -> SearchStatus {
        let status = self.astar.step(observer);
        if status == SearchStatus::Finished {
            return status;
        }

        self.expansions += 1;
        if self.update_interval != 0 && self.expansions % self.update_interval == 0 {
            if let Some(vertex) = self.astar.last_expanded() {
                let target = self.astar.target();
                self.select_landmarks(vertex, target);
            }
        }

        status
    }

    fn result(&self) -> Result<PathResult, SearchError> {
        self.astar.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graphs::{coordinate::Coordinate, edge::DirectedWeightedEdge},
        search::{dijkstra::Dijkstra, PathFinding},
    };

    fn grid(width: u32) -> Graph {
        let vertex = |x: u32, y: u32| y * width + x;
        let mut edges = Vec::new();
        for y in 0..width {
            for x in 0..width {
                if x + 1 < width {
                    edges.push(DirectedWeightedEdge::new(vertex(x, y), vertex(x + 1, y), 3 + (x + y) % 4));
                    edges.push(DirectedWeightedEdge::new(vertex(x + 1, y), vertex(x, y), 2 + x % 3));
                }
                if y + 1 < width {
                    edges.push(DirectedWeightedEdge::new(vertex(x, y), vertex(x, y + 1), 1 + y % 5));
                    edges.push(DirectedWeightedEdge::new(vertex(x, y + 1), vertex(x, y), 4));
                }
            }
        }
        let number_of_vertices = width * width;
        Graph::from_edges(
            number_of_vertices,
            &edges,
            vec![Coordinate::default(); number_of_vertices as usize],
        )
        .unwrap()
    }

    #[test]
    fn alt_matches_dijkstra() {
        let graph = grid(8);
        let landmarks = Landmarks::for_vertices(&graph, &[0, 7, 56, 63]);

        let mut dijkstra = Dijkstra::new(&graph);
        for update_interval in [0, 1, 5] {
            let mut alt = AltSearch::new(&graph, &landmarks, 2, update_interval);
            for (source, target) in [(0, 63), (63, 0), (9, 54), (40, 23), (17, 17)] {
                let expected = dijkstra.find_path(source, target).unwrap();
                let result = alt.find_path(source, target).unwrap();
                assert_eq!(result.distance, expected.distance);
                assert_eq!(graph.get_path_distance(&result.path), Some(result.distance));
            }
        }
    }

    #[test]
    fn selects_requested_number_of_landmarks() {
        let graph = grid(4);
        let landmarks = Landmarks::for_vertices(&graph, &[0, 3, 12, 15]);
        let mut alt = AltSearch::new(&graph, &landmarks, 3, 0);

        alt.init(0, 15);
        assert_eq!(alt.active_landmarks().len(), 3);
        // landmarks 0 and 15 both bound d(0, 15) exactly
        assert_eq!(alt.active_landmarks()[0], 0);
    }
}
