use std::cmp::Reverse;

use indicatif::{ParallelProgressIterator, ProgressIterator};
use itertools::Itertools;
use log::{info, warn};
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::{
    graphs::{Direction, Distance, Graph, Vertex},
    search::{dijkstra::one_to_all, heuristics::DistanceHeuristic},
    utility::get_progressbar,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    pub landmarks: Vec<Landmark>,
}

impl Landmarks {
    pub fn for_vertices(graph: &Graph, vertices: &[Vertex]) -> Landmarks {
        info!("precomputing {} landmarks", vertices.len());
        let landmarks = vertices
            .par_iter()
            .progress_with(get_progressbar(
                "Generating landmarks",
                vertices.len() as u64,
            ))
            .map(|&vertex| Landmark::new(graph, vertex))
            .collect();

        Landmarks { landmarks }
    }

    /// Uniformly sampled landmarks, reproducible through `seed`.
    pub fn random(graph: &Graph, number_of_landmarks: u32, seed: u64) -> Landmarks {
        let mut rng = StdRng::seed_from_u64(seed);
        let vertices =
            (0..graph.number_of_vertices()).choose_multiple(&mut rng, number_of_landmarks as usize);
        Landmarks::for_vertices(graph, &vertices)
    }

    /// Greedily picks the vertex whose shortest distance from all landmarks
    /// chosen so far is the largest, starting with `start`. Vertices
    /// unreachable from every chosen landmark are never picked, so fewer
    /// landmarks may be returned on disconnected graphs.
    pub fn farthest(graph: &Graph, number_of_landmarks: u32, start: Vertex) -> Landmarks {
        if number_of_landmarks == 0 || !graph.contains(start) {
            return Landmarks::default();
        }

        let mut vertices = vec![start];
        let mut closest = one_to_all(graph, start, Direction::Forward);
        for _ in (1..number_of_landmarks).progress_with(get_progressbar(
            "Selecting landmarks",
            number_of_landmarks as u64 - 1,
        )) {
            let candidate = closest
                .iter()
                .enumerate()
                .filter(|(vertex, distance)| {
                    **distance != Distance::MAX && !vertices.contains(&(*vertex as Vertex))
                })
                .max_by_key(|(_, distance)| **distance);
            let Some((vertex, &distance)) = candidate else {
                warn!(
                    "only {} of {} landmarks are reachable from {}",
                    vertices.len(),
                    number_of_landmarks,
                    start
                );
                break;
            };
            if distance == 0 {
                break;
            }

            let vertex = vertex as Vertex;
            vertices.push(vertex);
            let distances = one_to_all(graph, vertex, Direction::Forward);
            closest
                .iter_mut()
                .zip(distances)
                .for_each(|(closest, distance)| *closest = (*closest).min(distance));
        }

        Landmarks::for_vertices(graph, &vertices)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// The `number_of_landmarks` landmarks with the largest lower bound for
    /// `source -> target`, best first. Ties keep the stored order.
    pub fn find_best_landmarks(
        &self,
        source: Vertex,
        target: Vertex,
        number_of_landmarks: u32,
    ) -> Vec<&Landmark> {
        self.landmarks
            .iter()
            .sorted_by_key(|landmark| Reverse(landmark.lower_bound(source, target)))
            .take(number_of_landmarks as usize)
            .collect()
    }
}

impl DistanceHeuristic for Landmarks {
    fn lower_bound(&self, source: Vertex, target: Vertex) -> Distance {
        self.landmarks
            .iter()
            .map(|landmark| landmark.lower_bound(source, target))
            .max()
            .unwrap_or(0)
    }
}

/// A vertex with its distances to and from every other vertex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub vertex: Vertex,
    /// `distances[v]` is d(landmark, v), `Distance::MAX` if unreachable.
    pub distances: Vec<Distance>,
    /// `bi_distances[v]` is d(v, landmark), `Distance::MAX` if unreachable.
    pub bi_distances: Vec<Distance>,
}

impl Landmark {
    pub fn new(graph: &Graph, vertex: Vertex) -> Self {
        Landmark {
            vertex,
            distances: one_to_all(graph, vertex, Direction::Forward),
            bi_distances: one_to_all(graph, vertex, Direction::Backward),
        }
    }
}

impl DistanceHeuristic for Landmark {
    fn lower_bound(&self, source: Vertex, target: Vertex) -> Distance {
        // d(L, t) - d(L, s) <= d(s, t)
        let potential_forward = finite_difference(&self.distances, target, source);
        // d(s, L) - d(t, L) <= d(s, t)
        let potential_backward = finite_difference(&self.bi_distances, source, target);

        std::cmp::max(potential_forward, potential_backward)
    }
}

/// `distances[minuend] - distances[subtrahend]`, or 0 if either is unknown,
/// infinite or the difference is negative.
fn finite_difference(distances: &[Distance], minuend: Vertex, subtrahend: Vertex) -> Distance {
    let (Some(&minuend), Some(&subtrahend)) = (
        distances.get(minuend as usize),
        distances.get(subtrahend as usize),
    ) else {
        return 0;
    };
    if minuend == Distance::MAX || subtrahend == Distance::MAX {
        return 0;
    }

    minuend.saturating_sub(subtrahend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{coordinate::Coordinate, edge::DirectedWeightedEdge};

    // 0 -> 1 -> 2 -> 3, plus 3 -> 0 and an isolated vertex 4
    fn ring() -> Graph {
        let edges = [
            DirectedWeightedEdge::new(0, 1, 2),
            DirectedWeightedEdge::new(1, 2, 3),
            DirectedWeightedEdge::new(2, 3, 4),
            DirectedWeightedEdge::new(3, 0, 5),
        ];
        Graph::from_edges(5, &edges, vec![Coordinate::default(); 5]).unwrap()
    }

    #[test]
    fn landmark_distances() {
        let graph = ring();
        let landmark = Landmark::new(&graph, 0);

        assert_eq!(landmark.distances[..4], [0, 2, 5, 9]);
        assert_eq!(landmark.bi_distances[..4], [0, 12, 9, 5]);
        assert_eq!(landmark.distances[4], Distance::MAX);
    }

    #[test]
    fn lower_bound_uses_both_directions() {
        let graph = ring();
        let landmark = Landmark::new(&graph, 0);

        // d(1, 3) = 7: forward term 9 - 2, backward term 12 - 5
        assert_eq!(landmark.lower_bound(1, 3), 7);
        // d(3, 1) = 7: forward term 2 - 9 < 0, backward term 5 - 12 < 0
        assert_eq!(landmark.lower_bound(3, 1), 0);
        // unreachable vertices contribute nothing
        assert_eq!(landmark.lower_bound(1, 4), 0);
        assert_eq!(landmark.lower_bound(1, 99), 0);
    }

    #[test]
    fn best_landmarks_are_ranked_by_bound() {
        let graph = ring();
        let landmarks = Landmarks::for_vertices(&graph, &[4, 1, 0]);

        // landmarks 1 and 0 both bound d(1, 3) = 7 exactly, input order decides
        let best = landmarks.find_best_landmarks(1, 3, 2);
        assert_eq!(
            best.iter().map(|landmark| landmark.vertex).collect_vec(),
            vec![1, 0]
        );

        // only landmark 1 helps for 3 -> 1, the isolated 4 ties with 0
        let best = landmarks.find_best_landmarks(3, 1, 3);
        assert_eq!(
            best.iter().map(|landmark| landmark.vertex).collect_vec(),
            vec![1, 4, 0]
        );
        assert_eq!(landmarks.lower_bound(3, 1), 7);
    }

    #[test]
    fn farthest_landmarks() {
        let graph = ring();
        let landmarks = Landmarks::farthest(&graph, 3, 0);

        let vertices = landmarks.landmarks.iter().map(|l| l.vertex).collect_vec();
        assert_eq!(vertices, vec![0, 3, 2]);
        assert!(!vertices.contains(&4));
    }

    #[test]
    fn random_landmarks_are_reproducible() {
        let graph = ring();
        let first = Landmarks::random(&graph, 2, 7);
        let second = Landmarks::random(&graph, 2, 7);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
