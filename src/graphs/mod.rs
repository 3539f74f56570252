use serde::{Deserialize, Serialize};

pub mod coordinate;
pub mod edge;
pub mod graph_factory;

use coordinate::Coordinate;
use edge::{DirectedWeightedEdge, Edge};

pub type Vertex = u32;
pub type Distance = u32;

/// Which adjacency list a search walks. A backward search walks the
/// transposed graph, i.e. the incoming edges of a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("edge {tail} -> {head} references a vertex outside of 0..{number_of_vertices}")]
    UnknownVertex {
        tail: Vertex,
        head: Vertex,
        number_of_vertices: u32,
    },

    #[error("expected {expected} coordinates but got {actual}")]
    CoordinateCount { expected: usize, actual: usize },

    #[error("forward and backward adjacency lists differ in length ({forward} vs {backward})")]
    AdjacencyLength { forward: usize, backward: usize },

    #[error("backward adjacency is not the transpose of the forward adjacency at edge {tail} -> {head}")]
    NotTransposed { tail: Vertex, head: Vertex },

    #[error("invalid edge cost {cost} on edge {tail} -> {head}")]
    InvalidCost { tail: Vertex, head: Vertex, cost: f64 },

    #[error("edge {tail} -> {head} has weight {weight}, which is reserved for unreachable vertices")]
    UnreachableWeight {
        tail: Vertex,
        head: Vertex,
        weight: Distance,
    },

    #[error("adjacency list of vertex {vertex} is unsorted or holds self loops or parallel edges")]
    Unnormalized { vertex: Vertex },

    #[error("landmark {landmark} stores {actual} distances but the graph has {expected} vertices")]
    LandmarkLength {
        landmark: Vertex,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unable to decode or encode graph: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Immutable road network.
///
/// `forward[v]` holds the outgoing edges of `v`, `backward[v]` the incoming
/// ones with their direction flipped. Both lists are sorted by head, contain
/// no self loops and at most one edge per vertex pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    forward: Vec<Vec<Edge>>,
    backward: Vec<Vec<Edge>>,
    coordinates: Vec<Coordinate>,
}

impl Graph {
    /// Builds a graph from a list of directed edges. The backward adjacency is
    /// derived from the forward one. Parallel edges keep the cheaper weight.
    pub fn from_edges(
        number_of_vertices: u32,
        edges: &[DirectedWeightedEdge],
        coordinates: Vec<Coordinate>,
    ) -> Result<Graph, GraphError> {
        if coordinates.len() != number_of_vertices as usize {
            return Err(GraphError::CoordinateCount {
                expected: number_of_vertices as usize,
                actual: coordinates.len(),
            });
        }

        let mut forward: Vec<Vec<Edge>> = vec![Vec::new(); number_of_vertices as usize];
        let mut backward: Vec<Vec<Edge>> = vec![Vec::new(); number_of_vertices as usize];

        for edge in edges {
            check_edge(edge.tail(), edge.head(), edge.weight(), number_of_vertices)?;
            if edge.tail() == edge.head() {
                continue;
            }
            insert_cheapest(&mut forward[edge.tail() as usize], edge.tailless());
            insert_cheapest(&mut backward[edge.head() as usize], edge.reversed().tailless());
        }

        Ok(Graph {
            forward,
            backward,
            coordinates,
        })
    }

    /// Builds a graph from both adjacency lists and checks that `backward` is
    /// exactly the transpose of `forward`. Both lists are normalized first, so
    /// parallel edges collapse to the cheapest one on either side.
    pub fn from_adjacency(
        forward: Vec<Vec<Edge>>,
        backward: Vec<Vec<Edge>>,
        coordinates: Vec<Coordinate>,
    ) -> Result<Graph, GraphError> {
        let graph = Graph {
            forward: normalized(forward),
            backward: normalized(backward),
            coordinates,
        };
        graph.validate()?;

        Ok(graph)
    }

    /// Checks every invariant the constructors establish: matching lengths,
    /// in-range endpoints, finite weights, normalized lists and `backward`
    /// being the transpose of `forward`. Needed for graphs that were not built
    /// by a constructor, e.g. deserialized ones.
    pub fn validate(&self) -> Result<(), GraphError> {
        let number_of_vertices = self.forward.len();
        if self.backward.len() != number_of_vertices {
            return Err(GraphError::AdjacencyLength {
                forward: number_of_vertices,
                backward: self.backward.len(),
            });
        }
        if self.coordinates.len() != number_of_vertices {
            return Err(GraphError::CoordinateCount {
                expected: number_of_vertices,
                actual: self.coordinates.len(),
            });
        }

        for (vertex, edges) in self.forward.iter().enumerate() {
            let vertex = vertex as Vertex;
            for edge in edges {
                check_edge(vertex, edge.head, edge.weight, number_of_vertices as u32)?;
            }
            if !is_normalized(vertex, edges) {
                return Err(GraphError::Unnormalized { vertex });
            }
        }
        for (vertex, edges) in self.backward.iter().enumerate() {
            let vertex = vertex as Vertex;
            for edge in edges {
                check_edge(edge.head, vertex, edge.weight, number_of_vertices as u32)?;
            }
            if !is_normalized(vertex, edges) {
                return Err(GraphError::Unnormalized { vertex });
            }
        }

        // tails are visited in ascending order, so every derived list is sorted
        let mut derived: Vec<Vec<Edge>> = vec![Vec::new(); number_of_vertices];
        for (tail, edges) in self.forward.iter().enumerate() {
            for edge in edges {
                derived[edge.head as usize].push(Edge::new(tail as Vertex, edge.weight));
            }
        }
        for (head, (derived, given)) in derived.iter().zip(self.backward.iter()).enumerate() {
            let mismatch = derived
                .iter()
                .find(|edge| !given.contains(edge))
                .or_else(|| given.iter().find(|edge| !derived.contains(edge)));
            if let Some(edge) = mismatch {
                return Err(GraphError::NotTransposed {
                    tail: edge.head,
                    head: head as Vertex,
                });
            }
        }

        Ok(())
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.forward.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.forward.iter().map(Vec::len).sum::<usize>() as u32
    }

    pub fn contains(&self, vertex: Vertex) -> bool {
        (vertex as usize) < self.forward.len()
    }

    /// Edges leaving `vertex` in the given direction. Unknown vertices have no
    /// edges.
    pub fn edges(&self, vertex: Vertex, direction: Direction) -> &[Edge] {
        let lists = match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        };
        lists
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn out_edges(&self, vertex: Vertex) -> &[Edge] {
        self.edges(vertex, Direction::Forward)
    }

    pub fn in_edges(&self, vertex: Vertex) -> &[Edge] {
        self.edges(vertex, Direction::Backward)
    }

    /// Weight of the edge `tail -> head`, if there is one.
    pub fn get_weight(&self, tail: Vertex, head: Vertex) -> Option<Distance> {
        let edges = self.out_edges(tail);
        let index = edges.binary_search_by_key(&head, |edge| edge.head).ok()?;
        Some(edges[index].weight)
    }

    pub fn coordinate(&self, vertex: Vertex) -> Option<&Coordinate> {
        self.coordinates.get(vertex as usize)
    }

    /// Sums the edge weights along `vertices`. Returns `None` if two
    /// consecutive vertices are not connected.
    pub fn get_path_distance(&self, vertices: &[Vertex]) -> Option<Distance> {
        vertices
            .windows(2)
            .map(|pair| self.get_weight(pair[0], pair[1]))
            .sum()
    }

    /// Number of edges cheaper than the great-circle distance between their
    /// endpoints times `scale`. Any such edge makes the haversine heuristic
    /// inadmissible.
    pub fn count_edges_shorter_than_crow_flies(&self, scale: f64) -> usize {
        (0..self.number_of_vertices())
            .flat_map(|tail| self.out_edges(tail).iter().map(move |edge| (tail, edge)))
            .filter(|(tail, edge)| {
                let crow_flies = self.coordinates[*tail as usize]
                    .haversine_distance(&self.coordinates[edge.head as usize]);
                (edge.weight as f64) < (crow_flies * scale).floor()
            })
            .count()
    }
}

fn check_edge(
    tail: Vertex,
    head: Vertex,
    weight: Distance,
    number_of_vertices: u32,
) -> Result<(), GraphError> {
    if tail >= number_of_vertices || head >= number_of_vertices {
        return Err(GraphError::UnknownVertex {
            tail,
            head,
            number_of_vertices,
        });
    }
    if weight == Distance::MAX {
        return Err(GraphError::UnreachableWeight { tail, head, weight });
    }
    Ok(())
}

/// Sorts every list by head, drops self loops and keeps the cheapest of
/// parallel edges.
fn normalized(lists: Vec<Vec<Edge>>) -> Vec<Vec<Edge>> {
    lists
        .into_iter()
        .enumerate()
        .map(|(vertex, edges)| {
            let mut normalized = Vec::with_capacity(edges.len());
            for edge in edges {
                if edge.head != vertex as Vertex {
                    insert_cheapest(&mut normalized, edge);
                }
            }
            normalized
        })
        .collect()
}

fn is_normalized(vertex: Vertex, edges: &[Edge]) -> bool {
    edges.windows(2).all(|pair| pair[0].head < pair[1].head)
        && edges.iter().all(|edge| edge.head != vertex)
}

fn insert_cheapest(edges: &mut Vec<Edge>, edge: Edge) {
    match edges.binary_search_by_key(&edge.head, |other| other.head) {
        Ok(index) => {
            if edge.weight < edges[index].weight {
                edges[index].weight = edge.weight;
            }
        }
        Err(index) => edges.insert(index, edge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_coordinates(number_of_vertices: usize) -> Vec<Coordinate> {
        vec![Coordinate::default(); number_of_vertices]
    }

    #[test]
    fn backward_is_transpose() {
        let edges = [
            DirectedWeightedEdge::new(0, 1, 4),
            DirectedWeightedEdge::new(1, 2, 3),
            DirectedWeightedEdge::new(0, 2, 9),
        ];
        let graph = Graph::from_edges(3, &edges, unit_coordinates(3)).unwrap();

        for tail in 0..3 {
            for edge in graph.out_edges(tail) {
                assert!(graph
                    .in_edges(edge.head)
                    .iter()
                    .any(|in_edge| in_edge.head == tail && in_edge.weight == edge.weight));
            }
        }
        assert_eq!(graph.in_edges(2).len(), 2);
        assert_eq!(graph.number_of_edges(), 3);
    }

    #[test]
    fn parallel_edges_keep_cheapest() {
        let edges = [
            DirectedWeightedEdge::new(0, 1, 7),
            DirectedWeightedEdge::new(0, 1, 5),
            DirectedWeightedEdge::new(1, 1, 1),
        ];
        let graph = Graph::from_edges(2, &edges, unit_coordinates(2)).unwrap();

        assert_eq!(graph.get_weight(0, 1), Some(5));
        assert_eq!(graph.in_edges(1), &[Edge::new(0, 5)]);
        assert!(graph.out_edges(1).is_empty());
    }

    #[test]
    fn unknown_vertex_has_no_edges() {
        let graph = Graph::from_edges(1, &[], unit_coordinates(1)).unwrap();
        assert!(graph.out_edges(42).is_empty());
        assert!(graph.in_edges(42).is_empty());
        assert!(!graph.contains(42));
    }

    #[test]
    fn rejects_out_of_range_edges() {
        let edges = [DirectedWeightedEdge::new(0, 3, 1)];
        let result = Graph::from_edges(2, &edges, unit_coordinates(2));
        assert!(matches!(result, Err(GraphError::UnknownVertex { head: 3, .. })));
    }

    #[test]
    fn rejects_unreachable_weight() {
        let edges = [DirectedWeightedEdge::new(0, 1, Distance::MAX)];
        let result = Graph::from_edges(2, &edges, unit_coordinates(2));
        assert!(matches!(
            result,
            Err(GraphError::UnreachableWeight { tail: 0, head: 1, .. })
        ));

        let forward = vec![vec![Edge::new(1, Distance::MAX)], vec![]];
        let backward = vec![vec![], vec![Edge::new(0, Distance::MAX)]];
        let result = Graph::from_adjacency(forward, backward, unit_coordinates(2));
        assert!(matches!(result, Err(GraphError::UnreachableWeight { .. })));
    }

    #[test]
    fn adjacency_with_parallel_edges() {
        let forward = vec![vec![Edge::new(1, 4), Edge::new(1, 2)], vec![Edge::new(1, 1)]];
        let backward = vec![vec![], vec![Edge::new(0, 2), Edge::new(1, 1), Edge::new(0, 4)]];
        let graph = Graph::from_adjacency(forward, backward, unit_coordinates(2)).unwrap();

        assert_eq!(graph.out_edges(0), &[Edge::new(1, 2)]);
        assert_eq!(graph.in_edges(1), &[Edge::new(0, 2)]);
        assert!(graph.out_edges(1).is_empty());
    }

    #[test]
    fn validate_catches_broken_graphs() {
        let edges = [
            DirectedWeightedEdge::new(0, 1, 4),
            DirectedWeightedEdge::new(1, 2, 3),
        ];
        let graph = Graph::from_edges(3, &edges, unit_coordinates(3)).unwrap();
        assert!(graph.validate().is_ok());

        let mut missing_transpose = graph.clone();
        missing_transpose.backward[2].clear();
        assert!(matches!(
            missing_transpose.validate(),
            Err(GraphError::NotTransposed { tail: 1, head: 2 })
        ));

        let mut unsorted = graph.clone();
        unsorted.forward[0] = vec![Edge::new(2, 1), Edge::new(1, 4)];
        assert!(matches!(
            unsorted.validate(),
            Err(GraphError::Unnormalized { vertex: 0 })
        ));

        let mut missing_coordinate = graph;
        missing_coordinate.coordinates.pop();
        assert!(matches!(
            missing_coordinate.validate(),
            Err(GraphError::CoordinateCount {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn rejects_wrong_transpose() {
        let forward = vec![vec![Edge::new(1, 2)], vec![]];
        let backward = vec![vec![], vec![Edge::new(0, 3)]];
        let result = Graph::from_adjacency(forward, backward, unit_coordinates(2));
        assert!(matches!(result, Err(GraphError::NotTransposed { head: 1, .. })));
    }
}
