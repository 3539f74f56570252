use std::time::Duration;

use log::error;
use serde::{Deserialize, Serialize};

use super::{collections::dijkstra_data::DijkstraData, SearchError};
use crate::graphs::{Distance, Vertex};

/// Outcome of a successful query. This is the only object handed to the
/// drawing layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathResult {
    pub source: Vertex,
    pub target: Vertex,
    pub distance: Distance,
    pub elapsed: Duration,
    /// Number of edge relaxation attempts, over both directions for
    /// bidirectional searches.
    pub nodes_visited: u32,
    pub path: Vec<Vertex>,
}

// The elapsed time differs between runs of the same query, so it takes no
// part in comparisons.
impl PartialEq for PathResult {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.distance == other.distance
            && self.nodes_visited == other.nodes_visited
            && self.path == other.path
    }
}

impl Eq for PathResult {}

/// Rebuilds the vertex sequence `source -> target` from the predecessors in
/// `data`.
///
/// Fails with [SearchError::NoPath] if `target` was never reached and with
/// [SearchError::BrokenPredecessorChain] if the chain does not end at
/// `source`.
pub fn reconstruct(
    data: &DijkstraData,
    source: Vertex,
    target: Vertex,
) -> Result<Vec<Vertex>, SearchError> {
    if data.get_distance(target).is_none() {
        return Err(SearchError::NoPath { from: source, to: target });
    }

    let mut vertices = vec![target];
    let mut current = target;
    while let Some(predecessor) = data.get_predecessor(current) {
        // A chain longer than the graph has vertices must contain a cycle.
        if vertices.len() > data.number_of_vertices() as usize {
            break;
        }
        current = predecessor;
        vertices.push(current);
    }

    if current != source {
        error!(
            "predecessor chain of {} -> {} ends at {} instead of the source",
            source, target, current
        );
        return Err(SearchError::BrokenPredecessorChain {
            from: source,
            to: target,
            at: current,
        });
    }

    vertices.reverse();
    Ok(vertices)
}

/// Joins the chain `source -> forward_vertex` of a forward search with the
/// chain `backward_vertex -> target` of a backward search. Both vertices are
/// either the same vertex or the two ends of an edge.
pub fn path_from_bidirectional_search(
    forward_data: &DijkstraData,
    backward_data: &DijkstraData,
    source: Vertex,
    target: Vertex,
    forward_vertex: Vertex,
    backward_vertex: Vertex,
) -> Result<Vec<Vertex>, SearchError> {
    let mut vertices = reconstruct(forward_data, source, forward_vertex)?; // (source -> forward_vertex)
    let mut backward_vertices = reconstruct(backward_data, target, backward_vertex)?; // (target -> backward_vertex)

    backward_vertices.reverse(); // (backward_vertex -> target)
    if forward_vertex == backward_vertex {
        vertices.pop(); // remove double vertex
    }
    vertices.extend(backward_vertices);

    Ok(vertices)
}
