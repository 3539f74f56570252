use super::alt::landmark::Landmark;
use crate::graphs::{Distance, Graph, Vertex};

/// Lower bound on the shortest path distance between two vertices.
///
/// A* needs the bound to be admissible. The bidirectional variants and the
/// exactness of the unidirectional searches additionally rely on it being
/// consistent, `lower_bound(u, t) <= weight(u, w) + lower_bound(w, t)`.
pub trait DistanceHeuristic: Send + Sync {
    fn lower_bound(&self, source: Vertex, target: Vertex) -> Distance;
}

/// Great-circle distance between the coordinates of two vertices, in cost
/// units. Admissible as long as no edge costs less than `scale` times its
/// crow-flies length.
#[derive(Clone, Copy)]
pub struct HaversineHeuristic<'a> {
    graph: &'a Graph,
    scale: f64,
}

impl<'a> HaversineHeuristic<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_scale(graph, 1.0)
    }

    /// `scale` converts meters into cost units.
    pub fn with_scale(graph: &'a Graph, scale: f64) -> Self {
        HaversineHeuristic { graph, scale }
    }
}

impl DistanceHeuristic for HaversineHeuristic<'_> {
    fn lower_bound(&self, source: Vertex, target: Vertex) -> Distance {
        let (Some(source), Some(target)) =
            (self.graph.coordinate(source), self.graph.coordinate(target))
        else {
            return 0;
        };

        // floor keeps the bound consistent for integer edge costs
        (source.haversine_distance(target) * self.scale)
            .floor()
            .min(Distance::MAX as f64) as Distance
    }
}

/// The heuristics a search can run with. Switching heuristics mid-search is
/// a plain assignment of another variant.
#[derive(Clone)]
pub enum Heuristic<'a> {
    Zero,
    Haversine(HaversineHeuristic<'a>),
    Landmark(&'a Landmark),
    /// Maximum over the bounds of all contained landmarks.
    Landmarks(Vec<&'a Landmark>),
}

impl DistanceHeuristic for Heuristic<'_> {
    fn lower_bound(&self, source: Vertex, target: Vertex) -> Distance {
        match self {
            Heuristic::Zero => 0,
            Heuristic::Haversine(haversine) => haversine.lower_bound(source, target),
            Heuristic::Landmark(landmark) => landmark.lower_bound(source, target),
            Heuristic::Landmarks(landmarks) => landmarks
                .iter()
                .map(|landmark| landmark.lower_bound(source, target))
                .max()
                .unwrap_or(0),
        }
    }
}
