use std::time::Instant;

use super::BidirectionalCore;
use crate::{
    graphs::{Direction, Distance, Graph, Vertex},
    search::{
        heuristics::{DistanceHeuristic, HaversineHeuristic, Heuristic},
        observer::SearchObserver,
        path::PathResult,
        SearchError, SearchStatus, SteppedSearch,
    },
};

/// Bidirectional A* with average potentials.
///
/// With `h(v) = lower_bound(v, target)` and `g(v) = lower_bound(source, v)`
/// the forward side is keyed by `d(v) + (h(v) - g(v)) / 2 + beta` and the
/// backward side by `d(v) + (g(v) - h(v)) / 2 + beta`, where
/// `beta = lower_bound(source, target) / 2`. Both potentials add up to
/// `2 * beta` at every vertex, so the search may stop once the smallest keys
/// of both queues reach `best + 2 * beta`. Keys are stored doubled to stay in
/// integers.
pub struct BidirectionalAStar<'a> {
    graph: &'a Graph,
    heuristic: Heuristic<'a>,
    core: BidirectionalCore,
    doubled_beta: i64,
}

impl<'a> BidirectionalAStar<'a> {
    pub fn new(graph: &'a Graph, heuristic: Heuristic<'a>) -> Self {
        BidirectionalAStar {
            graph,
            heuristic,
            core: BidirectionalCore::new(graph.number_of_vertices()),
            doubled_beta: 0,
        }
    }

    pub fn with_haversine(graph: &'a Graph) -> Self {
        Self::new(graph, Heuristic::Haversine(HaversineHeuristic::new(graph)))
    }

    /// Offset added to both potentials of the current query.
    pub fn beta(&self) -> f64 {
        self.doubled_beta as f64 / 2.0
    }

    pub fn core(&self) -> &BidirectionalCore {
        &self.core
    }
}

/// Doubled queue key of `vertex` at `distance` on the given side.
fn doubled_key(
    heuristic: &Heuristic,
    source: Vertex,
    target: Vertex,
    doubled_beta: i64,
    direction: Direction,
    vertex: Vertex,
    distance: Distance,
) -> i64 {
    let to_target = heuristic.lower_bound(vertex, target) as i64;
    let from_source = heuristic.lower_bound(source, vertex) as i64;
    let potential = match direction {
        Direction::Forward => to_target - from_source,
        Direction::Backward => from_source - to_target,
    };

    2 * distance as i64 + potential + doubled_beta
}

impl SteppedSearch for BidirectionalAStar<'_> {
    fn init(&mut self, source: Vertex, target: Vertex) {
        self.doubled_beta = if self.graph.contains(source) && self.graph.contains(target) {
            self.heuristic.lower_bound(source, target) as i64
        } else {
            0
        };
        let forward_key = doubled_key(
            &self.heuristic,
            source,
            target,
            self.doubled_beta,
            Direction::Forward,
            source,
            0,
        );
        let backward_key = doubled_key(
            &self.heuristic,
            source,
            target,
            self.doubled_beta,
            Direction::Backward,
            target,
            0,
        );
        self.core
            .init(self.graph, source, target, forward_key, backward_key);
    }

    fn step(&mut self, observer: &mut dyn SearchObserver) -> SearchStatus {
        if self.core.is_finished() {
            return SearchStatus::Finished;
        }
        let start = Instant::now();

        let Some((forward_top, backward_top)) = self.core.top_keys() else {
            self.core.add_elapsed(start.elapsed());
            self.core.finish("bidirectional a*");
            return SearchStatus::Finished;
        };
        if let Some(meeting) = self.core.meeting() {
            // doubled form of top_f + top_b >= best + 2 * beta
            if forward_top + backward_top >= 2 * meeting.distance as i64 + 2 * self.doubled_beta {
                self.core.add_elapsed(start.elapsed());
                self.core.finish("bidirectional a*");
                return SearchStatus::Finished;
            }
        }

        let direction = self.core.next_direction();
        if let Some(vertex) = self.core.settle(direction) {
            let (source, target) = (self.core.source(), self.core.target());
            let heuristic = &self.heuristic;
            let doubled_beta = self.doubled_beta;
            self.core
                .relax(self.graph, direction, vertex, observer, |head, distance| {
                    doubled_key(
                        heuristic,
                        source,
                        target,
                        doubled_beta,
                        direction,
                        head,
                        distance,
                    )
                });
        }

        self.core.add_elapsed(start.elapsed());
        SearchStatus::Continue
    }

    fn result(&self) -> Result<PathResult, SearchError> {
        self.core.result()
    }
}
