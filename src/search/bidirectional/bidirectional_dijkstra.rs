use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::BidirectionalCore;
use crate::{
    graphs::{Graph, Vertex},
    search::{
        observer::SearchObserver, path::PathResult, SearchError, SearchStatus, SteppedSearch,
    },
};

/// When a bidirectional Dijkstra may stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoppingRule {
    /// Stop once the smallest keys of both queues sum to at least the best
    /// connection found so far. Always exact.
    #[default]
    FrontierSum,
    /// Stop at the first vertex expanded by both sides and report the
    /// connection through it. Can miss shorter connections across an edge
    /// between the two frontiers.
    FirstMeeting,
}

pub struct BidirectionalDijkstra<'a> {
    graph: &'a Graph,
    core: BidirectionalCore,
    stopping_rule: StoppingRule,
}

impl<'a> BidirectionalDijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_stopping_rule(graph, StoppingRule::default())
    }

    pub fn with_stopping_rule(graph: &'a Graph, stopping_rule: StoppingRule) -> Self {
        BidirectionalDijkstra {
            graph,
            core: BidirectionalCore::new(graph.number_of_vertices()),
            stopping_rule,
        }
    }

    pub fn core(&self) -> &BidirectionalCore {
        &self.core
    }
}

impl SteppedSearch for BidirectionalDijkstra<'_> {
    fn init(&mut self, source: Vertex, target: Vertex) {
        self.core.init(self.graph, source, target, 0, 0);
    }

    fn step(&mut self, observer: &mut dyn SearchObserver) -> SearchStatus {
        if self.core.is_finished() {
            return SearchStatus::Finished;
        }
        let start = Instant::now();

        let Some((forward_top, backward_top)) = self.core.top_keys() else {
            self.core.add_elapsed(start.elapsed());
            self.core.finish("bidirectional dijkstra");
            return SearchStatus::Finished;
        };
        if self.stopping_rule == StoppingRule::FrontierSum {
            if let Some(meeting) = self.core.meeting() {
                if forward_top + backward_top >= meeting.distance as i64 {
                    self.core.add_elapsed(start.elapsed());
                    self.core.finish("bidirectional dijkstra");
                    return SearchStatus::Finished;
                }
            }
        }

        let direction = self.core.next_direction();
        if let Some(vertex) = self.core.settle(direction) {
            if self.stopping_rule == StoppingRule::FirstMeeting
                && self.core.side(direction.reversed()).data().is_expanded(vertex)
            {
                self.core.meet_at(vertex);
                self.core.add_elapsed(start.elapsed());
                self.core.finish("bidirectional dijkstra");
                return SearchStatus::Finished;
            }

            self.core.relax(
                self.graph,
                direction,
                vertex,
                observer,
                |_, distance| distance as i64,
            );
        }

        self.core.add_elapsed(start.elapsed());
        SearchStatus::Continue
    }

    fn result(&self) -> Result<PathResult, SearchError> {
        self.core.result()
    }
}
