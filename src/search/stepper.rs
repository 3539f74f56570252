use super::{
    observer::EdgeCollector, path::PathResult, SearchError, SearchStatus, SteppedSearch,
};
use crate::graphs::Vertex;

/// Everything that happened between two renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Edges whose head got a better tentative distance, in travel
    /// direction.
    pub relaxed_edges: Vec<(Vertex, Vertex)>,
    pub status: SearchStatus,
}

/// Drives a search frame by frame. Each frame runs `draw_interval + 1`
/// steps, so an interval of 0 renders after every expansion. Dropping the
/// stepper aborts the query.
pub struct Stepper<'s, S: SteppedSearch + ?Sized> {
    search: &'s mut S,
    draw_interval: u32,
    collector: EdgeCollector,
    status: SearchStatus,
}

impl<'s, S: SteppedSearch + ?Sized> Stepper<'s, S> {
    pub fn new(search: &'s mut S, source: Vertex, target: Vertex, draw_interval: u32) -> Self {
        search.init(source, target);
        Stepper {
            search,
            draw_interval,
            collector: EdgeCollector::new(),
            status: SearchStatus::Continue,
        }
    }

    pub fn next_frame(&mut self) -> Frame {
        for _ in 0..=self.draw_interval {
            if self.status == SearchStatus::Finished {
                break;
            }
            self.status = self.search.step(&mut self.collector);
        }

        Frame {
            relaxed_edges: self.collector.take(),
            status: self.status,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == SearchStatus::Finished
    }

    pub fn result(&self) -> Result<PathResult, SearchError> {
        self.search.result()
    }
}

impl<S: SteppedSearch + ?Sized> Iterator for Stepper<'_, S> {
    type Item = Frame;

    /// Frames until the search finished, the last one included.
    fn next(&mut self) -> Option<Frame> {
        if self.is_finished() {
            return None;
        }
        Some(self.next_frame())
    }
}
