use observer::{NoObserver, SearchObserver};
use path::PathResult;

use crate::graphs::Vertex;

pub mod alt;
pub mod astar;
pub mod bidirectional;
pub mod collections;
pub mod dijkstra;
pub mod heuristics;
pub mod observer;
pub mod path;
pub mod stepper;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no path from {from} to {to}")]
    NoPath { from: Vertex, to: Vertex },

    #[error("predecessor chain of {from} -> {to} ends at {at} instead of {from}")]
    BrokenPredecessorChain {
        from: Vertex,
        to: Vertex,
        at: Vertex,
    },

    #[error("the search has not finished yet")]
    NotFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Continue,
    Finished,
}

/// A search that can be driven one expansion at a time.
///
/// `init` resets all per-query state, so one instance can answer any number
/// of queries. Calling `step` after the search finished is a no-op that
/// returns [SearchStatus::Finished].
pub trait SteppedSearch {
    fn init(&mut self, source: Vertex, target: Vertex);

    /// Expands one vertex. Every relaxation that improves a tentative
    /// distance is reported to `observer` in travel direction.
    fn step(&mut self, observer: &mut dyn SearchObserver) -> SearchStatus;

    fn result(&self) -> Result<PathResult, SearchError>;

    fn run(
        &mut self,
        source: Vertex,
        target: Vertex,
        observer: &mut dyn SearchObserver,
    ) -> Result<PathResult, SearchError> {
        self.init(source, target);
        while self.step(observer) == SearchStatus::Continue {}
        self.result()
    }
}

pub trait PathFinding {
    fn find_path(&mut self, source: Vertex, target: Vertex) -> Result<PathResult, SearchError>;
}

impl<S: SteppedSearch + ?Sized> PathFinding for S {
    fn find_path(&mut self, source: Vertex, target: Vertex) -> Result<PathResult, SearchError> {
        self.run(source, target, &mut NoObserver)
    }
}
