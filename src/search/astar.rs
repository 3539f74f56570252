use std::time::{Duration, Instant};

use ahash::{HashSet, HashSetExt};
use log::{debug, warn};

use super::{
    collections::{
        dijkstra_data::DijkstraData,
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
    },
    heuristics::{DistanceHeuristic, HaversineHeuristic, Heuristic},
    observer::SearchObserver,
    path::{reconstruct, PathResult},
    SearchError, SearchStatus, SteppedSearch,
};
use crate::graphs::{Distance, Graph, Vertex};

/// A* keyed by `distance + lower_bound(vertex, target)`.
pub struct AStar<'a> {
    graph: &'a Graph,
    heuristic: Heuristic<'a>,
    data: DijkstraData,
    queue: VertexDistanceQueueBinaryHeap<u64>,
    source: Vertex,
    target: Vertex,
    last_expanded: Option<Vertex>,
    nodes_visited: u32,
    elapsed: Duration,
    finished: bool,
}

impl<'a> AStar<'a> {
    pub fn new(graph: &'a Graph, heuristic: Heuristic<'a>) -> Self {
        AStar {
            graph,
            heuristic,
            data: DijkstraData::new(graph.number_of_vertices()),
            queue: VertexDistanceQueueBinaryHeap::new(),
            source: 0,
            target: 0,
            last_expanded: None,
            nodes_visited: 0,
            elapsed: Duration::ZERO,
            finished: true,
        }
    }

    /// A* guided by the great-circle distance in meters.
    pub fn with_haversine(graph: &'a Graph) -> Self {
        Self::new(graph, Heuristic::Haversine(HaversineHeuristic::new(graph)))
    }

    pub fn heuristic(&self) -> &Heuristic<'a> {
        &self.heuristic
    }

    /// Replaces the heuristic and recomputes the keys of all queued vertices
    /// under it. Expanded vertices keep their labels, so the search stays
    /// exact as long as both heuristics are consistent.
    pub fn change_heuristic(&mut self, heuristic: Heuristic<'a>) {
        self.heuristic = heuristic;

        let frontier = self.queue.drain_vertices();
        let mut requeued = HashSet::with_capacity(frontier.len());
        for vertex in frontier {
            if self.data.is_expanded(vertex) || !requeued.insert(vertex) {
                continue;
            }
            if let Some(distance) = self.data.get_distance(vertex) {
                let key = self.key(vertex, distance);
                self.queue.insert(vertex, key);
            }
        }
    }

    /// The vertex expanded by the most recent step.
    pub fn last_expanded(&self) -> Option<Vertex> {
        self.last_expanded
    }

    pub fn target(&self) -> Vertex {
        self.target
    }

    pub fn data(&self) -> &DijkstraData {
        &self.data
    }

    fn key(&self, vertex: Vertex, distance: Distance) -> u64 {
        distance as u64 + self.heuristic.lower_bound(vertex, self.target) as u64
    }
}

impl SteppedSearch for AStar<'_> {
    fn init(&mut self, source: Vertex, target: Vertex) {
        let start = Instant::now();
        self.data.clear();
        self.queue.clear();
        self.source = source;
        self.target = target;
        self.last_expanded = None;
        self.nodes_visited = 0;
        self.finished = false;

        if !self.graph.contains(source) || !self.graph.contains(target) {
            warn!("query {} -> {} references an unknown vertex", source, target);
            self.finished = true;
        } else {
            self.data.set_root(source);
            let key = self.key(source, 0);
            self.queue.insert(source, key);
        }
        self.elapsed = start.elapsed();
    }

    fn step(&mut self, observer: &mut dyn SearchObserver) -> SearchStatus {
        if self.finished {
            return SearchStatus::Finished;
        }
        let start = Instant::now();

        let mut tail = None;
        while let Some((vertex, _)) = self.queue.pop() {
            if !self.data.expand(vertex) {
                tail = Some(vertex);
                break;
            }
        }
        self.last_expanded = tail;

        match tail {
            Some(tail) if tail != self.target => {
                for edge in self.graph.out_edges(tail) {
                    self.nodes_visited += 1;
                    if let Some(distance) = self.data.update(tail, edge.head, edge.weight) {
                        let key = self.key(edge.head, distance);
                        self.queue.insert(edge.head, key);
                        observer.on_edge_relaxed(tail, edge.head);
                    }
                }
            }
            _ => self.finished = true,
        }

        self.elapsed += start.elapsed();
        if self.finished {
            debug!(
                "a* {} -> {} finished after {} relaxations",
                self.source, self.target, self.nodes_visited
            );
            return SearchStatus::Finished;
        }
        SearchStatus::Continue
    }

    fn result(&self) -> Result<PathResult, SearchError> {
        if !self.finished {
            return Err(SearchError::NotFinished);
        }

        let path = reconstruct(&self.data, self.source, self.target)?;
        Ok(PathResult {
            source: self.source,
            target: self.target,
            distance: self.data.get_distance(self.target).unwrap_or(Distance::MAX),
            elapsed: self.elapsed,
            nodes_visited: self.nodes_visited,
            path,
        })
    }
}
