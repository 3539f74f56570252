use std::time::{Duration, Instant};

use log::{debug, warn};

use super::{
    collections::{
        dijkstra_data::DijkstraData,
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueRadixHeap},
    },
    observer::SearchObserver,
    path::{reconstruct, PathResult},
    SearchError, SearchStatus, SteppedSearch,
};
use crate::graphs::{Direction, Distance, Graph, Vertex};

/// Distances from `source` to every vertex over the edges of `direction`,
/// `Distance::MAX` for unreachable vertices. A backward run yields the
/// distances from every vertex to `source`.
pub fn one_to_all(graph: &Graph, source: Vertex, direction: Direction) -> Vec<Distance> {
    let mut data = DijkstraData::new(graph.number_of_vertices());
    if !graph.contains(source) {
        return data.into_distances();
    }

    let mut queue = VertexDistanceQueueRadixHeap::new();
    data.set_root(source);
    queue.insert(source, 0);

    while let Some((tail, _)) = queue.pop() {
        if data.expand(tail) {
            continue;
        }

        for edge in graph.edges(tail, direction) {
            if let Some(distance) = data.update(tail, edge.head, edge.weight) {
                queue.insert(edge.head, distance);
            }
        }
    }

    data.into_distances()
}

/// Plain Dijkstra between two vertices. Stops as soon as the target is
/// expanded.
pub struct Dijkstra<'a> {
    graph: &'a Graph,
    data: DijkstraData,
    queue: VertexDistanceQueueRadixHeap,
    source: Vertex,
    target: Vertex,
    nodes_visited: u32,
    elapsed: Duration,
    finished: bool,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            graph,
            data: DijkstraData::new(graph.number_of_vertices()),
            queue: VertexDistanceQueueRadixHeap::new(),
            source: 0,
            target: 0,
            nodes_visited: 0,
            elapsed: Duration::ZERO,
            finished: true,
        }
    }

    pub fn data(&self) -> &DijkstraData {
        &self.data
    }
}

impl SteppedSearch for Dijkstra<'_> {
    fn init(&mut self, source: Vertex, target: Vertex) {
        let start = Instant::now();
        self.data.clear();
        self.queue.clear();
        self.source = source;
        self.target = target;
        self.nodes_visited = 0;
        self.finished = false;

        if !self.graph.contains(source) || !self.graph.contains(target) {
            warn!("query {} -> {} references an unknown vertex", source, target);
            self.finished = true;
        } else {
            self.data.set_root(source);
            self.queue.insert(source, 0);
        }
        self.elapsed = start.elapsed();
    }

    fn step(&mut self, observer: &mut dyn SearchObserver) -> SearchStatus {
        if self.finished {
            return SearchStatus::Finished;
        }
        let start = Instant::now();

        // skip entries of vertices that were queued more than once
        let mut tail = None;
        while let Some((vertex, _)) = self.queue.pop() {
            if !self.data.expand(vertex) {
                tail = Some(vertex);
                break;
            }
        }

        match tail {
            Some(tail) if tail != self.target => {
                for edge in self.graph.out_edges(tail) {
                    self.nodes_visited += 1;
                    if let Some(distance) = self.data.update(tail, edge.head, edge.weight) {
                        self.queue.insert(edge.head, distance);
                        observer.on_edge_relaxed(tail, edge.head);
                    }
                }
            }
            _ => self.finished = true,
        }

        self.elapsed += start.elapsed();
        if self.finished {
            debug!(
                "dijkstra {} -> {} finished after {} relaxations",
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
