use std::time::{Duration, Instant};

use log::{debug, warn};

use super::{
    collections::{
        dijkstra_data::DijkstraData,
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
    },
    observer::SearchObserver,
    path::{path_from_bidirectional_search, PathResult},
    SearchError,
};
use crate::graphs::{Direction, Distance, Graph, Vertex};

pub mod bidirectional_astar;
pub mod bidirectional_dijkstra;

/// Best known connection between both searches: the forward label of
/// `forward`, the edge `forward -> backward` (absent if both are the same
/// vertex) and the backward label of `backward`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meeting {
    pub forward: Vertex,
    pub backward: Vertex,
    pub distance: Distance,
}

/// Labels and queue of one direction of a bidirectional search.
pub struct SearchSide {
    data: DijkstraData,
    queue: VertexDistanceQueueBinaryHeap<i64>,
}

impl SearchSide {
    pub fn new(number_of_vertices: u32) -> Self {
        SearchSide {
            data: DijkstraData::new(number_of_vertices),
            queue: VertexDistanceQueueBinaryHeap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.queue.clear();
    }

    pub fn data(&self) -> &DijkstraData {
        &self.data
    }

    fn start(&mut self, root: Vertex, key: i64) {
        self.data.set_root(root);
        self.queue.insert(root, key);
    }

    /// Smallest key of a vertex that is not expanded yet. Discards outdated
    /// entries on the way.
    fn top_key(&mut self) -> Option<i64> {
        while let Some((vertex, key)) = self.queue.peek() {
            if !self.data.is_expanded(vertex) {
                return Some(key);
            }
            self.queue.pop();
        }

        None
    }

    fn settle_next(&mut self) -> Option<Vertex> {
        while let Some((vertex, _)) = self.queue.pop() {
            if !self.data.expand(vertex) {
                return Some(vertex);
            }
        }

        None
    }
}

/// State shared by the bidirectional searches. The sides take turns, one
/// expansion each.
pub struct BidirectionalCore {
    forward: SearchSide,
    backward: SearchSide,
    meeting: Option<Meeting>,
    source: Vertex,
    target: Vertex,
    nodes_visited: u32,
    elapsed: Duration,
    finished: bool,
    forward_turn: bool,
}

impl BidirectionalCore {
    pub fn new(number_of_vertices: u32) -> Self {
        BidirectionalCore {
            forward: SearchSide::new(number_of_vertices),
            backward: SearchSide::new(number_of_vertices),
            meeting: None,
            source: 0,
            target: 0,
            nodes_visited: 0,
            elapsed: Duration::ZERO,
            finished: true,
            forward_turn: true,
        }
    }

    /// Resets all state and seeds both queues. Queries with unknown vertices
    /// or `source == target` finish right away.
    pub fn init(
        &mut self,
        graph: &Graph,
        source: Vertex,
        target: Vertex,
        forward_key: i64,
        backward_key: i64,
    ) {
        let start = Instant::now();
        self.forward.clear();
        self.backward.clear();
        self.meeting = None;
        self.source = source;
        self.target = target;
        self.nodes_visited = 0;
        self.finished = false;
        self.forward_turn = true;

        if !graph.contains(source) || !graph.contains(target) {
            warn!("query {} -> {} references an unknown vertex", source, target);
            self.finished = true;
        } else {
            self.forward.start(source, forward_key);
            self.backward.start(target, backward_key);
            if source == target {
                self.meeting = Some(Meeting {
                    forward: source,
                    backward: target,
                    distance: 0,
                });
                self.finished = true;
            }
        }
        self.elapsed = start.elapsed();
    }

    pub fn source(&self) -> Vertex {
        self.source
    }

    pub fn target(&self) -> Vertex {
        self.target
    }

    pub fn meeting(&self) -> Option<Meeting> {
        self.meeting
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn side(&self, direction: Direction) -> &SearchSide {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    fn sides(&mut self, direction: Direction) -> (&mut SearchSide, &SearchSide) {
        match direction {
            Direction::Forward => (&mut self.forward, &self.backward),
            Direction::Backward => (&mut self.backward, &self.forward),
        }
    }

    /// Smallest keys of both queues, `None` once either side ran dry.
    pub fn top_keys(&mut self) -> Option<(i64, i64)> {
        Some((self.forward.top_key()?, self.backward.top_key()?))
    }

    pub fn next_direction(&mut self) -> Direction {
        let direction = if self.forward_turn {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.forward_turn = !self.forward_turn;
        direction
    }

    /// Expands the next vertex of the given side. If the other side reached
    /// it already, the connection through it is a meeting candidate.
    pub fn settle(&mut self, direction: Direction) -> Option<Vertex> {
        let (side, other) = self.sides(direction);
        let vertex = side.settle_next()?;

        if let (Some(distance), Some(other_distance)) =
            (side.data.get_distance(vertex), other.data.get_distance(vertex))
        {
            self.offer_meeting(vertex, vertex, distance as u64 + other_distance as u64);
        }

        Some(vertex)
    }

    /// Relaxes the edges of `vertex` on the given side. `key` maps a head and
    /// its new tentative distance to its queue key.
    pub fn relax(
        &mut self,
        graph: &Graph,
        direction: Direction,
        vertex: Vertex,
        observer: &mut dyn SearchObserver,
        key: impl Fn(Vertex, Distance) -> i64,
    ) {
        let mut candidates = Vec::new();
        let mut relaxations = 0;
        let (side, other) = self.sides(direction);
        let Some(distance) = side.data.get_distance(vertex) else {
            return;
        };

        for edge in graph.edges(vertex, direction) {
            relaxations += 1;
            if let Some(head_distance) = side.data.update(vertex, edge.head, edge.weight) {
                side.queue.insert(edge.head, key(edge.head, head_distance));
                match direction {
                    Direction::Forward => observer.on_edge_relaxed(vertex, edge.head),
                    Direction::Backward => observer.on_edge_relaxed(edge.head, vertex),
                }
            }

            if let Some(other_distance) = other.data.get_distance(edge.head) {
                let candidate = distance as u64 + edge.weight as u64 + other_distance as u64;
                candidates.push((edge.head, candidate));
            }
        }

        self.nodes_visited += relaxations;
        for (head, candidate) in candidates {
            match direction {
                Direction::Forward => self.offer_meeting(vertex, head, candidate),
                Direction::Backward => self.offer_meeting(head, vertex, candidate),
            }
        }
    }

    fn offer_meeting(&mut self, forward: Vertex, backward: Vertex, distance: u64) {
        if distance >= Distance::MAX as u64 {
            return;
        }
        let distance = distance as Distance;
        if self.meeting.map_or(true, |meeting| distance < meeting.distance) {
            self.meeting = Some(Meeting {
                forward,
                backward,
                distance,
            });
        }
    }

    /// Overrides the best connection with the one through `vertex`.
    pub fn meet_at(&mut self, vertex: Vertex) {
        if let (Some(forward), Some(backward)) = (
            self.forward.data.get_distance(vertex),
            self.backward.data.get_distance(vertex),
        ) {
            self.meeting = Some(Meeting {
                forward: vertex,
                backward: vertex,
                distance: forward.saturating_add(backward),
            });
        }
    }

    pub fn add_elapsed(&mut self, elapsed: Duration) {
        self.elapsed += elapsed;
    }

    pub fn finish(&mut self, name: &str) {
        self.finished = true;
        debug!(
            "{} {} -> {} finished after {} relaxations with {:?}",
            name, self.source, self.target, self.nodes_visited, self.meeting
        );
    }

    pub fn result(&self) -> Result<PathResult, SearchError> {
        if !self.finished {
            return Err(SearchError::NotFinished);
        }
        let meeting = self.meeting.ok_or(SearchError::NoPath {
            from: self.source,
            to: self.target,
        })?;

        let path = path_from_bidirectional_search(
            &self.forward.data,
            &self.backward.data,
            self.source,
            self.target,
            meeting.forward,
            meeting.backward,
        )?;

        Ok(PathResult {
            source: self.source,
            target: self.target,
            distance: meeting.distance,
            elapsed: self.elapsed,
            nodes_visited: self.nodes_visited,
            path,
        })
    }
}
