use crate::graphs::Vertex;

/// Receives the edges a search relaxes, e.g. to draw the explored part of
/// the graph.
pub trait SearchObserver {
    fn on_edge_relaxed(&mut self, from: Vertex, to: Vertex);
}

pub struct NoObserver;

impl SearchObserver for NoObserver {
    fn on_edge_relaxed(&mut self, _from: Vertex, _to: Vertex) {}
}

impl<F: FnMut(Vertex, Vertex)> SearchObserver for F {
    fn on_edge_relaxed(&mut self, from: Vertex, to: Vertex) {
        self(from, to)
    }
}

/// Collects relaxed edges until taken.
#[derive(Debug, Default, Clone)]
pub struct EdgeCollector {
    pub edges: Vec<(Vertex, Vertex)>,
}

impl EdgeCollector {
    pub fn new() -> Self {
        EdgeCollector::default()
    }

    pub fn take(&mut self) -> Vec<(Vertex, Vertex)> {
        std::mem::take(&mut self.edges)
    }
}

impl SearchObserver for EdgeCollector {
    fn on_edge_relaxed(&mut self, from: Vertex, to: Vertex) {
        self.edges.push((from, to));
    }
}
