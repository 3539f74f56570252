use serde::{Deserialize, Serialize};

use super::{Distance, Vertex};

/// An entry of an adjacency list. The tail is implied by the list the edge is
/// stored in.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Edge {
    pub head: Vertex,
    pub weight: Distance,
}

impl Edge {
    pub fn new(head: Vertex, weight: Distance) -> Edge {
        Edge { head, weight }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, Debug)]
pub struct DirectedWeightedEdge {
    tail: Vertex,
    head: Vertex,
    weight: Distance,
}

impl DirectedWeightedEdge {
    pub fn new(tail: Vertex, head: Vertex, weight: Distance) -> DirectedWeightedEdge {
        DirectedWeightedEdge { tail, head, weight }
    }

    pub fn tail(&self) -> Vertex {
        self.tail
    }

    pub fn head(&self) -> Vertex {
        self.head
    }

    pub fn weight(&self) -> Distance {
        self.weight
    }

    pub fn reversed(&self) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }

    pub fn tailless(&self) -> Edge {
        Edge {
            head: self.head,
            weight: self.weight,
        }
    }
}
