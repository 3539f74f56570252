use std::{
    fs::File,
    io::{BufReader, BufWriter, Read},
    path::Path,
};

use clap::ValueEnum;
use config::SearchConfig;
use graphs::{graph_factory::GraphFactory, Graph, GraphError};
use log::{info, warn};
use search::{
    alt::{landmark::Landmarks, AltSearch},
    astar::AStar,
    bidirectional::{
        bidirectional_astar::BidirectionalAStar, bidirectional_dijkstra::BidirectionalDijkstra,
    },
    dijkstra::Dijkstra,
    SteppedSearch,
};
use serde::{Deserialize, Serialize};
use utility::get_progressspinner;

pub mod config;
pub mod graphs;
pub mod search;
pub mod utility;

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    Astar,
    Bidijkstra,
    Biastar,
    Alt,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
            Algorithm::Bidijkstra => "bidijkstra",
            Algorithm::Biastar => "biastar",
            Algorithm::Alt => "alt",
        }
    }
}

/// A graph together with the landmarks computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessedGraph {
    pub graph: Graph,
    pub landmarks: Landmarks,
}

impl PreprocessedGraph {
    /// Reads `.fmi` text files (without landmarks) or bincode files written
    /// by [PreprocessedGraph::to_bincode_file].
    pub fn from_file(path: &Path) -> Result<PreprocessedGraph, GraphError> {
        if path.extension().is_some_and(|extension| extension == "fmi") {
            let graph = GraphFactory::from_fmi_file(path)?;
            return Ok(PreprocessedGraph {
                graph,
                landmarks: Landmarks::default(),
            });
        }

        let spinner = get_progressspinner("Reading graph");
        let preprocessed = Self::from_bincode_reader(BufReader::new(File::open(path)?))?;
        spinner.finish_and_clear();
        info!(
            "read {} vertices, {} edges and {} landmarks from {}",
            preprocessed.graph.number_of_vertices(),
            preprocessed.graph.number_of_edges(),
            preprocessed.landmarks.len(),
            path.display()
        );

        Ok(preprocessed)
    }

    /// Decodes a graph written by [PreprocessedGraph::to_bincode_file] and
    /// checks it with [PreprocessedGraph::validate].
    pub fn from_bincode_reader<R: Read>(reader: R) -> Result<PreprocessedGraph, GraphError> {
        let preprocessed: PreprocessedGraph = bincode::deserialize_from(reader)?;
        preprocessed.validate()?;
        Ok(preprocessed)
    }

    /// Checks the graph invariants and that every landmark stores one
    /// distance per vertex in both directions.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.graph.validate()?;

        let expected = self.graph.number_of_vertices() as usize;
        for landmark in self.landmarks.landmarks.iter() {
            if !self.graph.contains(landmark.vertex) {
                return Err(GraphError::UnknownVertex {
                    tail: landmark.vertex,
                    head: landmark.vertex,
                    number_of_vertices: self.graph.number_of_vertices(),
                });
            }
            for actual in [landmark.distances.len(), landmark.bi_distances.len()] {
                if actual != expected {
                    return Err(GraphError::LandmarkLength {
                        landmark: landmark.vertex,
                        expected,
                        actual,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn to_bincode_file(&self, path: &Path) -> Result<(), GraphError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }
}

/// Builds the search for `algorithm`. A* variants use the great-circle
/// heuristic, ALT uses `landmarks` as configured.
pub fn create_search<'a>(
    algorithm: Algorithm,
    graph: &'a Graph,
    landmarks: &'a Landmarks,
    config: &SearchConfig,
) -> Box<dyn SteppedSearch + 'a> {
    match algorithm {
        Algorithm::Dijkstra => Box::new(Dijkstra::new(graph)),
        Algorithm::Astar => Box::new(AStar::with_haversine(graph)),
        Algorithm::Bidijkstra => Box::new(BidirectionalDijkstra::new(graph)),
        Algorithm::Biastar => Box::new(BidirectionalAStar::with_haversine(graph)),
        Algorithm::Alt => {
            if landmarks.is_empty() {
                warn!("alt search without landmarks degrades to dijkstra");
            }
            Box::new(AltSearch::new(
                graph,
                landmarks,
                config.number_of_landmarks,
                config.landmark_update_interval,
            ))
        }
    }
}
