use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::{FromStr, SplitWhitespace},
};

use indicatif::ProgressIterator;
use log::{info, warn};

use super::{
    coordinate::Coordinate, edge::DirectedWeightedEdge, Distance, Graph, GraphError, Vertex,
};

#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    /// Reads a graph in the FMI text format:
    ///
    /// ```text
    /// # comments
    ///
    /// <number of vertices>
    /// <number of edges>
    /// <id> <osm id> <lat> <lon> <elevation>     (one line per vertex)
    /// <tail> <head> <cost> [<type> <maxspeed>]  (one line per edge)
    /// ```
    pub fn from_fmi_file(path: &Path) -> Result<Graph, GraphError> {
        let reader = BufReader::new(File::open(path)?);
        let graph = Self::from_fmi_reader(reader)?;
        info!(
            "read {} vertices and {} edges from {}",
            graph.number_of_vertices(),
            graph.number_of_edges(),
            path.display()
        );
        Ok(graph)
    }

    pub fn from_fmi_reader<R: BufRead>(reader: R) -> Result<Graph, GraphError> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(index, line)| line.map(|line| (index + 1, line)))
            .filter(|line| match line {
                Ok((_, line)) => !line.starts_with('#') && !line.trim().is_empty(),
                Err(_) => true,
            });

        let (line, header) = lines.next().ok_or(GraphError::Malformed {
            line: 0,
            reason: "missing number of vertices".to_string(),
        })??;
        let number_of_vertices: usize = parse_value(&mut header.split_whitespace(), line, "vertex count")?;
        let (line, header) = lines.next().ok_or(GraphError::Malformed {
            line,
            reason: "missing number of edges".to_string(),
        })??;
        let number_of_edges: usize = parse_value(&mut header.split_whitespace(), line, "edge count")?;

        let mut coordinates = Vec::with_capacity(number_of_vertices);
        for vertex_line in lines
            .by_ref()
            .take(number_of_vertices)
            .progress_count(number_of_vertices as u64)
        {
            // nodeID nodeID2 latitude longitude elevation
            let (line, vertex_line) = vertex_line?;
            let mut values = vertex_line.split_whitespace();
            let _: Vertex = parse_value(&mut values, line, "vertex id")?;
            let _: u64 = parse_value(&mut values, line, "osm id")?;
            let lat: f64 = parse_value(&mut values, line, "latitude")?;
            let lon: f64 = parse_value(&mut values, line, "longitude")?;
            coordinates.push(Coordinate::from_lat_lon(lat, lon));
        }
        if coordinates.len() != number_of_vertices {
            return Err(GraphError::CoordinateCount {
                expected: number_of_vertices,
                actual: coordinates.len(),
            });
        }

        if let Some(origin) = coordinates.first().copied() {
            coordinates
                .iter_mut()
                .for_each(|coordinate| coordinate.project_around(&origin));
        }

        let mut edges = Vec::with_capacity(number_of_edges);
        for edge_line in lines
            .by_ref()
            .take(number_of_edges)
            .progress_count(number_of_edges as u64)
        {
            // srcIDX trgIDX cost type maxspeed
            let (line, edge_line) = edge_line?;
            let mut values = edge_line.split_whitespace();
            let tail: Vertex = parse_value(&mut values, line, "tail")?;
            let head: Vertex = parse_value(&mut values, line, "head")?;
            let cost: f64 = parse_value(&mut values, line, "cost")?;
            // Distance::MAX marks unreachable vertices and is not a valid cost
            if !cost.is_finite() || cost < 0.0 || cost.round() >= Distance::MAX as f64 {
                return Err(GraphError::InvalidCost { tail, head, cost });
            }
            edges.push(DirectedWeightedEdge::new(tail, head, cost.round() as Distance));
        }

        let graph = Graph::from_edges(number_of_vertices as u32, &edges, coordinates)?;

        let violations = graph.count_edges_shorter_than_crow_flies(1.0);
        if violations > 0 {
            warn!(
                "{} edges are cheaper than their crow-flies distance, the haversine heuristic is not admissible on this graph",
                violations
            );
        }

        Ok(graph)
    }
}

fn parse_value<T: FromStr>(
    values: &mut SplitWhitespace,
    line: usize,
    name: &str,
) -> Result<T, GraphError> {
    let value = values.next().ok_or_else(|| GraphError::Malformed {
        line,
        reason: format!("no {} found", name),
    })?;
    value.parse().map_err(|_| GraphError::Malformed {
        line,
        reason: format!("unable to parse {} from '{}'", name, value),
    })
}
