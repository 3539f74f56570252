use std::time::Duration;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};
use log::error;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;

use crate::{
    graphs::{Distance, Graph, Vertex},
    search::{dijkstra::Dijkstra, path::PathResult, PathFinding, SearchError},
};

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    if let Ok(style) =
        ProgressStyle::with_template(" {msg} {wide_bar} {pos}/{len} estimated remaining: {eta_precise}")
    {
        bar.set_style(style);
    }
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// `number_of_pairs` random queries with `source != target`, reproducible
/// through `seed`. Graphs with fewer than two vertices yield no pairs.
pub fn random_pairs(graph: &Graph, number_of_pairs: u32, seed: u64) -> Vec<(Vertex, Vertex)> {
    let number_of_vertices = graph.number_of_vertices();
    if number_of_vertices < 2 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    (0..number_of_pairs)
        .map(|_| {
            // guarantee that source != target
            let source = rng.gen_range(0..number_of_vertices);
            let mut target = rng.gen_range(0..number_of_vertices - 1);
            if target >= source {
                target += 1;
            }
            (source, target)
        })
        .collect()
}

/// Splits the outcome of a query into found and not found. Any error other
/// than [SearchError::NoPath] is passed on.
fn found(result: Result<PathResult, SearchError>) -> Result<Option<PathResult>, SearchError> {
    match result {
        Ok(result) => Ok(Some(result)),
        Err(SearchError::NoPath { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Reference distances of `pairs` computed with plain Dijkstra, in parallel.
/// Fails on the first query that ends in an inconsistent search state.
pub fn ground_truth(
    graph: &Graph,
    pairs: &[(Vertex, Vertex)],
) -> Result<Vec<Option<Distance>>, SearchError> {
    pairs
        .par_iter()
        .progress_with(get_progressbar("Computing ground truth", pairs.len() as u64))
        .map_init(
            || Dijkstra::new(graph),
            |dijkstra, &(source, target)| {
                let result = found(dijkstra.find_path(source, target))?;
                Ok(result.map(|result| result.distance))
            },
        )
        .collect()
}

/// Aggregated measurements of one algorithm over a set of queries.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSummary {
    pub algorithm: String,
    pub number_of_queries: usize,
    pub average_time: Duration,
    pub average_nodes_visited: f64,
    /// Queries whose distance differs from the reference by more than one,
    /// whose path does not cost the reported distance or that failed with an
    /// error other than not finding a path.
    pub number_of_mismatches: usize,
}

/// Runs `search` on every pair and compares against `expected`.
pub fn benchmark<S: PathFinding + ?Sized>(
    algorithm: &str,
    graph: &Graph,
    search: &mut S,
    pairs: &[(Vertex, Vertex)],
    expected: &[Option<Distance>],
) -> BenchmarkSummary {
    let mut total_time = Duration::ZERO;
    let mut total_nodes_visited = 0u64;
    let mut number_of_mismatches = 0;

    for (&(source, target), expected) in pairs.iter().zip(expected) {
        let result = match found(search.find_path(source, target)) {
            Ok(result) => result,
            Err(err) => {
                error!("{} {} -> {} failed: {}", algorithm, source, target, err);
                number_of_mismatches += 1;
                continue;
            }
        };
        if let Some(result) = &result {
            total_time += result.elapsed;
            total_nodes_visited += result.nodes_visited as u64;
        }

        let distance = result.as_ref().map(|result| result.distance);
        let consistent = result.as_ref().map_or(true, |result| {
            graph.get_path_distance(&result.path) == Some(result.distance)
        });
        let agrees = match (distance, expected) {
            (Some(distance), Some(expected)) => distance.abs_diff(*expected) <= 1,
            (None, None) => true,
            _ => false,
        };
        if !agrees || !consistent {
            number_of_mismatches += 1;
        }
    }

    let number_of_queries = pairs.len().max(1);
    BenchmarkSummary {
        algorithm: algorithm.to_string(),
        number_of_queries: pairs.len(),
        average_time: total_time / number_of_queries as u32,
        average_nodes_visited: total_nodes_visited as f64 / number_of_queries as f64,
        number_of_mismatches,
    }
}
