use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use osm_paths::{
    config::SearchConfig,
    create_search,
    utility::{benchmark, ground_truth, random_pairs},
    Algorithm, PreprocessedGraph,
};

/// Runs every algorithm on the same random queries and compares them with
/// Dijkstra.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph as .fmi text or preprocessed .bincode file
    #[arg(short, long)]
    graph: PathBuf,
    /// Number of random queries
    #[arg(short, long, default_value_t = 1_000)]
    number_of_queries: u32,
    /// Seed of the random queries
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// JSON file with search settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the summaries as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SearchConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    let preprocessed = PreprocessedGraph::from_file(&args.graph)
        .with_context(|| format!("reading graph {}", args.graph.display()))?;
    let graph = &preprocessed.graph;

    let pairs = random_pairs(graph, args.number_of_queries, args.seed);
    let expected = ground_truth(graph, &pairs).context("computing reference distances")?;
    info!(
        "{} of {} queries have a path",
        expected.iter().flatten().count(),
        pairs.len()
    );

    let mut summaries = Vec::new();
    for algorithm in [
        Algorithm::Dijkstra,
        Algorithm::Astar,
        Algorithm::Bidijkstra,
        Algorithm::Biastar,
        Algorithm::Alt,
    ] {
        let mut search = create_search(algorithm, graph, &preprocessed.landmarks, &config);
        let summary = benchmark(algorithm.name(), graph, search.as_mut(), &pairs, &expected);
        info!(
            "{:<10} average time {:?}, average nodes visited {:.1}",
            summary.algorithm, summary.average_time, summary.average_nodes_visited
        );
        if summary.number_of_mismatches > 0 {
            warn!(
                "{} disagrees with dijkstra on {} queries",
                summary.algorithm, summary.number_of_mismatches
            );
        }
        summaries.push(summary);
    }

    if let Some(output) = &args.output {
        let writer = std::io::BufWriter::new(
            std::fs::File::create(output)
                .with_context(|| format!("creating {}", output.display()))?,
        );
        serde_json::to_writer_pretty(writer, &summaries)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    Ok(())
}
