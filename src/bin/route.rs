use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use osm_paths::{
    config::SearchConfig,
    create_search,
    search::{stepper::Stepper, PathFinding},
    Algorithm, PreprocessedGraph,
};

/// Answers a single shortest path query and prints the result as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph as .fmi text or preprocessed .bincode file
    #[arg(short, long)]
    graph: PathBuf,
    /// Vertex the path starts at
    #[arg(short, long)]
    source: u32,
    /// Vertex the path ends at
    #[arg(short, long)]
    target: u32,
    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Dijkstra)]
    algorithm: Algorithm,
    /// JSON file with search settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the number of landmarks of the config
    #[arg(long)]
    number_of_landmarks: Option<u32>,
    /// Overrides the landmark update interval of the config
    #[arg(long)]
    landmark_update_interval: Option<u32>,
    /// Run frame by frame and log the number of relaxed edges per frame
    #[arg(long)]
    stepwise: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SearchConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(number_of_landmarks) = args.number_of_landmarks {
        config.number_of_landmarks = number_of_landmarks;
    }
    if let Some(landmark_update_interval) = args.landmark_update_interval {
        config.landmark_update_interval = landmark_update_interval;
    }

    let preprocessed = PreprocessedGraph::from_file(&args.graph)
        .with_context(|| format!("reading graph {}", args.graph.display()))?;
    let mut search = create_search(
        args.algorithm,
        &preprocessed.graph,
        &preprocessed.landmarks,
        &config,
    );

    let result = if args.stepwise {
        let mut stepper = Stepper::new(
            search.as_mut(),
            args.source,
            args.target,
            config.draw_interval,
        );
        for (number, frame) in stepper.by_ref().enumerate() {
            info!(
                "frame {}: {} relaxed edges, {:?}",
                number,
                frame.relaxed_edges.len(),
                frame.status
            );
        }
        stepper.result()
    } else {
        search.find_path(args.source, args.target)
    };

    let result = result.with_context(|| {
        format!(
            "{} query {} -> {}",
            args.algorithm.name(),
            args.source,
            args.target
        )
    })?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
