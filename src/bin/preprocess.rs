use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use osm_paths::{
    graphs::graph_factory::GraphFactory, search::alt::landmark::Landmarks, PreprocessedGraph,
};

#[derive(Debug, ValueEnum, Clone, Copy)]
enum Strategy {
    Random,
    Farthest,
}

/// Converts a .fmi graph into a .bincode file with precomputed landmarks.
/// Reading a .bincode file is way faster than a .fmi file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .fmi format
    #[arg(short, long)]
    fmi: PathBuf,
    /// Outfile in .bincode format
    #[arg(short, long)]
    output: PathBuf,
    /// Number of landmarks to precompute
    #[arg(short, long, default_value_t = 16)]
    landmarks: u32,
    /// How landmarks are selected
    #[arg(short, long, value_enum, default_value_t = Strategy::Farthest)]
    strategy: Strategy,
    /// Seed for random landmarks, start vertex for farthest landmarks
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let graph = GraphFactory::from_fmi_file(&args.fmi)
        .with_context(|| format!("reading {}", args.fmi.display()))?;
    info!("Reading fmi graph took {:?}", start.elapsed());

    let start = Instant::now();
    let landmarks = match args.strategy {
        Strategy::Random => Landmarks::random(&graph, args.landmarks, args.seed),
        Strategy::Farthest => {
            let start_vertex = (args.seed % graph.number_of_vertices().max(1) as u64) as u32;
            Landmarks::farthest(&graph, args.landmarks, start_vertex)
        }
    };
    info!(
        "Generating {} landmarks took {:?}",
        landmarks.len(),
        start.elapsed()
    );

    let start = Instant::now();
    PreprocessedGraph { graph, landmarks }
        .to_bincode_file(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("Writing bincode took {:?}", start.elapsed());

    Ok(())
}
