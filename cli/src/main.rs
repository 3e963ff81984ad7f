//! `graph-index`: load a city graph from a vertex file and an edge file and
//! report degrees, probes, connectivity and traversals.

mod load;
mod report;
mod rng;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::load::{load_config, load_edges, load_vertices, CityGraph, LabelIndex};
use crate::report::Report;
use crate::rng::FastRng;

/// Load a city graph and exercise the graph engine on it
#[derive(Parser, Debug)]
#[command(name = "graph-index")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Vertex file: one city label per line
    vertices: PathBuf,

    /// Edge file: `<city> <city> <distance>` per line
    edges: PathBuf,

    /// TOML engine config (capacities, self-loop and parallel-edge policy)
    #[arg(short, long, env = "GRAPH_INDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Number of random city pairs to probe
    #[arg(long, default_value = "1000", env = "GRAPH_INDEX_PROBES")]
    probes: usize,

    /// Seed for pair selection and deletion order
    #[arg(long, default_value = "42", env = "GRAPH_INDEX_SEED")]
    seed: u64,

    /// Traversal source label (defaults to the first city)
    #[arg(short, long)]
    source: Option<String>,

    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,

    /// Finish by deleting every vertex in random order
    #[arg(long)]
    delete_all: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable with --json.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut graph = CityGraph::with_config(config);
    let mut labels = LabelIndex::new();
    let mut rng = FastRng::new(args.seed);

    let vertex_text = std::fs::read_to_string(&args.vertices)
        .with_context(|| format!("reading vertex file {}", args.vertices.display()))?;
    let cities = load_vertices(&vertex_text, &mut graph, &mut labels);

    let edge_text = std::fs::read_to_string(&args.edges)
        .with_context(|| format!("reading edge file {}", args.edges.display()))?;
    load_edges(&edge_text, &mut graph, &labels)?;

    let source = match (&args.source, cities.first()) {
        (Some(label), _) => Some(label.clone()),
        (None, first) => first.cloned(),
    };
    let (bfs, dfs) = match &source {
        Some(label) => {
            let Some(&id) = labels.get(label.as_str()) else {
                bail!("unknown source vertex {label:?}");
            };
            report::traversals(&graph, id)?
        }
        None => (Vec::new(), Vec::new()),
    };

    let vertices = report::adjacency(&graph)?;
    let probes = report::probe_pairs(&graph, &labels, &cities, args.probes, &mut rng)?;

    let deletion = if args.delete_all {
        Some(report::delete_all(&mut graph, &labels, &cities, &mut rng)?)
    } else {
        None
    };

    let report = Report {
        vertices,
        probes,
        source,
        bfs,
        dfs,
        deletion,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_text(&report);
    }
    Ok(())
}
