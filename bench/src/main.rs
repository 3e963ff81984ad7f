use graph_index_core::{
    breadth_first_search, depth_first_search, is_connected, Graph, GraphError, VertexId,
};
use std::time::Instant;

type BenchGraph = Graph<u64, u32>;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(50_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-index-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  chain       Path graph 1-2-...-n (deepest BFS)");
        println!("  star        One hub joined to every other vertex (one huge adjacency list)");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  grid        Square lattice");
        println!();
        println!("Default vertex_count: 50000");
        return;
    }

    if vertex_count < 2 {
        eprintln!("vertex_count must be at least 2");
        std::process::exit(2);
    }

    println!("graph-index-bench");
    println!("=================");
    println!();

    let generators: Vec<(&str, fn(u64) -> Result<BenchGraph, GraphError>)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "star" => vec![("Star", gen_star)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "grid" => vec![("Grid lattice", gen_grid)],
        "all" => vec![
            ("Chain", gen_chain as fn(u64) -> Result<BenchGraph, GraphError>),
            ("Star", gen_star),
            ("Erdos-Renyi random", gen_random),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Grid lattice", gen_grid),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(err) = run_benchmark(name, generator, vertex_count) {
            eprintln!("{} failed: {}", name, err);
            std::process::exit(1);
        }
    }
}

fn run_benchmark(
    name: &str,
    generator: fn(u64) -> Result<BenchGraph, GraphError>,
    vertex_count: u64,
) -> Result<(), GraphError> {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let mut graph = generator(vertex_count)?;
    let gen_time = t.elapsed();
    println!(
        "Inserted in {:.2}s: {} vertices, {} edges, ~{:.1}MB",
        gen_time.as_secs_f64(),
        graph.num_vertices(),
        graph.num_edges(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let t = Instant::now();
    let bfs = breadth_first_search(&graph, 1)?;
    println!("BFS from 1: {} reached in {:.1}ms", bfs.len(), ms(t));

    let t = Instant::now();
    let dfs = depth_first_search(&graph, 1)?;
    println!("DFS from 1: {} reached in {:.1}ms", dfs.len(), ms(t));

    let probes = 100_000u64;
    let mut rng = FastRng::new(2024);
    let t = Instant::now();
    let mut hits = 0u64;
    for _ in 0..probes {
        let a = 1 + rng.next(vertex_count);
        let b = 1 + rng.next(vertex_count);
        if graph.probe_edge(a, b)?.is_some() {
            hits += 1;
        }
    }
    let elapsed = t.elapsed().as_secs_f64();
    println!(
        "Probes: {} ({} hits) at {:.0}/s",
        probes,
        hits,
        probes as f64 / elapsed.max(f64::EPSILON)
    );

    let far: VertexId = vertex_count;
    let t = Instant::now();
    let connected = is_connected(&graph, 1, far)?;
    println!("is_connected(1, {}): {} in {:.1}ms", far, connected, ms(t));

    // Cascade-delete every even id; the hub of the star survives.
    let t = Instant::now();
    let mut deleted = 0u64;
    for id in (2..=vertex_count).step_by(2) {
        graph.delete_vertex(id)?;
        deleted += 1;
    }
    println!(
        "Deleted {} vertices in {:.2}s: {} vertices, {} edges remain",
        deleted,
        t.elapsed().as_secs_f64(),
        graph.num_vertices(),
        graph.num_edges()
    );

    let t = Instant::now();
    graph.check_consistency()?;
    println!("Consistency check passed in {:.1}ms", ms(t));
    println!();
    Ok(())
}

fn ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ---------------------------------------------------------------------------
// Generators: single-threaded and deterministic. Vertex ids come out as
// 1..=n because the graph assigns them in insertion order.
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn with_vertices(vertex_count: u64, edge_count: u64) -> BenchGraph {
    let mut graph = Graph::with_capacity(vertex_count as usize, edge_count as usize);
    for i in 0..vertex_count {
        graph.add_vertex(i);
    }
    graph
}

/// Path graph. BFS and DFS both walk the full depth.
fn gen_chain(vertex_count: u64) -> Result<BenchGraph, GraphError> {
    let mut graph = with_vertices(vertex_count, vertex_count);
    let mut rng = FastRng::new(42);
    for id in 1..vertex_count {
        graph.add_edge(id, id + 1, rng.next(1000) as u32)?;
    }
    Ok(graph)
}

/// Hub-and-spoke. Every deletion edits the hub's adjacency list.
fn gen_star(vertex_count: u64) -> Result<BenchGraph, GraphError> {
    let mut graph = with_vertices(vertex_count, vertex_count);
    let mut rng = FastRng::new(12345);
    for leaf in 2..=vertex_count {
        graph.add_edge(1, leaf, rng.next(1000) as u32)?;
    }
    Ok(graph)
}

/// Erdos-Renyi: uniform random edges.
///
/// We target ~5 edges per vertex on average. Baseline topology with no
/// structure.
fn gen_random(vertex_count: u64) -> Result<BenchGraph, GraphError> {
    let target_edges = vertex_count * 5;
    let mut graph = with_vertices(vertex_count, target_edges);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = 1 + rng.next(vertex_count);
        let to = 1 + rng.next(vertex_count);
        if from != to {
            graph.add_edge(from, to, rng.next(1000) as u32)?;
        }
    }
    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each vertex connects to its K nearest successors on a ring; each edge is
/// rewired to a random vertex with probability p.
fn gen_small_world(vertex_count: u64) -> Result<BenchGraph, GraphError> {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = with_vertices(vertex_count, vertex_count * k);
    let mut rng = FastRng::new(67890);

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = (i + j) % vertex_count;
            let target = if rng.next_f64() < p {
                let rewired = rng.next(vertex_count);
                if rewired != i {
                    rewired
                } else {
                    neighbor
                }
            } else {
                neighbor
            };
            if target != i {
                graph.add_edge(i + 1, target + 1, rng.next(1000) as u32)?;
            }
        }
    }
    Ok(graph)
}

/// Square lattice, `side × side` with `side = ⌈√n⌉`, truncated to n vertices.
fn gen_grid(vertex_count: u64) -> Result<BenchGraph, GraphError> {
    let side = (vertex_count as f64).sqrt().ceil() as u64;
    let mut graph = with_vertices(vertex_count, vertex_count * 2);
    let mut rng = FastRng::new(99999);

    for i in 0..vertex_count {
        let col = i % side;
        if col + 1 < side && i + 1 < vertex_count {
            graph.add_edge(i + 1, i + 2, rng.next(1000) as u32)?;
        }
        if i + side < vertex_count {
            graph.add_edge(i + 1, i + side + 1, rng.next(1000) as u32)?;
        }
    }
    Ok(graph)
}
