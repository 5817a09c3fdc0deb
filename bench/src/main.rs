use maze_paths_core::{AdjacencyGraph, FloydWarshall, Labyrinth, MazeError, Point, INF};
use std::fmt::Display;
use std::time::Instant;

type Generated<T> = Result<AdjacencyGraph<T>, MazeError>;

const MODES: [&str; 6] = ["labyrinth", "chain", "random", "smallworld", "barbell", "dla"];

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(400);

    if mode == "help" || mode == "--help" {
        println!("Usage: maze-paths-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  labyrinth   Perfect labyrinth carved by randomized depth-first search");
        println!("  chain       Single path through every node (worst-case path length)");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 400. Floyd-Warshall is cubic in node_count,");
        println!("and the adjacency matrix is quadratic.");
        return;
    }

    if node_count < 2 {
        eprintln!("node_count must be at least 2");
        return;
    }

    println!("maze-paths-bench");
    println!("================");
    println!();

    let modes: Vec<&str> = match mode {
        "all" => MODES.to_vec(),
        m if MODES.contains(&m) => vec![m],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for mode in modes {
        let outcome = match mode {
            "labyrinth" => {
                run_benchmark("Labyrinth (randomized DFS)", gen_labyrinth, node_count)
            }
            "chain" => run_benchmark("Chain", gen_chain, node_count),
            "random" => run_benchmark("Erdos-Renyi random", gen_random, node_count),
            "smallworld" => {
                run_benchmark("Small-world (Watts-Strogatz)", gen_small_world, node_count)
            }
            "barbell" => {
                run_benchmark("Barbell (clique-bridge-clique)", gen_barbell, node_count)
            }
            _ => run_benchmark("DLA (organic branching)", gen_dla, node_count),
        };
        if let Err(e) = outcome {
            eprintln!("{} failed: {}", mode, e);
        }
    }
}

fn run_benchmark<T: Clone + Display>(
    name: &str,
    generator: fn(usize) -> Generated<T>,
    node_count: usize,
) -> Result<(), MazeError> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count)?;
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.1}ms: {} nodes, {} edges, ~{:.1}KB",
        gen_time.as_secs_f64() * 1000.0,
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1024.0
    );
    if graph.is_empty() {
        println!();
        return Ok(());
    }

    let t = Instant::now();
    let paths = FloydWarshall::solve(&graph);
    let solve_time = t.elapsed();

    let mut reachable = 0usize;
    let mut diameter = 0u32;
    for &d in paths.distance_rows().flatten() {
        if d != INF {
            reachable += 1;
            diameter = diameter.max(d);
        }
    }
    let n = graph.node_count();
    println!(
        "Floyd-Warshall in {:.1}ms: {}/{} pairs reachable, diameter {}",
        solve_time.as_secs_f64() * 1000.0,
        reachable,
        n * n,
        diameter
    );

    // Path from the first node to the last
    let far_node = n - 1;
    let t = Instant::now();
    let path = paths.path_values(0, far_node)?;
    let elapsed = t.elapsed();
    match path {
        Some(p) => println!(
            "Shortest path {} -> {}: {} hops, reconstructed in {:.3}ms",
            graph.node(0)?,
            graph.node(far_node)?,
            p.len() - 1,
            elapsed.as_secs_f64() * 1000.0
        ),
        None => println!(
            "Shortest path {} -> {}: no path ({:.3}ms)",
            graph.node(0)?,
            graph.node(far_node)?,
            elapsed.as_secs_f64() * 1000.0
        ),
    }

    // Deleting the first node shifts every row and column of the matrix
    let mut shrunk = graph.clone();
    let t = Instant::now();
    shrunk.delete_node(0)?;
    println!(
        "delete_node(0) in {:.3}ms: {} nodes, {} edges left",
        t.elapsed().as_secs_f64() * 1000.0,
        shrunk.node_count(),
        shrunk.edge_count()
    );
    println!("Snapshot stale after delete: {}", paths.is_stale(&shrunk));
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Graph of `node_count` nodes valued by their insertion index.
fn numbered(node_count: usize) -> Generated<u64> {
    let mut graph = AdjacencyGraph::new(node_count)?;
    for i in 0..node_count {
        graph.insert_node(i as u64)?;
    }
    Ok(graph)
}

/// Perfect labyrinth: a spanning tree of the room grid carved by iterative
/// randomized depth-first search.
///
/// Rooms sit at odd coordinates of a `(2k+1) x (2k+1)` grid. About half of the
/// open cells are rooms and half are the corridors between them, so `k` is
/// picked to land near `node_count` open cells. The entrance is the only open
/// cell of the top row and the exit the only open cell of the bottom row,
/// making them the first and last graph nodes.
fn gen_labyrinth(node_count: usize) -> Generated<Point> {
    let k = ((node_count as f64 / 2.0).sqrt() as i32).max(1);
    let side = 2 * k + 1;
    let entrance = Point::new(0, 1);
    let exit = Point::new(side - 1, side - 2);
    let mut maze = Labyrinth::new(side, side, entrance, exit)?;
    let mut rng = FastRng::new(2024);

    let room = |r: i32, c: i32| Point::new(2 * r + 1, 2 * c + 1);
    let mut visited = vec![false; (k * k) as usize];
    let mut stack: Vec<(i32, i32)> = vec![(0, 0)];
    visited[0] = true;
    maze.add_path(room(0, 0))?;

    while let Some(&(r, c)) = stack.last() {
        let unvisited: Vec<(i32, i32)> = [(r + 1, c), (r - 1, c), (r, c + 1), (r, c - 1)]
            .into_iter()
            .filter(|&(nr, nc)| {
                nr >= 0 && nr < k && nc >= 0 && nc < k && !visited[(nr * k + nc) as usize]
            })
            .collect();
        if unvisited.is_empty() {
            stack.pop();
            continue;
        }
        let (nr, nc) = unvisited[rng.next(unvisited.len())];
        visited[(nr * k + nc) as usize] = true;
        // Corridor cell halfway between the two rooms
        maze.add_path(Point::new(r + nr + 1, c + nc + 1))?;
        maze.add_path(room(nr, nc))?;
        stack.push((nr, nc));
    }

    Ok(maze.generate_graph()?)
}

/// A single chain 0 - 1 - ... - n-1. The path between the ends visits every node.
fn gen_chain(node_count: usize) -> Generated<u64> {
    let mut graph = numbered(node_count)?;
    for i in 1..node_count {
        graph.add_edge(i - 1, i)?;
    }
    Ok(graph)
}

/// Erdos-Renyi: uniform random edges, ~2 per node on average so the graph
/// sits near the connectivity threshold.
fn gen_random(node_count: usize) -> Generated<u64> {
    let mut graph = numbered(node_count)?;
    let mut rng = FastRng::new(54321);
    for _ in 0..node_count * 2 {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_edge(from, to)?;
        }
    }
    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
fn gen_small_world(node_count: usize) -> Generated<u64> {
    let k = 3usize.min(node_count - 1); // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut graph = numbered(node_count)?;
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                graph.add_edge(i, if rewired != i { rewired } else { neighbor })?;
            } else if neighbor != i {
                graph.add_edge(i, neighbor)?;
            }
        }
    }
    Ok(graph)
}

/// Barbell: two dense cliques connected by a chain of bridge nodes.
fn gen_barbell(node_count: usize) -> Generated<u64> {
    let bridge_len = (node_count / 10).clamp(1, 10);
    let clique_size = (node_count - bridge_len) / 2;
    if clique_size == 0 {
        return gen_chain(node_count);
    }
    let mut graph = numbered(clique_size * 2 + bridge_len)?;
    let mut rng = FastRng::new(99999);

    let b_start = clique_size + bridge_len;
    for start in [0, b_start] {
        for i in 0..clique_size {
            for _ in 0..8usize.min(clique_size.saturating_sub(1)) {
                let target = rng.next(clique_size);
                if target != i {
                    graph.add_edge(start + i, start + target)?;
                }
            }
        }
    }

    // Bridge: chain from the last node of A through to the first node of B
    for id in clique_size - 1..b_start {
        graph.add_edge(id, id + 1)?;
    }
    Ok(graph)
}

/// DLA (Diffusion-Limited Aggregation): each new node attaches to a recent
/// "surface" node, with an occasional second edge creating loops.
fn gen_dla(node_count: usize) -> Generated<u64> {
    let mut graph = numbered(node_count)?;
    let mut rng = FastRng::new(77777);
    let surface_max = (node_count / 10).max(1);

    for new_node in 1..node_count {
        let lo = new_node.saturating_sub(surface_max);
        let attach_to = lo + rng.next(new_node - lo);
        graph.add_edge(new_node, attach_to)?;

        // 10% chance of a second connection
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                graph.add_edge(new_node, other)?;
            }
        }
    }
    Ok(graph)
}
