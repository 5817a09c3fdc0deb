use std::fmt;

use crate::error::{GraphError, Result};
use crate::graph::AdjacencyGraph;

/// Distance reported for pairs with no connecting path.
pub const INF: u32 = u32::MAX;

/// All-pairs shortest paths over a snapshot of an [`AdjacencyGraph`].
///
/// Construction copies the node values and seeds the distance and
/// predecessor matrices from the graph's connectivity; nothing borrowed from
/// the graph is kept. The snapshot does not follow later mutation of the
/// graph: use [`is_stale`](Self::is_stale) and build a new engine once the
/// topology has changed.
#[derive(Debug, Clone)]
pub struct FloydWarshall<T> {
    nodes: Vec<T>,
    n: usize,
    /// Row-major `n × n` distances.
    dist: Vec<u32>,
    /// Row-major `n × n` predecessor of `j` on the best path from `i`.
    pred: Vec<Option<usize>>,
    generation: u64,
    generated: bool,
}

impl<T: Clone> FloydWarshall<T> {
    /// Snapshot the graph and seed the matrices with direct edges.
    ///
    /// `dist[i][i] = 0`, `dist[i][j] = 1` for an edge, `INF` otherwise.
    /// `pred[i][j] = i` for every finite off-diagonal pair.
    pub fn new(graph: &AdjacencyGraph<T>) -> Self {
        let n = graph.node_count();
        let mut dist = vec![INF; n * n];
        let mut pred = vec![None; n * n];

        for i in 0..n {
            for j in 0..n {
                let cell = i * n + j;
                if i == j {
                    dist[cell] = 0;
                } else if graph.cell(i, j) {
                    dist[cell] = 1;
                    pred[cell] = Some(i);
                }
            }
        }

        Self {
            nodes: graph.nodes().to_vec(),
            n,
            dist,
            pred,
            generation: graph.generation(),
            generated: false,
        }
    }

    /// Snapshot and run [`generate_shortest_paths`](Self::generate_shortest_paths).
    pub fn solve(graph: &AdjacencyGraph<T>) -> Self {
        let mut fw = Self::new(graph);
        fw.generate_shortest_paths();
        fw
    }
}

impl<T> FloydWarshall<T> {
    /// Relax every pair through every intermediate node, `k` outermost.
    ///
    /// The predecessor of an improved pair is taken from the `k → j` leg.
    /// Running it again on the same snapshot changes nothing.
    pub fn generate_shortest_paths(&mut self) {
        let n = self.n;
        let mut relaxed: u64 = 0;

        for k in 0..n {
            for i in 0..n {
                let d_ik = self.dist[i * n + k];
                if d_ik == INF {
                    continue;
                }
                for j in 0..n {
                    let d_kj = self.dist[k * n + j];
                    if d_kj == INF {
                        continue;
                    }
                    let through = d_ik.saturating_add(d_kj);
                    if through < self.dist[i * n + j] {
                        self.dist[i * n + j] = through;
                        self.pred[i * n + j] = self.pred[k * n + j];
                        relaxed += 1;
                    }
                }
            }
        }

        self.generated = true;
        log::debug!("floyd-warshall over {} nodes: {} relaxations", n, relaxed);
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Whether [`generate_shortest_paths`](Self::generate_shortest_paths) has
    /// run. Before that, distances only reflect direct edges.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Graph generation the snapshot was taken at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once `graph` has been mutated after this snapshot was taken.
    pub fn is_stale(&self, graph: &AdjacencyGraph<T>) -> bool {
        graph.generation() != self.generation
    }

    /// Shortest distance, `INF` when unreachable.
    pub fn path_length(&self, i: usize, j: usize) -> Result<u32> {
        Ok(self.dist[self.cell(i, j)?])
    }

    pub fn is_node_accessible(&self, i: usize, j: usize) -> Result<bool> {
        Ok(self.path_length(i, j)? != INF)
    }

    /// Node immediately before `j` on the shortest path from `i`. `None` when
    /// `i == j` or `j` is unreachable.
    pub fn predecessor(&self, i: usize, j: usize) -> Result<Option<usize>> {
        Ok(self.pred[self.cell(i, j)?])
    }

    /// Rows of the distance matrix, in node order.
    pub fn distance_rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks(0) panics; an empty snapshot simply has no rows.
        self.dist.chunks(self.n.max(1))
    }

    /// Node indices from `i` to `j` inclusive, or `None` when unreachable.
    ///
    /// Walks the predecessor chain backwards from `j`. The walk is bounded by
    /// `n` steps since a shortest path never repeats a node.
    pub fn path(&self, i: usize, j: usize) -> Result<Option<Vec<usize>>> {
        self.cell(i, j)?;
        if i == j {
            return Ok(Some(vec![i]));
        }

        let mut path = vec![j];
        let mut current = j;
        while current != i {
            match self.pred[i * self.n + current] {
                Some(prev) if path.len() <= self.n => {
                    path.push(prev);
                    current = prev;
                }
                _ => return Ok(None),
            }
        }

        path.reverse();
        Ok(Some(path))
    }

    /// Node values along the shortest path from `i` to `j`.
    pub fn path_values(&self, i: usize, j: usize) -> Result<Option<Vec<&T>>> {
        Ok(self
            .path(i, j)?
            .map(|p| p.into_iter().map(|idx| &self.nodes[idx]).collect()))
    }

    /// Snapshot copy of the node values.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    fn cell(&self, i: usize, j: usize) -> Result<usize> {
        for index in [i, j] {
            if index >= self.n {
                return Err(GraphError::invalid_index(index, self.n));
            }
        }
        Ok(i * self.n + j)
    }
}

impl<T> FloydWarshall<T> {
    /// Rendering of the path from `i` to `j`: `a->b->c`, or a report that
    /// none exists. Index errors surface here, so formatting cannot fail on
    /// anything but the writer.
    pub fn display_path(&self, i: usize, j: usize) -> Result<PathDisplay<'_, T>> {
        Ok(PathDisplay {
            from: i,
            to: j,
            values: self.path_values(i, j)?,
        })
    }
}

impl<T: fmt::Display> FloydWarshall<T> {
    /// [`display_path`](Self::display_path) into a fresh `String`.
    pub fn path_string(&self, i: usize, j: usize) -> Result<String> {
        Ok(self.display_path(i, j)?.to_string())
    }
}

/// A reconstructed path ready for formatting, see
/// [`FloydWarshall::display_path`].
#[derive(Debug)]
pub struct PathDisplay<'a, T> {
    from: usize,
    to: usize,
    values: Option<Vec<&'a T>>,
}

impl<T: fmt::Display> fmt::Display for PathDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(values) = &self.values else {
            return write!(
                f,
                "Path from node {} to node {} is impossible!",
                self.from, self.to
            );
        };
        for (step, value) in values.iter().enumerate() {
            if step > 0 {
                f.write_str("->")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
