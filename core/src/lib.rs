//! maze-paths-core: dense adjacency-matrix graphs and all-pairs shortest paths.
//!
//! A pure Rust library with no I/O. [`AdjacencyGraph`] stores an undirected
//! graph as a fixed-capacity node array plus a symmetric boolean matrix and
//! supports node insertion/deletion and edge toggling. [`FloydWarshall`]
//! snapshots a graph and answers distance, reachability and path queries.
//! [`Labyrinth`] turns a grid maze into a graph of its open cells.
//!
//! Node identity is the current index: deleting a node renumbers every node
//! above it. Shortest paths are never updated incrementally; build a new
//! [`FloydWarshall`] after mutating the graph.

mod error;
mod graph;
mod maze;
mod paths;

pub use error::{GraphError, MazeError, Result};
pub use graph::AdjacencyGraph;
pub use maze::{Cell, Labyrinth, Point};
pub use paths::{FloydWarshall, PathDisplay, INF};
