//! Text rendering of graphs, distance matrices and labyrinth solutions.
//!
//! Built on the public query API only: node count, checked node access,
//! `are_connected`, distance rows and path reconstruction.

use std::fmt::{Display, Write};

use maze_paths_core::{AdjacencyGraph, FloydWarshall, Point, INF};
use serde::Serialize;

use crate::error::Result;

/// Node listing followed by the adjacency matrix.
pub fn graph_report<T: Display>(graph: &AdjacencyGraph<T>) -> Result<String> {
    let n = graph.node_count();
    let mut out = String::from("Node values are:\n");
    for i in 0..n {
        write!(out, "Node {}: {} ", i, graph.node(i)?).ok();
    }
    out.push_str("\nAdjacency matrix:\n");
    for i in 0..n {
        for j in 0..n {
            out.push_str(if graph.are_connected(i, j)? { "1 " } else { "0 " });
        }
        out.push('\n');
    }
    Ok(out)
}

pub fn format_distance(d: u32) -> String {
    if d == INF {
        "INF".to_string()
    } else {
        format!("{:>3}", d)
    }
}

/// Distance matrix, `INF` for unreachable pairs.
pub fn distance_report<T>(paths: &FloydWarshall<T>) -> String {
    let mut out = String::from("Adjacency matrix with shortest distances is:\n");
    for row in paths.distance_rows().take(paths.node_count()) {
        for &d in row {
            out.push_str(&format_distance(d));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Outcome of a labyrinth entrance-to-exit query.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub entrance: Point,
    pub exit: Point,
    pub accessible: bool,
    pub length: Option<u32>,
    pub path: Option<Vec<Point>>,
}

impl SolveReport {
    pub fn build(paths: &FloydWarshall<Point>, entrance: Point, exit: Point) -> Result<Self> {
        let nodes = paths.nodes();
        let locate = |p: Point| {
            nodes
                .iter()
                .position(|&n| n == p)
                .ok_or(maze_paths_core::GraphError::InvalidIndex {
                    index: -1,
                    count: nodes.len(),
                })
        };
        let (from, to) = (locate(entrance)?, locate(exit)?);

        let accessible = paths.is_node_accessible(from, to)?;
        let (length, path) = if accessible {
            let path = paths
                .path_values(from, to)?
                .map(|values| values.into_iter().copied().collect());
            (Some(paths.path_length(from, to)?), path)
        } else {
            (None, None)
        };

        Ok(Self {
            entrance,
            exit,
            accessible,
            length,
            path,
        })
    }

    pub fn to_text(&self) -> String {
        if !self.accessible {
            return "The Exit is not accessible from the Entrance!\n".to_string();
        }
        let mut out = String::from("Exit is accessible from the Entrance!\n");
        if let Some(length) = self.length {
            writeln!(out, "The Shortest Path from the Entrance to the Exit is: {}", length).ok();
        }
        if let Some(path) = &self.path {
            out.push_str("Path from the Entrance to the Exit is:\n");
            let steps: Vec<String> = path.iter().map(Point::to_string).collect();
            out.push_str(&steps.join("->"));
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_paths_core::Labyrinth;

    fn make_graph() -> AdjacencyGraph<i64> {
        let mut g = AdjacencyGraph::new(3).unwrap();
        for v in [5, 6, 7] {
            g.insert_node(v).unwrap();
        }
        g.add_edge(0, 1).unwrap();
        g
    }

    #[test]
    fn test_graph_report() {
        let report = graph_report(&make_graph()).unwrap();
        assert_eq!(
            report,
            "Node values are:\nNode 0: 5 Node 1: 6 Node 2: 7 \n\
             Adjacency matrix:\n0 1 0 \n1 0 0 \n0 0 0 \n"
        );
    }

    #[test]
    fn test_distance_report() {
        let fw = FloydWarshall::solve(&make_graph());
        let report = distance_report(&fw);
        assert_eq!(
            report,
            "Adjacency matrix with shortest distances is:\n\
             \x20 0   1 INF \n  1   0 INF \nINF INF   0 \n"
        );
    }

    #[test]
    fn test_distance_report_empty() {
        let g = AdjacencyGraph::<i64>::new(1).unwrap();
        let fw = FloydWarshall::solve(&g);
        assert_eq!(distance_report(&fw), "Adjacency matrix with shortest distances is:\n");
    }

    #[test]
    fn test_solve_report() {
        let maze: Labyrinth = "o *\n  *\n* x\n".parse().unwrap();
        let graph = maze.generate_graph().unwrap();
        let fw = FloydWarshall::solve(&graph);
        let report = SolveReport::build(&fw, maze.entrance(), maze.exit()).unwrap();

        assert!(report.accessible);
        assert_eq!(report.length, Some(4));
        assert_eq!(
            report.to_text(),
            "Exit is accessible from the Entrance!\n\
             The Shortest Path from the Entrance to the Exit is: 4\n\
             Path from the Entrance to the Exit is:\n\
             (0, 0)->(0, 1)->(1, 1)->(2, 1)->(2, 2)\n"
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["length"], 4);
        assert_eq!(json["path"][0]["row"], 0);
        assert_eq!(json["path"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_solve_report_blocked() {
        let maze: Labyrinth = "o**\n***\n**x\n".parse().unwrap();
        let graph = maze.generate_graph().unwrap();
        let fw = FloydWarshall::solve(&graph);
        let report = SolveReport::build(&fw, maze.entrance(), maze.exit()).unwrap();
        assert!(!report.accessible);
        assert_eq!(report.length, None);
        assert_eq!(report.to_text(), "The Exit is not accessible from the Entrance!\n");
    }
}
