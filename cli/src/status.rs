use maze_paths_core::{AdjacencyGraph, FloydWarshall};

use crate::dispatch::Reply;
use crate::state::{Loaded, Session};

/// Summary of what is loaded and whether its shortest paths are current.
pub fn run(session: &Session) -> Reply {
    let mut lines = Vec::new();

    match &session.loaded {
        None => lines.push("status: not_loaded".to_string()),
        Some(Loaded::Graph(work)) => {
            lines.push("status: graph".to_string());
            describe(&mut lines, &work.graph, work.paths.as_ref());
        }
        Some(Loaded::Maze(state)) => {
            lines.push("status: labyrinth".to_string());
            lines.push(format!(
                "labyrinth: {}x{}, {} open cells, entrance {} exit {}",
                state.maze.rows(),
                state.maze.cols(),
                state.maze.open_cells(),
                state.maze.entrance(),
                state.maze.exit()
            ));
            match state.existing_workspace() {
                Some(work) => describe(&mut lines, &work.graph, work.paths.as_ref()),
                None => lines.push("graph: not built".to_string()),
            }
        }
    }

    Reply::Message(lines.join("\n"))
}

fn describe<T>(
    lines: &mut Vec<String>,
    graph: &AdjacencyGraph<T>,
    paths: Option<&FloydWarshall<T>>,
) {
    lines.push(format!(
        "graph: {}/{} nodes, {} edges, ~{} bytes, generation {}",
        graph.node_count(),
        graph.capacity(),
        graph.edge_count(),
        graph.memory_usage(),
        graph.generation()
    ));
    lines.push(match paths {
        None => "paths: not generated".to_string(),
        Some(p) if p.is_stale(graph) => format!(
            "paths: stale (generation {} vs {})",
            p.generation(),
            graph.generation()
        ),
        Some(p) => format!("paths: current ({} nodes)", p.node_count()),
    });
}
