use maze_paths_core::AdjacencyGraph;

use crate::dispatch::Reply;
use crate::error::{CliError, Result};
use crate::render;
use crate::state::{Loaded, Session, Workspace};
use crate::util::{arg, parse_capacity, parse_i64, parse_index};

const USAGE: &str =
    "graph <new|insert|set|delete|connect|disconnect|link|unlink|find|show|drop> ...";

pub fn run(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let rest = args.get(1..).unwrap_or(&[]);
    match arg(args, 0, USAGE)? {
        "new" => create(session, rest),
        "insert" => insert(session, rest),
        "set" => set(session, rest),
        "delete" => delete(session, rest),
        "connect" => toggle_edge(session, rest, true),
        "disconnect" => toggle_edge(session, rest, false),
        "link" => toggle_edge_by_value(session, rest, true),
        "unlink" => toggle_edge_by_value(session, rest, false),
        "find" => find(session, rest),
        "show" => {
            let work = session.graph_mut()?;
            Ok(Reply::Report(render::graph_report(&work.graph)?))
        }
        "drop" => {
            session.graph_mut()?;
            session.loaded = None;
            Ok(Reply::Message("Graph deleted".to_string()))
        }
        _ => Err(CliError::Usage(USAGE)),
    }
}

fn create(session: &mut Session, args: &[&str]) -> Result<Reply> {
    const USAGE: &str = "graph new <capacity> [presized]";
    session.ensure_empty()?;
    let capacity = parse_capacity(arg(args, 0, USAGE)?)?;
    let graph = match args.get(1).copied() {
        None => AdjacencyGraph::new(capacity)?,
        Some("presized") => AdjacencyGraph::presized(capacity)?,
        Some(_) => return Err(CliError::Usage(USAGE)),
    };
    let count = graph.node_count();
    session.loaded = Some(Loaded::Graph(Workspace::new(graph)));
    Ok(Reply::Message(format!(
        "Graph created: capacity {}, {} nodes",
        capacity, count
    )))
}

fn insert(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let value = parse_i64(arg(args, 0, "graph insert <value>")?, "node value")?;
    let work = session.graph_mut()?;
    let index = work.graph.insert_node(value)?;
    Ok(Reply::Message(format!("Node {} inserted at index {}", value, index)))
}

fn set(session: &mut Session, args: &[&str]) -> Result<Reply> {
    const USAGE: &str = "graph set <index> <value>";
    let work = session.graph_mut()?;
    let index = parse_index(arg(args, 0, USAGE)?, work.graph.node_count())?;
    let value = parse_i64(arg(args, 1, USAGE)?, "node value")?;
    work.graph.set_node(index, value)?;
    Ok(Reply::Message(format!("Node {} set to {}", index, value)))
}

fn delete(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let work = session.graph_mut()?;
    let index = parse_index(arg(args, 0, "graph delete <index>")?, work.graph.node_count())?;
    work.graph.delete_node(index)?;
    Ok(Reply::Message(format!(
        "Node {} removed, nodes above it moved down one index",
        index
    )))
}

fn toggle_edge(session: &mut Session, args: &[&str], connect: bool) -> Result<Reply> {
    const USAGE: &str = "graph connect|disconnect <i> <j>";
    let work = session.graph_mut()?;
    let count = work.graph.node_count();
    let i = parse_index(arg(args, 0, USAGE)?, count)?;
    let j = parse_index(arg(args, 1, USAGE)?, count)?;
    if connect {
        work.graph.add_edge(i, j)?;
        Ok(Reply::Message(format!("Nodes {} and {} connected", i, j)))
    } else {
        work.graph.remove_edge(i, j)?;
        Ok(Reply::Message(format!("Nodes {} and {} disconnected", i, j)))
    }
}

fn toggle_edge_by_value(session: &mut Session, args: &[&str], connect: bool) -> Result<Reply> {
    const USAGE: &str = "graph link|unlink <value> <value>";
    let a = parse_i64(arg(args, 0, USAGE)?, "node value")?;
    let b = parse_i64(arg(args, 1, USAGE)?, "node value")?;
    let work = session.graph_mut()?;
    if connect {
        work.graph.add_edge_between(&a, &b)?;
        Ok(Reply::Message(format!("Nodes valued {} and {} connected", a, b)))
    } else {
        work.graph.remove_edge_between(&a, &b)?;
        Ok(Reply::Message(format!("Nodes valued {} and {} disconnected", a, b)))
    }
}

fn find(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let value = parse_i64(arg(args, 0, "graph find <value>")?, "node value")?;
    let work = session.graph_mut()?;
    let message = match work.graph.node_index(&value) {
        Some(index) => format!("Node {} is at index {}", value, index),
        None => format!("No node with value {}", value),
    };
    Ok(Reply::Message(message))
}
