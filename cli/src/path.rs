use std::fmt::Display;

use crate::config::{Format, Settings};
use crate::dispatch::Reply;
use crate::error::{CliError, Result};
use crate::generation::ensure_fresh;
use crate::render::{self, SolveReport};
use crate::state::{Loaded, Session, Target, Workspace};
use crate::util::{arg, parse_index};

const USAGE: &str = "paths <generate|matrix|length|accessible|show> ...";

pub fn run(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let rest = args.get(1..).unwrap_or(&[]);
    let command = arg(args, 0, USAGE)?;
    let (target, settings) = session.target()?;

    match (command, target) {
        ("generate", Target::Graph(work)) => Ok(generate(work)),
        ("generate", Target::Maze(work)) => Ok(generate(work)),
        ("matrix", Target::Graph(work)) => matrix(work, settings),
        ("matrix", Target::Maze(work)) => matrix(work, settings),
        ("length", Target::Graph(work)) => length(work, settings, rest),
        ("length", Target::Maze(work)) => length(work, settings, rest),
        ("accessible", Target::Graph(work)) => accessible(work, settings, rest),
        ("accessible", Target::Maze(work)) => accessible(work, settings, rest),
        ("show", Target::Graph(work)) => show(work, settings, rest),
        ("show", Target::Maze(work)) => show(work, settings, rest),
        _ => Err(CliError::Usage(USAGE)),
    }
}

/// Entrance-to-exit query on the loaded labyrinth.
pub fn solve(session: &mut Session) -> Result<Reply> {
    let settings = &session.settings;
    let state = match session.loaded.as_mut() {
        Some(Loaded::Maze(state)) => state,
        _ => return Err(CliError::NoMaze),
    };
    let (entrance, exit) = (state.maze.entrance(), state.maze.exit());
    let paths = ensure_fresh(state.workspace()?, settings)?;

    let report = SolveReport::build(paths, entrance, exit)?;
    let text = match settings.format {
        Format::Text => report.to_text(),
        Format::Json => report.to_json()? + "\n",
    };
    Ok(Reply::Report(text))
}

fn generate<T: Clone>(work: &mut Workspace<T>) -> Reply {
    let n = work.generate().node_count();
    Reply::Message(format!(
        "Shortest Paths generated successfully! ({} nodes)",
        n
    ))
}

fn matrix<T: Clone>(work: &mut Workspace<T>, settings: &Settings) -> Result<Reply> {
    let paths = ensure_fresh(work, settings)?;
    Ok(Reply::Report(render::distance_report(paths)))
}

fn pair<T>(work: &Workspace<T>, args: &[&str], usage: &'static str) -> Result<(usize, usize)> {
    let count = work.graph.node_count();
    Ok((
        parse_index(arg(args, 0, usage)?, count)?,
        parse_index(arg(args, 1, usage)?, count)?,
    ))
}

fn length<T: Clone>(work: &mut Workspace<T>, settings: &Settings, args: &[&str]) -> Result<Reply> {
    let (i, j) = pair(work, args, "paths length <i> <j>")?;
    let paths = ensure_fresh(work, settings)?;
    let d = paths.path_length(i, j)?;
    Ok(Reply::Message(format!(
        "Shortest path from node {} to node {}: {}",
        i,
        j,
        render::format_distance(d).trim_start()
    )))
}

fn accessible<T: Clone>(
    work: &mut Workspace<T>,
    settings: &Settings,
    args: &[&str],
) -> Result<Reply> {
    let (i, j) = pair(work, args, "paths accessible <i> <j>")?;
    let paths = ensure_fresh(work, settings)?;
    let message = if paths.is_node_accessible(i, j)? {
        format!("Node {} is accessible from node {}", j, i)
    } else {
        format!("Node {} is not accessible from node {}", j, i)
    };
    Ok(Reply::Message(message))
}

fn show<T: Clone + Display>(
    work: &mut Workspace<T>,
    settings: &Settings,
    args: &[&str],
) -> Result<Reply> {
    let (i, j) = pair(work, args, "paths show <i> <j>")?;
    let paths = ensure_fresh(work, settings)?;
    Ok(Reply::Report(paths.path_string(i, j)? + "\n"))
}
