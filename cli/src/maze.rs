use std::fs;

use maze_paths_core::{Labyrinth, Point};

use crate::config::Output;
use crate::dispatch::Reply;
use crate::error::{CliError, Result};
use crate::render;
use crate::state::{Loaded, MazeState, Session};
use crate::util::{arg, parse_coord, parse_point};

const USAGE: &str = "maze <new|open|load|show|graph|drop> ...";

pub fn run(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let rest = args.get(1..).unwrap_or(&[]);
    match arg(args, 0, USAGE)? {
        "new" => create(session, rest),
        "open" => open(session, rest),
        "load" => load(session, rest),
        "show" => show(session),
        "graph" => {
            let work = session.maze_mut()?.workspace()?;
            Ok(Reply::Report(render::graph_report(&work.graph)?))
        }
        "drop" => {
            session.maze_mut()?;
            session.loaded = None;
            Ok(Reply::Message("Labyrinth deleted successfully!".to_string()))
        }
        _ => Err(CliError::Usage(USAGE)),
    }
}

fn create(session: &mut Session, args: &[&str]) -> Result<Reply> {
    const USAGE: &str =
        "maze new <rows> <cols> <entrance row> <entrance col> <exit row> <exit col>";
    session.ensure_empty()?;
    if args.len() != 6 {
        return Err(CliError::Usage(USAGE));
    }
    let rows = parse_coord(args[0])?;
    let cols = parse_coord(args[1])?;
    let entrance = parse_point(args[2], args[3])?;
    let exit = parse_point(args[4], args[5])?;

    let maze = Labyrinth::new(rows, cols, entrance, exit)?;
    session.loaded = Some(Loaded::Maze(MazeState::new(maze)));
    Ok(Reply::Message(format!(
        "Labyrinth {}x{} created, entrance {} exit {}",
        rows, cols, entrance, exit
    )))
}

/// Open one or more cells given as `row col` pairs.
fn open(session: &mut Session, args: &[&str]) -> Result<Reply> {
    const USAGE: &str = "maze open <row> <col> [<row> <col> ...]";
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(CliError::Usage(USAGE));
    }
    let state = session.maze_mut()?;

    // Validate every pair first so a bad one leaves the labyrinth untouched.
    let points = args
        .chunks(2)
        .map(|pair| -> Result<Point> {
            let point = parse_point(pair[0], pair[1])?;
            state.maze.check_bounds(point)?;
            Ok(point)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut opened = 0;
    for point in points {
        if state.add_path(point)? {
            opened += 1;
        }
    }
    Ok(Reply::Message(format!(
        "{} cell(s) opened, {} open in total",
        opened,
        state.maze.open_cells()
    )))
}

fn load(session: &mut Session, args: &[&str]) -> Result<Reply> {
    session.ensure_empty()?;
    let path = arg(args, 0, "maze load <file>")?;
    let text = fs::read_to_string(path)?;
    let maze: Labyrinth = text.parse()?;
    log::info!("loaded labyrinth {}x{} from {}", maze.rows(), maze.cols(), path);

    let message = format!(
        "Labyrinth {}x{} loaded, {} open cells",
        maze.rows(),
        maze.cols(),
        maze.open_cells()
    );
    session.loaded = Some(Loaded::Maze(MazeState::new(maze)));
    Ok(Reply::Message(message))
}

fn show(session: &mut Session) -> Result<Reply> {
    let (max_rows, max_cols) = (session.settings.max_rows, session.settings.max_cols);
    let to_stdout = session.settings.output == Output::Stdout;
    let maze = &session.maze_mut()?.maze;

    if to_stdout && (i64::from(maze.rows()) > max_rows || i64::from(maze.cols()) > max_cols) {
        return Err(CliError::TooLarge {
            rows: maze.rows(),
            cols: maze.cols(),
            max_rows,
            max_cols,
        });
    }

    Ok(Reply::Report(format!(
        "{}\nLabyrinth dimensions are: {}x{}\n",
        maze,
        maze.rows(),
        maze.cols()
    )))
}
