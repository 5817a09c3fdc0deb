use maze_paths_core::{GraphError, MazeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {what} '{raw}'")]
    Parse { what: &'static str, raw: String },

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),

    #[error("graph doesn't exist, create one with 'graph new'")]
    NoGraph,

    #[error("labyrinth is not created yet, use 'maze new' or 'maze load'")]
    NoMaze,

    #[error("nothing loaded, create a graph or a labyrinth first")]
    NothingLoaded,

    #[error("a {0} already exists, drop it first")]
    AlreadyLoaded(&'static str),

    #[error("shortest paths not generated yet, run 'paths generate'")]
    PathsNotGenerated,

    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error(
        "labyrinth {rows}x{cols} is too large for standard output (max {max_rows}x{max_cols}), \
         set output to a file"
    )]
    TooLarge {
        rows: i32,
        cols: i32,
        max_rows: i64,
        max_cols: i64,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
