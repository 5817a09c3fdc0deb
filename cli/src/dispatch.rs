use std::fs::OpenOptions;
use std::io::Write;

use crate::config::{Output, Settings};
use crate::error::{CliError, Result};
use crate::state::Session;
use crate::{graph, maze, path, status};

pub const HELP: &str = "\
Commands:
  graph new <capacity> [presized]   Create an integer-valued graph
  graph insert <value>              Append a node
  graph set <index> <value>         Assign a node value (presized graphs)
  graph delete <index>              Remove a node; later nodes shift down
  graph connect <i> <j>             Add an edge by index
  graph disconnect <i> <j>          Remove an edge by index
  graph link <a> <b>                Add an edge between node values
  graph unlink <a> <b>              Remove an edge between node values
  graph find <value>                Index of the first node with a value
  graph show                        Print nodes and adjacency matrix
  graph drop                        Delete the graph

  maze new <rows> <cols> <er> <ec> <xr> <xc>
                                    Create an all-wall labyrinth with an
                                    entrance and exit on its border
  maze open <row> <col> ...         Open wall cells
  maze load <file>                  Read a labyrinth (* wall, . open, o, x)
  maze show                         Print the labyrinth
  maze graph                        Print the graph of open cells
  maze drop                         Delete the labyrinth

  paths generate                    Run Floyd-Warshall on the current graph
  paths matrix                      Print the shortest distance matrix
  paths length <i> <j>              Shortest distance between two nodes
  paths accessible <i> <j>          Whether j is reachable from i
  paths show <i> <j>                Print the shortest path
  solve                             Find the way out of the labyrinth

  set <name> <value>                Change a setting
  show [<name>|all]                 Show settings
  status                            What is loaded
  help                              This text
  quit                              Leave";

/// Result of one command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Short confirmation, always printed to the console.
    Message(String),
    /// Rendered data, written to the configured output.
    Report(String),
    Quit,
}

/// Run one command line against the session.
pub fn dispatch(session: &mut Session, line: &str) -> Result<Reply> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(Reply::Message(String::new()));
    };

    match command {
        "graph" => graph::run(session, args),
        "maze" => maze::run(session, args),
        "paths" => path::run(session, args),
        "solve" => path::solve(session),
        "set" => {
            let name = args.first().ok_or(CliError::Usage("set <name> <value>"))?;
            // Allow spaces in file paths.
            let value = args.get(1..).unwrap_or(&[]).join(" ");
            session.settings.set(name, &value)?;
            if *name == "log_level" {
                log::set_max_level(session.settings.log_level);
            }
            Ok(Reply::Message(format!(
                "{} = {}",
                name,
                session.settings.show(name)?
            )))
        }
        "show" => match args.first().copied() {
            None | Some("all") => Ok(Reply::Message(session.settings.show_all())),
            Some(name) => Ok(Reply::Message(format!(
                "{} = {}",
                name,
                session.settings.show(name)?
            ))),
        },
        "status" => Ok(status::run(session)),
        "help" => Ok(Reply::Message(HELP.to_string())),
        "quit" | "exit" => Ok(Reply::Quit),
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

/// Write a reply: messages to the console, reports to the configured output.
pub fn emit<W: Write>(settings: &Settings, reply: &Reply, console: &mut W) -> Result<()> {
    match reply {
        Reply::Message(text) if text.is_empty() => {}
        Reply::Message(text) => writeln!(console, "{}", text)?,
        Reply::Report(text) => match &settings.output {
            Output::Stdout => write!(console, "{}", text)?,
            Output::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}", text)?;
                writeln!(console, "Output successful!")?;
            }
        },
        Reply::Quit => writeln!(console, "Bye!")?,
    }
    Ok(())
}
