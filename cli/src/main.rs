//! maze-paths: interactive shell over adjacency-matrix graphs, labyrinths
//! and Floyd-Warshall shortest paths.
//!
//! Usage: maze-paths [--script <file>]
//!
//! Commands are read one per line from the script or from stdin. Blank lines
//! and lines starting with `#` are skipped.

mod config;
mod dispatch;
mod error;
mod generation;
mod graph;
mod logger;
mod maze;
mod path;
mod render;
mod state;
mod status;
mod util;

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::process::ExitCode;

use config::Settings;
use dispatch::{dispatch, emit, Reply};
use state::Session;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let mut script: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--script" | "-s" => {
                i += 1;
                match args.get(i) {
                    Some(path) => script = Some(path.clone()),
                    None => {
                        eprintln!("maze-paths: --script needs a file");
                        return ExitCode::FAILURE;
                    }
                }
            }
            "--help" | "-h" => {
                println!("Usage: maze-paths [--script <file>]\n");
                println!("{}", dispatch::HELP);
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("maze-paths: unknown argument '{}', try --help", other);
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    let settings = Settings::from_env();
    logger::init(settings.log_level);

    let interactive = script.is_none() && io::stdin().is_terminal();
    let input: Box<dyn BufRead> = match &script {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("maze-paths: cannot open {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    match run(Session::new(settings), input, interactive) {
        Ok(failures) if failures > 0 && !interactive => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("maze-paths: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Read-eval loop. Returns the number of commands that failed.
fn run(mut session: Session, input: Box<dyn BufRead>, interactive: bool) -> io::Result<usize> {
    let stdout = io::stdout();
    let mut failures = 0;
    let mut lines = input.lines();

    loop {
        if interactive {
            let mut out = stdout.lock();
            write!(out, "maze-paths> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        log::debug!("command: {}", line);
        let reply = match dispatch(&mut session, line) {
            Ok(reply) => reply,
            Err(e) => {
                eprintln!("maze-paths: {}", e);
                failures += 1;
                continue;
            }
        };

        if let Err(e) = emit(&session.settings, &reply, &mut stdout.lock()) {
            eprintln!("maze-paths: {}", e);
            failures += 1;
        }
        if reply == Reply::Quit {
            break;
        }
    }

    Ok(failures)
}
