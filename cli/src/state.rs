use maze_paths_core::{AdjacencyGraph, FloydWarshall, Labyrinth, Point};

use crate::config::Settings;
use crate::error::{CliError, Result};

/// A graph plus the shortest paths last generated from it.
pub struct Workspace<T> {
    pub graph: AdjacencyGraph<T>,
    pub paths: Option<FloydWarshall<T>>,
}

impl<T: Clone> Workspace<T> {
    pub fn new(graph: AdjacencyGraph<T>) -> Self {
        Self { graph, paths: None }
    }

    /// Replace any previous result with a fresh run over the current graph.
    pub fn generate(&mut self) -> &FloydWarshall<T> {
        self.paths.insert(FloydWarshall::solve(&self.graph))
    }
}

/// A labyrinth and the graph built from it. The graph is rebuilt lazily
/// after the labyrinth changes.
pub struct MazeState {
    pub maze: Labyrinth,
    work: Option<Workspace<Point>>,
}

impl MazeState {
    pub fn new(maze: Labyrinth) -> Self {
        Self { maze, work: None }
    }

    /// Carve a path; the graph and any shortest paths are discarded when the
    /// labyrinth actually changed.
    pub fn add_path(&mut self, point: Point) -> Result<bool> {
        let opened = self.maze.add_path(point)?;
        if opened && self.work.take().is_some() {
            log::debug!("labyrinth changed, graph discarded");
        }
        Ok(opened)
    }

    pub fn workspace(&mut self) -> Result<&mut Workspace<Point>> {
        let work = match self.work.take() {
            Some(work) => work,
            None => {
                let graph = self.maze.generate_graph()?;
                log::info!(
                    "built labyrinth graph: {} nodes, {} edges",
                    graph.node_count(),
                    graph.edge_count()
                );
                Workspace::new(graph)
            }
        };
        Ok(self.work.insert(work))
    }

    pub fn existing_workspace(&self) -> Option<&Workspace<Point>> {
        self.work.as_ref()
    }
}

pub enum Loaded {
    Graph(Workspace<i64>),
    Maze(MazeState),
}

impl Loaded {
    pub fn kind(&self) -> &'static str {
        match self {
            Loaded::Graph(_) => "graph",
            Loaded::Maze(_) => "labyrinth",
        }
    }
}

/// Mutable borrow of whichever workspace path queries should run against.
pub enum Target<'a> {
    Graph(&'a mut Workspace<i64>),
    Maze(&'a mut Workspace<Point>),
}

#[derive(Default)]
pub struct Session {
    pub loaded: Option<Loaded>,
    pub settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            loaded: None,
            settings,
        }
    }

    /// Fails if anything is loaded, since only one graph or labyrinth is
    /// live at a time.
    pub fn ensure_empty(&self) -> Result<()> {
        match &self.loaded {
            Some(loaded) => Err(CliError::AlreadyLoaded(loaded.kind())),
            None => Ok(()),
        }
    }

    pub fn graph_mut(&mut self) -> Result<&mut Workspace<i64>> {
        match self.loaded.as_mut() {
            Some(Loaded::Graph(work)) => Ok(work),
            _ => Err(CliError::NoGraph),
        }
    }

    pub fn maze_mut(&mut self) -> Result<&mut MazeState> {
        match self.loaded.as_mut() {
            Some(Loaded::Maze(state)) => Ok(state),
            _ => Err(CliError::NoMaze),
        }
    }

    /// The active workspace together with the settings, borrowed separately.
    pub fn target(&mut self) -> Result<(Target<'_>, &Settings)> {
        let settings = &self.settings;
        let target = match self.loaded.as_mut() {
            Some(Loaded::Graph(work)) => Target::Graph(work),
            Some(Loaded::Maze(state)) => Target::Maze(state.workspace()?),
            None => return Err(CliError::NothingLoaded),
        };
        Ok((target, settings))
    }
}
