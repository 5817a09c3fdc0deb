//! Staleness checks for generated shortest paths.
//!
//! Every graph mutation bumps the graph's generation counter, and each
//! [`FloydWarshall`] run remembers the generation it was computed from. Path
//! queries compare the two before answering.
//!
//! Behavior:
//! - Never generated → error, the user must run `paths generate`
//! - Fresh → served as is
//! - Stale + auto_regenerate=true → regenerated inline
//! - Stale + auto_regenerate=false → served stale with a warning; answers
//!   describe the topology at generation time and indices may no longer
//!   match the current graph

use maze_paths_core::FloydWarshall;

use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::state::Workspace;

pub fn ensure_fresh<'w, T: Clone>(
    work: &'w mut Workspace<T>,
    settings: &Settings,
) -> Result<&'w FloydWarshall<T>> {
    let graph = &work.graph;
    let paths = work.paths.as_mut().ok_or(CliError::PathsNotGenerated)?;

    if paths.is_stale(graph) {
        if settings.auto_regenerate {
            log::info!(
                "regenerating stale shortest paths (gen {} -> {})",
                paths.generation(),
                graph.generation()
            );
            *paths = FloydWarshall::solve(graph);
        } else {
            log::warn!(
                "shortest paths are stale (gen {} vs {}), auto_regenerate is off",
                paths.generation(),
                graph.generation()
            );
        }
    }

    Ok(paths)
}
