use maze_paths_core::{GraphError, Point};

use crate::error::{CliError, Result};

/// Positional argument `index`, or a usage error.
pub fn arg<'a>(args: &[&'a str], index: usize, usage: &'static str) -> Result<&'a str> {
    args.get(index).copied().ok_or(CliError::Usage(usage))
}

pub fn parse_i64(raw: &str, what: &'static str) -> Result<i64> {
    raw.parse().map_err(|_| CliError::Parse {
        what,
        raw: raw.to_string(),
    })
}

/// Parse a node index. Negative values are rejected as `InvalidIndex`; the
/// upper bound is left to the graph.
pub fn parse_index(raw: &str, count: usize) -> Result<usize> {
    let value = parse_i64(raw, "node index")?;
    usize::try_from(value).map_err(|_| GraphError::InvalidIndex { index: value, count }.into())
}

/// Parse a graph capacity; zero and negative values are `InvalidCapacity`.
pub fn parse_capacity(raw: &str) -> Result<usize> {
    let value = parse_i64(raw, "capacity")?;
    match usize::try_from(value) {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(GraphError::InvalidCapacity.into()),
    }
}

pub fn parse_coord(raw: &str) -> Result<i32> {
    raw.parse().map_err(|_| CliError::Parse {
        what: "coordinate",
        raw: raw.to_string(),
    })
}

pub fn parse_point(row: &str, col: &str) -> Result<Point> {
    Ok(Point::new(parse_coord(row)?, parse_coord(col)?))
}
