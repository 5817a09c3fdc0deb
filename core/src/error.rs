use thiserror::Error;

/// Failures raised by [`AdjacencyGraph`](crate::AdjacencyGraph) and
/// [`FloydWarshall`](crate::FloydWarshall).
///
/// Every failing operation leaves the structure exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Zero, or too large to allocate.
    #[error("can not create graph: capacity must be positive and fit in memory")]
    InvalidCapacity,

    #[error("overflow: graph is full (capacity {capacity})")]
    Overflow { capacity: usize },

    /// Node or edge index outside `[0, count)`. Value lookups that find
    /// nothing report index `-1`.
    #[error("node {index} does not exist (node count {count})")]
    InvalidIndex { index: i64, count: usize },

    #[error("index {index} out of bounds (node count {count})")]
    IndexOutOfRange { index: i64, count: usize },
}

impl GraphError {
    pub(crate) fn invalid_index(index: usize, count: usize) -> Self {
        GraphError::InvalidIndex {
            index: index as i64,
            count,
        }
    }

    pub(crate) fn not_found(count: usize) -> Self {
        GraphError::InvalidIndex { index: -1, count }
    }
}

/// Failures raised while building or editing a [`Labyrinth`](crate::Labyrinth).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("labyrinth dimensions must be positive and fit in memory, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },

    #[error("position {point} is outside the {rows}x{cols} labyrinth")]
    OutOfBounds {
        point: crate::Point,
        rows: i32,
        cols: i32,
    },

    #[error("{what} {point} is not on the edge of the labyrinth")]
    NotOnBorder { what: &'static str, point: crate::Point },

    #[error("labyrinth text has no {0} marker")]
    MissingMarker(&'static str),

    #[error("labyrinth text has more than one {0} marker")]
    DuplicateMarker(&'static str),

    #[error("labyrinth text is ragged: row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown labyrinth cell '{0}'")]
    UnknownCell(char),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
