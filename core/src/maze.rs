//! Grid labyrinths and their conversion into an [`AdjacencyGraph`].
//!
//! Every non-wall cell becomes a node; 4-adjacent open cells are connected.

use std::fmt;
use std::str::FromStr;

use crate::error::{GraphError, MazeError};
use crate::graph::AdjacencyGraph;

/// A grid position. The default, `(-1, -1)`, marks an unassigned node slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The four orthogonal neighbours: down, up, right, left.
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.row + 1, self.col),
            Point::new(self.row - 1, self.col),
            Point::new(self.row, self.col + 1),
            Point::new(self.row, self.col - 1),
        ]
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(-1, -1)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
    Entrance,
    Exit,
}

impl Cell {
    pub fn is_open(self) -> bool {
        self != Cell::Wall
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => '*',
            Cell::Open => ' ',
            Cell::Entrance => 'o',
            Cell::Exit => 'x',
        }
    }
}

/// Rectangular maze of walls and open cells with an entrance and an exit on
/// its border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labyrinth {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    entrance: Point,
    exit: Point,
}

impl Labyrinth {
    /// All-wall labyrinth with the entrance and exit opened.
    pub fn new(rows: i32, cols: i32, entrance: Point, exit: Point) -> Result<Self, MazeError> {
        if rows <= 0 || cols <= 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }

        let invalid = MazeError::InvalidDimensions { rows, cols };
        let size = (rows as usize)
            .checked_mul(cols as usize)
            .ok_or_else(|| invalid.clone())?;
        let mut cells = Vec::new();
        if cells.try_reserve_exact(size).is_err() {
            log::warn!("cannot allocate a {}x{} labyrinth", rows, cols);
            return Err(invalid);
        }
        cells.resize(size, Cell::Wall);

        let mut maze = Self {
            rows,
            cols,
            cells,
            entrance,
            exit,
        };

        for (what, point) in [("entrance", entrance), ("exit", exit)] {
            maze.check_bounds(point)?;
            if !maze.on_border(point) {
                return Err(MazeError::NotOnBorder { what, point });
            }
        }

        maze.set(entrance, Cell::Entrance);
        maze.set(exit, Cell::Exit);
        Ok(maze)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn entrance(&self) -> Point {
        self.entrance
    }

    pub fn exit(&self) -> Point {
        self.exit
    }

    /// Cell at `point`, `None` outside the grid.
    pub fn cell(&self, point: Point) -> Option<Cell> {
        self.index(point).map(|i| self.cells[i])
    }

    pub fn is_open(&self, point: Point) -> bool {
        self.cell(point).is_some_and(Cell::is_open)
    }

    /// Carve a wall into an open cell. Returns `false` when the cell was
    /// already open.
    pub fn add_path(&mut self, point: Point) -> Result<bool, MazeError> {
        self.check_bounds(point)?;
        if self.cell(point) != Some(Cell::Wall) {
            return Ok(false);
        }
        self.set(point, Cell::Open);
        Ok(true)
    }

    /// Number of non-wall cells, entrance and exit included.
    pub fn open_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Open cells in row-major order.
    pub fn open_points(&self) -> impl Iterator<Item = Point> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_open())
            .map(move |(i, _)| Point::new(i as i32 / cols, i as i32 % cols))
    }

    /// Build the graph of open cells.
    ///
    /// The graph is created pre-sized with one slot per open cell, filled in
    /// row-major order, then every pair of orthogonally adjacent open cells
    /// is connected through the value-based edge API.
    pub fn generate_graph(&self) -> Result<AdjacencyGraph<Point>, GraphError> {
        let mut graph = AdjacencyGraph::presized(self.open_cells())?;

        for (index, point) in self.open_points().enumerate() {
            graph.set_node(index, point)?;
        }

        for index in 0..graph.node_count() {
            let point = *graph.node(index)?;
            for next in point.neighbors() {
                if self.is_open(next) {
                    graph.add_edge_between(&point, &next)?;
                }
            }
        }

        log::debug!(
            "labyrinth {}x{}: {} nodes, {} edges",
            self.rows,
            self.cols,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn index(&self, point: Point) -> Option<usize> {
        if point.row < 0 || point.col < 0 || point.row >= self.rows || point.col >= self.cols {
            return None;
        }
        Some(point.row as usize * self.cols as usize + point.col as usize)
    }

    /// `OutOfBounds` unless `point` lies inside the grid.
    pub fn check_bounds(&self, point: Point) -> Result<(), MazeError> {
        match self.index(point) {
            Some(_) => Ok(()),
            None => Err(MazeError::OutOfBounds {
                point,
                rows: self.rows,
                cols: self.cols,
            }),
        }
    }

    fn on_border(&self, point: Point) -> bool {
        point.row == 0 || point.col == 0 || point.row == self.rows - 1 || point.col == self.cols - 1
    }

    fn set(&mut self, point: Point, cell: Cell) {
        if let Some(i) = self.index(point) {
            self.cells[i] = cell;
        }
    }
}

/// Cells separated by a space, one row per line.
impl fmt::Display for Labyrinth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            for cell in row {
                write!(f, "{} ", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the compact text form: one character per cell, `*` or `#` for a
/// wall, space or `.` for an open cell, `o` for the entrance and `x` for the
/// exit. Trailing blank lines are ignored.
impl FromStr for Labyrinth {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut grid = Vec::with_capacity(lines.len() * cols);
        let mut entrance = None;
        let mut exit = None;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(MazeError::RaggedRow {
                    row,
                    found,
                    expected: cols,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let point = Point::new(row as i32, col as i32);
                let cell = match ch {
                    '*' | '#' => Cell::Wall,
                    ' ' | '.' => Cell::Open,
                    'o' => {
                        if entrance.replace(point).is_some() {
                            return Err(MazeError::DuplicateMarker("entrance"));
                        }
                        Cell::Entrance
                    }
                    'x' => {
                        if exit.replace(point).is_some() {
                            return Err(MazeError::DuplicateMarker("exit"));
                        }
                        Cell::Exit
                    }
                    other => return Err(MazeError::UnknownCell(other)),
                };
                grid.push(cell);
            }
        }

        let entrance = entrance.ok_or(MazeError::MissingMarker("entrance"))?;
        let exit = exit.ok_or(MazeError::MissingMarker("exit"))?;

        let mut maze = Labyrinth::new(lines.len() as i32, cols as i32, entrance, exit)?;
        maze.cells = grid;
        Ok(maze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::FloydWarshall;

    const CORRIDOR: &str = "\
*o***
*   *
***x*
";

    fn index_of(graph: &AdjacencyGraph<Point>, row: i32, col: i32) -> usize {
        graph.node_index(&Point::new(row, col)).unwrap()
    }

    #[test]
    fn test_point_default_is_unassigned() {
        assert_eq!(Point::default(), Point::new(-1, -1));
        assert_eq!(Point::new(2, 3).to_string(), "(2, 3)");
    }

    #[test]
    fn test_new_requires_border_markers() {
        let inner = Labyrinth::new(3, 3, Point::new(1, 1), Point::new(0, 2));
        assert_eq!(
            inner.unwrap_err(),
            MazeError::NotOnBorder {
                what: "entrance",
                point: Point::new(1, 1)
            }
        );

        let outside = Labyrinth::new(3, 3, Point::new(0, 0), Point::new(3, 0));
        assert!(matches!(outside, Err(MazeError::OutOfBounds { .. })));

        let empty = Labyrinth::new(0, 4, Point::new(0, 0), Point::new(0, 1));
        assert_eq!(
            empty.unwrap_err(),
            MazeError::InvalidDimensions { rows: 0, cols: 4 }
        );
    }

    #[test]
    fn test_unallocatable_dimensions_rejected() {
        let huge = Labyrinth::new(
            2_000_000_000,
            2_000_000_000,
            Point::new(0, 0),
            Point::new(0, 1),
        );
        assert_eq!(
            huge.unwrap_err(),
            MazeError::InvalidDimensions {
                rows: 2_000_000_000,
                cols: 2_000_000_000
            }
        );
    }

    #[test]
    fn test_new_is_all_walls_except_markers() {
        let maze = Labyrinth::new(3, 4, Point::new(0, 1), Point::new(2, 3)).unwrap();
        assert_eq!(maze.open_cells(), 2);
        assert_eq!(maze.cell(Point::new(0, 1)), Some(Cell::Entrance));
        assert_eq!(maze.cell(Point::new(2, 3)), Some(Cell::Exit));
        assert_eq!(maze.cell(Point::new(1, 1)), Some(Cell::Wall));
        assert_eq!(maze.cell(Point::new(5, 1)), None);
    }

    #[test]
    fn test_add_path() {
        let mut maze = Labyrinth::new(3, 3, Point::new(0, 1), Point::new(2, 1)).unwrap();
        assert_eq!(maze.add_path(Point::new(1, 1)), Ok(true));
        assert_eq!(maze.add_path(Point::new(1, 1)), Ok(false));
        // Entrance stays an entrance
        assert_eq!(maze.add_path(Point::new(0, 1)), Ok(false));
        assert_eq!(maze.cell(Point::new(0, 1)), Some(Cell::Entrance));
        assert!(matches!(
            maze.add_path(Point::new(-1, 0)),
            Err(MazeError::OutOfBounds { .. })
        ));
        assert_eq!(maze.open_cells(), 3);
    }

    #[test]
    fn test_parse_and_display() {
        let maze: Labyrinth = CORRIDOR.parse().unwrap();
        assert_eq!(maze.rows(), 3);
        assert_eq!(maze.cols(), 5);
        assert_eq!(maze.entrance(), Point::new(0, 1));
        assert_eq!(maze.exit(), Point::new(2, 3));
        assert_eq!(maze.open_cells(), 5);
        assert_eq!(maze.to_string(), "* o * * * \n*       * \n* * * x * \n");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "*o*\n**\n".parse::<Labyrinth>().unwrap_err(),
            MazeError::RaggedRow {
                row: 1,
                found: 2,
                expected: 3
            }
        );
        assert_eq!(
            "*o*\n*x*\n*x*\n".parse::<Labyrinth>().unwrap_err(),
            MazeError::DuplicateMarker("exit")
        );
        assert_eq!(
            "*o*\n***\n".parse::<Labyrinth>().unwrap_err(),
            MazeError::MissingMarker("exit")
        );
        assert_eq!(
            "*o?\n*x*\n".parse::<Labyrinth>().unwrap_err(),
            MazeError::UnknownCell('?')
        );
    }

    #[test]
    fn test_generate_graph_nodes_row_major() {
        let maze: Labyrinth = CORRIDOR.parse().unwrap();
        let graph = maze.generate_graph().unwrap();
        assert_eq!(
            graph.nodes(),
            &[
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(1, 2),
                Point::new(1, 3),
                Point::new(2, 3),
            ]
        );
        assert!(graph.is_full());
    }

    #[test]
    fn test_generate_graph_edges() {
        let maze: Labyrinth = CORRIDOR.parse().unwrap();
        let graph = maze.generate_graph().unwrap();
        assert_eq!(graph.edge_count(), 4);
        let a = index_of(&graph, 0, 1);
        let b = index_of(&graph, 1, 1);
        let e = index_of(&graph, 2, 3);
        assert_eq!(graph.are_connected(a, b), Ok(true));
        assert_eq!(graph.are_connected(a, e), Ok(false));
        // No self-loops
        assert_eq!(graph.are_connected(a, a), Ok(false));
    }

    #[test]
    fn test_solve_corridor() {
        let maze: Labyrinth = CORRIDOR.parse().unwrap();
        let graph = maze.generate_graph().unwrap();
        let fw = FloydWarshall::solve(&graph);

        let start = index_of(&graph, 0, 1);
        let goal = index_of(&graph, 2, 3);
        assert_eq!(fw.path_length(start, goal), Ok(4));
        assert_eq!(
            fw.path_string(start, goal).unwrap(),
            "(0, 1)->(1, 1)->(1, 2)->(1, 3)->(2, 3)"
        );
    }

    #[test]
    fn test_blocked_exit() {
        let maze: Labyrinth = "*o***\n*  **\n***x*\n".parse().unwrap();
        let graph = maze.generate_graph().unwrap();
        let fw = FloydWarshall::solve(&graph);
        let start = index_of(&graph, 0, 1);
        let goal = index_of(&graph, 2, 3);
        assert_eq!(fw.is_node_accessible(start, goal), Ok(false));
    }

    #[test]
    fn test_open_room_shortest_route() {
        // 4x4 fully open room, entrance top-left, exit bottom-right
        let maze: Labyrinth = "o...\n....\n....\n...x\n".parse().unwrap();
        let graph = maze.generate_graph().unwrap();
        assert_eq!(graph.node_count(), 16);
        assert_eq!(graph.edge_count(), 24);
        let fw = FloydWarshall::solve(&graph);
        let start = index_of(&graph, 0, 0);
        let goal = index_of(&graph, 3, 3);
        assert_eq!(fw.path_length(start, goal), Ok(6));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_point_serde() {
        let json = serde_json::to_string(&Point::new(1, 2)).unwrap();
        assert_eq!(json, r#"{"row":1,"col":2}"#);
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Point::new(1, 2));
    }
}
