use grid_util::point::Point;
use thiserror::Error;

/// Convenient result alias for grid, search and maze operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the grid model, the search engines and the maze generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A grid or maze was requested with a dimension that cannot hold the requested cells.
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// A coordinate lookup fell outside the grid.
    #[error("cell ({row}, {col}) is outside the grid")]
    IndexOutOfRange { row: i32, col: i32 },

    /// A search was started without a start or a finish cell.
    #[error("a start and a finish cell are required")]
    MissingEndpoint,

    /// The finish cell is not connected to the start cell.
    #[error("no path from ({}, {}) to ({}, {})", .start.y, .start.x, .finish.y, .finish.x)]
    NoPathFound { start: Point, finish: Point },

    /// Pop on an empty priority queue. Correct search code never triggers this.
    #[error("pop on an empty priority queue")]
    EmptyQueue,

    /// An ASCII grid contained an unknown symbol.
    #[error("cannot parse grid at line {line}, column {column}: {symbol:?}")]
    Parse {
        line: usize,
        column: usize,
        symbol: char,
    },

    /// An ASCII grid row does not match the width of the first row.
    #[error("grid line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl Error {
    /// True for the terminal "start and finish are disconnected" outcome.
    pub fn is_no_path(&self) -> bool {
        matches!(self, Error::NoPathFound { .. })
    }
}
