//! # maze_pathfinding
//!
//! Shortest paths on rectangular grids of cells. Implements
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//! with a backtracking pass to recover the path, and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with pluggable
//! heuristics and an optional fall back to the closest reachable cell. Both
//! searches report the order in which they visited cells so a front end can
//! animate them. Mazes to search are generated by
//! [recursive backtracking](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Randomized_depth-first_search).
//!
//! ```
//! use maze_pathfinding::{generate_maze_seeded, Algorithm, AstarConfig};
//!
//! let maze = generate_maze_seeded(21, 31, 3).unwrap();
//! let algorithm = Algorithm::Astar(AstarConfig::new());
//! let result = algorithm
//!     .solve(&maze.grid, Some(maze.start), Some(maze.start))
//!     .unwrap();
//! assert_eq!(result.shortest_path.len(), 1);
//! ```
pub mod cell;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod maze;
pub mod priority_queue;
pub mod solver;

pub use cell::{Cell, CellType};
pub use error::{Error, Result};
pub use grid::{Components, Grid};
pub use heuristic::{Chebyshev, Heuristic, Manhattan, Octile};
pub use maze::{generate_maze, generate_maze_seeded, generate_maze_with_rng, Maze};
pub use priority_queue::PriorityQueue;
pub use solver::astar::{astar, astar_with_config, AstarConfig, AstarSearch};
pub use solver::dijkstra::{
    backtrack, dijkstra, dijkstra_path, DijkstraResult, DijkstraSearch, Distances,
};
pub use solver::{Algorithm, SearchResult, Step};

/// Cost of a diagonal step, truncated to five digits.
#[allow(clippy::approx_constant)]
pub const SQRT_2: f64 = 1.41421;
/// Inline capacity of neighbourhood buffers, enough for all eight neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
