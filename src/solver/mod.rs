use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::heuristic::{Manhattan, Octile};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;

pub mod astar;
pub mod dijkstra;

use astar::{AstarConfig, AstarSearch};
use dijkstra::dijkstra_path;

/// Outcome of advancing a steppable search by one expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was taken off the open set and its neighbours were relaxed.
    Expanded(Point),
    /// The finish cell was taken off the open set, the search is complete.
    Found(Point),
    /// The open set ran empty.
    Exhausted,
}

impl Step {
    pub fn is_done(&self) -> bool {
        !matches!(self, Step::Expanded(_))
    }
}

/// Cells handed back to the caller for rendering: the path from start to
/// finish (both included) and every cell the search touched, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub shortest_path: Vec<Cell>,
    pub visited: Vec<Cell>,
}

impl SearchResult {
    /// True when the search produced no path.
    pub fn is_empty(&self) -> bool {
        self.shortest_path.is_empty()
    }

    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.shortest_path.len().saturating_sub(1)
    }

    /// Checks that consecutive path cells are adjacent walkable cells of `grid`.
    pub fn is_connected_path(&self, grid: &Grid) -> bool {
        self.shortest_path
            .iter()
            .all(|c| grid.is_walkable(c.position()))
            && self.shortest_path.iter().tuple_windows().all(|(a, b)| {
                let dx = (a.col() - b.col()).abs();
                let dy = (a.row() - b.row()).abs();
                dx <= 1 && dy <= 1 && dx + dy > 0
            })
    }
}

/// The fixed set of search engines a front end can choose from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Algorithm {
    #[default]
    Dijkstra,
    Astar(AstarConfig),
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Astar(_) => "A*",
        }
    }

    /// Runs the selected engine. An A* search that ends without a path is
    /// reported as [Error::NoPathFound], like Dijkstra does.
    pub fn solve(
        &self,
        grid: &Grid,
        start: Option<Point>,
        finish: Option<Point>,
    ) -> Result<SearchResult> {
        info!("Solving with {}", self.name());
        match self {
            Algorithm::Dijkstra => dijkstra_path(grid, start, finish),
            Algorithm::Astar(config) => {
                let (start, finish) = endpoints(grid, start, finish)?;
                let result = if config.allow_diagonal {
                    AstarSearch::new(grid, start, finish, Octile, config.clone()).run()
                } else {
                    AstarSearch::new(grid, start, finish, Manhattan, config.clone()).run()
                }?;
                if result.is_empty() {
                    Err(Error::NoPathFound { start, finish })
                } else {
                    Ok(result)
                }
            }
        }
    }
}

/// Validates that both endpoints are given and inside the grid.
pub(crate) fn endpoints(
    grid: &Grid,
    start: Option<Point>,
    finish: Option<Point>,
) -> Result<(Point, Point)> {
    let (Some(start), Some(finish)) = (start, finish) else {
        return Err(Error::MissingEndpoint);
    };
    for p in [start, finish] {
        if !grid.in_bounds(p) {
            return Err(Error::IndexOutOfRange { row: p.y, col: p.x });
        }
    }
    Ok((start, finish))
}

/// Looks up the cell at a point the search already knows to be in bounds.
pub(crate) fn cell_for(grid: &Grid, p: Point) -> Result<Cell> {
    grid.cell_at(p)
        .ok_or(Error::IndexOutOfRange { row: p.y, col: p.x })
}
