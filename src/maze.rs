//! Perfect-maze generation by randomized depth-first backtracking.
//!
//! The grid starts as solid wall. From a random interior cell the carver
//! repeatedly jumps two cells in a random direction to a cell that is still
//! wall, opening it and the cell in between. Every opened cell is reached
//! exactly once, so the open cells form a tree.
use grid_util::point::Point;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::cell::{Cell, CellType};
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Two-cell jumps in top, right, bottom, left order.
const JUMPS: [(i32, i32); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// A generated maze together with the order it was carved in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    /// Carved cells, three per carve: the current cell, the cell in between
    /// and the newly opened cell. Meant for animating the generation.
    pub steps: Vec<Cell>,
    /// The randomly chosen cell the carve started from.
    pub start: Point,
}

impl Maze {
    /// The trace as `[current, midpoint, next]` triples.
    pub fn carve_steps(&self) -> impl Iterator<Item = [Cell; 3]> + '_ {
        self.steps.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }
}

struct Frame {
    cell: Point,
    candidates: SmallVec<[Point; 4]>,
    next: usize,
}

/// Generates a maze with the thread-local random number generator.
pub fn generate_maze(rows: usize, cols: usize) -> Result<Maze> {
    generate_maze_with_rng(rows, cols, &mut rand::thread_rng())
}

/// Generates a reproducible maze from a seed.
pub fn generate_maze_seeded(rows: usize, cols: usize, seed: u64) -> Result<Maze> {
    generate_maze_with_rng(rows, cols, &mut StdRng::seed_from_u64(seed))
}

/// Generates a maze using `rng` for the start cell and every shuffle. Both
/// dimensions must be at least 3 so that an interior start cell exists.
pub fn generate_maze_with_rng<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Maze> {
    if rows < 3 || cols < 3 {
        return Err(Error::InvalidDimension { rows, cols });
    }
    let mut grid = Grid::all_walls(rows, cols)?;
    let start = Point::new(
        rng.gen_range(1..=cols as i32 - 2),
        rng.gen_range(1..=rows as i32 - 2),
    );
    info!("Generating {}x{} maze from {:?}", rows, cols, start);
    grid.set_kind_point(start, CellType::Normal)?;

    let mut steps = Vec::new();
    // Explicit stack; one frame per cell on the current carve path.
    let mut stack = vec![Frame {
        cell: start,
        candidates: wall_candidates(&grid, start, rng),
        next: 0,
    }];
    while let Some(frame) = stack.last_mut() {
        let Some(&neighbour) = frame.candidates.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let current = frame.cell;
        // An earlier branch may have opened it since the frame was built.
        if grid.is_walkable(neighbour) {
            continue;
        }
        let midpoint = Point::new(
            (current.x + neighbour.x) / 2,
            (current.y + neighbour.y) / 2,
        );
        grid.set_kind_point(neighbour, CellType::Normal)?;
        grid.set_kind_point(midpoint, CellType::Normal)?;
        trace!("Carved {:?} -> {:?} -> {:?}", current, midpoint, neighbour);
        for p in [current, midpoint, neighbour] {
            steps.push(Cell::new(p.y, p.x, CellType::Normal));
        }
        stack.push(Frame {
            cell: neighbour,
            candidates: wall_candidates(&grid, neighbour, rng),
            next: 0,
        });
    }
    debug!("Maze carved in {} steps", steps.len() / 3);
    Ok(Maze { grid, steps, start })
}

/// In-bounds cells two steps away that are still wall, in random order.
fn wall_candidates<R: Rng + ?Sized>(grid: &Grid, p: Point, rng: &mut R) -> SmallVec<[Point; 4]> {
    let mut candidates = JUMPS
        .iter()
        .map(|&(dx, dy)| Point::new(p.x + dx, p.y + dy))
        .filter(|n| grid.kind_at(*n) == Some(CellType::Wall))
        .collect::<SmallVec<[Point; 4]>>();
    candidates.shuffle(rng);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_grids_without_interior() {
        assert_eq!(
            generate_maze_seeded(2, 10, 0),
            Err(Error::InvalidDimension { rows: 2, cols: 10 })
        );
        assert!(generate_maze_seeded(10, 0, 0).is_err());
    }

    #[test]
    fn start_is_interior_and_open() {
        for seed in 0..50 {
            let maze = generate_maze_seeded(7, 9, seed).unwrap();
            assert!((1..=5).contains(&maze.start.y));
            assert!((1..=7).contains(&maze.start.x));
            assert!(maze.grid.is_walkable(maze.start));
        }
    }

    #[test]
    fn smallest_maze_opens_the_center_only() {
        let maze = generate_maze_seeded(3, 3, 4).unwrap();
        assert_eq!(maze.start, Point::new(1, 1));
        assert_eq!(maze.grid.count_kind(CellType::Normal), 1);
        assert!(maze.steps.is_empty());
    }

    #[test]
    fn steps_are_adjacent_triples() {
        let maze = generate_maze_seeded(15, 21, 7).unwrap();
        assert_eq!(maze.steps.len() % 3, 0);
        assert_eq!(maze.steps[0].position(), maze.start);
        for [current, midpoint, next] in maze.carve_steps() {
            assert_eq!(current.row() + next.row(), 2 * midpoint.row());
            assert_eq!(current.col() + next.col(), 2 * midpoint.col());
            assert_eq!(
                (current.row() - next.row()).abs() + (current.col() - next.col()).abs(),
                2
            );
            // The trace holds the cells as they were when carved.
            assert_eq!(next.kind(), CellType::Normal);
        }
        // Every opened cell except the start is a midpoint or a new cell.
        assert_eq!(
            maze.grid.count_kind(CellType::Normal),
            1 + 2 * maze.carve_steps().count()
        );
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate_maze_seeded(11, 11, 42).unwrap();
        let b = generate_maze_seeded(11, 11, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn large_mazes_do_not_recurse() {
        let maze = generate_maze_seeded(401, 401, 1).unwrap();
        assert!(maze.grid.count_kind(CellType::Normal) > 200 * 200);
    }
}
