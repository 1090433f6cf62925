use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace, warn};

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::priority_queue::PriorityQueue;
use crate::solver::{cell_for, endpoints, SearchResult, Step};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Distance table keyed by cell position. Cells the search never reached are
/// absent, which stands for an infinite distance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distances {
    table: FxIndexMap<Point, u32>,
}

impl Distances {
    pub fn get(&self, p: Point) -> Option<u32> {
        self.table.get(&p).copied()
    }
    pub fn is_reachable(&self, p: Point) -> bool {
        self.table.contains_key(&p)
    }
    /// Difference of the distances of `end` and `start`, if both were reached.
    pub fn between(&self, start: Point, end: Point) -> Option<i64> {
        Some(self.get(end)? as i64 - self.get(start)? as i64)
    }
    /// Number of reached cells.
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    /// Reached cells in the order their distance was first lowered.
    pub fn iter(&self) -> impl Iterator<Item = (Point, u32)> + '_ {
        self.table.iter().map(|(p, d)| (*p, *d))
    }
    fn lower(&mut self, p: Point, distance: u32) -> bool {
        match self.table.get_mut(&p) {
            Some(d) if *d <= distance => false,
            Some(d) => {
                *d = distance;
                true
            }
            None => {
                self.table.insert(p, distance);
                true
            }
        }
    }
}

/// Output of [dijkstra]: the distance table and the cells in the order they were settled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DijkstraResult {
    pub distances: Distances,
    pub visited: Vec<Cell>,
}

/// Uniform-cost Dijkstra over the orthogonal neighbourhood that can be driven
/// one settled cell at a time. The whole reachable area is settled; the
/// search does not stop early at a goal.
#[derive(Clone, Debug)]
pub struct DijkstraSearch<'g> {
    grid: &'g Grid,
    queue: PriorityQueue<Point, u32>,
    distances: Distances,
    visited: FxIndexSet<Point>,
}

impl<'g> DijkstraSearch<'g> {
    pub fn new(grid: &'g Grid, start: Point) -> DijkstraSearch<'g> {
        let mut distances = Distances::default();
        let mut queue = PriorityQueue::with_capacity(grid.len());
        distances.lower(start, 0);
        queue.push(start, 0);
        DijkstraSearch {
            grid,
            queue,
            distances,
            visited: FxIndexSet::default(),
        }
    }

    /// Settles the next cell, skipping queue entries made stale by a later
    /// improvement. Never returns [Step::Found].
    pub fn step(&mut self) -> Step {
        loop {
            let Ok((current, distance)) = self.queue.pop_with_priority() else {
                return Step::Exhausted;
            };
            if !self.visited.insert(current) {
                trace!("Skipping settled cell {:?}", current);
                continue;
            }
            for n in self.grid.neighborhood_points(current, false, false) {
                if self.distances.lower(n, distance + 1) {
                    self.queue.push(n, distance + 1);
                }
            }
            return Step::Expanded(current);
        }
    }

    /// Steps until the queue is empty.
    pub fn run(mut self) -> Result<DijkstraResult> {
        while !self.step().is_done() {}
        self.into_result()
    }

    pub fn distances(&self) -> &Distances {
        &self.distances
    }

    /// Cells settled so far, in order.
    pub fn visited(&self) -> impl Iterator<Item = &Point> {
        self.visited.iter()
    }

    pub fn into_result(self) -> Result<DijkstraResult> {
        let visited = self
            .visited
            .iter()
            .map(|p| cell_for(self.grid, *p))
            .collect::<Result<Vec<_>>>()?;
        Ok(DijkstraResult {
            distances: self.distances,
            visited,
        })
    }
}

/// Computes the distance from `start` to every reachable cell. Fails with
/// [Error::NoPathFound] when `finish` is not among them.
pub fn dijkstra(
    grid: &Grid,
    start: Option<Point>,
    finish: Option<Point>,
) -> Result<DijkstraResult> {
    let (start, finish) = endpoints(grid, start, finish)?;
    info!(
        "Dijkstra on {}x{} grid from {:?} to {:?}",
        grid.rows(),
        grid.cols(),
        start,
        finish
    );
    let result = DijkstraSearch::new(grid, start).run()?;
    debug!("Dijkstra settled {} cells", result.visited.len());
    if !result.distances.is_reachable(finish) {
        warn!("{:?} is not reachable from {:?}", finish, start);
        return Err(Error::NoPathFound { start, finish });
    }
    Ok(result)
}

/// Walks back from `finish` to `start`, each time stepping to the neighbour
/// with the smallest recorded distance. Among equally close neighbours the
/// first in top, right, bottom, left order wins.
pub fn backtrack(
    grid: &Grid,
    distances: &Distances,
    start: Option<Point>,
    finish: Option<Point>,
) -> Result<Vec<Cell>> {
    let (start, finish) = endpoints(grid, start, finish)?;
    let no_path = Error::NoPathFound { start, finish };
    let mut current_distance = distances.get(finish).ok_or(no_path.clone())?;
    let mut current = finish;
    let mut path = Vec::with_capacity(current_distance as usize + 1);
    while current != start {
        path.push(cell_for(grid, current)?);
        // The start is a valid last step even when it is a wall.
        let walled_start = (current.manhattan_distance(&start) == 1).then_some(start);
        let (next, next_distance) = grid
            .neighborhood_points(current, false, false)
            .into_iter()
            .chain(walled_start)
            .filter_map(|n| distances.get(n).map(|d| (n, d)))
            .min_by_key(|&(_, d)| d)
            .ok_or(no_path.clone())?;
        // A table from another grid or start could otherwise loop forever.
        if next_distance >= current_distance {
            return Err(no_path);
        }
        current = next;
        current_distance = next_distance;
    }
    path.push(cell_for(grid, start)?);
    path.reverse();
    Ok(path)
}

/// [dijkstra] followed by [backtrack].
pub fn dijkstra_path(
    grid: &Grid,
    start: Option<Point>,
    finish: Option<Point>,
) -> Result<SearchResult> {
    let DijkstraResult { distances, visited } = dijkstra(grid, start, finish)?;
    let shortest_path = backtrack(grid, &distances, start, finish)?;
    Ok(SearchResult {
        shortest_path,
        visited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellType;

    fn positions(cells: &[Cell]) -> Vec<(i32, i32)> {
        cells.iter().map(|c| (c.row(), c.col())).collect()
    }

    #[test]
    fn open_grid_distances_are_manhattan() {
        let grid = Grid::new(5, 5).unwrap();
        let start = Point::new(0, 0);
        let result = dijkstra(&grid, Some(start), Some(Point::new(4, 4))).unwrap();
        assert_eq!(result.visited.len(), 25);
        for cell in grid.cells() {
            assert_eq!(
                result.distances.get(cell.position()),
                Some((cell.row() + cell.col()) as u32)
            );
        }
    }

    #[test]
    fn corner_to_corner_on_5x5() {
        let grid = Grid::new(5, 5).unwrap();
        let start = Some(Point::new(0, 0));
        let finish = Some(Point::new(4, 4));
        let result = dijkstra_path(&grid, start, finish).unwrap();
        assert_eq!(result.shortest_path.len(), 9);
        let distances = dijkstra(&grid, start, finish).unwrap().distances;
        assert_eq!(distances.get(Point::new(4, 4)), Some(8));
        assert_eq!(distances.between(Point::new(1, 1), Point::new(4, 4)), Some(6));
    }

    #[test]
    fn visited_starts_with_start_in_pop_order() {
        let grid = Grid::new(3, 3).unwrap();
        let result = dijkstra(&grid, Some(Point::new(1, 1)), Some(Point::new(0, 0))).unwrap();
        // Equal distances settle in the order they were queued: top, right, bottom, left.
        assert_eq!(
            positions(&result.visited[..5]),
            vec![(1, 1), (0, 1), (1, 2), (2, 1), (1, 0)]
        );
    }

    #[test]
    fn backtrack_tie_break_prefers_top_then_right() {
        let grid = Grid::new(3, 3).unwrap();
        let start = Some(Point::new(0, 0));
        let finish = Some(Point::new(2, 2));
        let path = dijkstra_path(&grid, start, finish).unwrap().shortest_path;
        // From the finish the top neighbour is always taken first.
        assert_eq!(
            positions(&path),
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn routes_through_the_only_gap() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.fill_row(2, CellType::Wall).unwrap();
        grid.set_kind(2, 3, CellType::Normal).unwrap();
        let start = Some(Point::new(0, 0));
        let finish = Some(Point::new(0, 4));
        let result = dijkstra_path(&grid, start, finish).unwrap();
        assert!(positions(&result.shortest_path).contains(&(2, 3)));
        assert_eq!(result.shortest_path.len(), 4 + 3 + 3 + 1);

        grid.set_kind(2, 3, CellType::Wall).unwrap();
        assert_eq!(
            dijkstra(&grid, start, finish).unwrap_err(),
            Error::NoPathFound {
                start: Point::new(0, 0),
                finish: Point::new(0, 4)
            }
        );
    }

    #[test]
    fn missing_endpoints() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            dijkstra(&grid, None, Some(Point::new(1, 1))),
            Err(Error::MissingEndpoint)
        );
        assert_eq!(
            backtrack(&grid, &Distances::default(), Some(Point::new(0, 0)), None),
            Err(Error::MissingEndpoint)
        );
    }

    #[test]
    fn start_equals_finish() {
        let grid = Grid::new(2, 2).unwrap();
        let p = Some(Point::new(1, 0));
        let result = dijkstra_path(&grid, p, p).unwrap();
        assert_eq!(positions(&result.shortest_path), vec![(0, 1)]);
    }

    #[test]
    fn walled_start_is_backtracked_onto() {
        let grid: Grid = "#..".parse().unwrap();
        let start = Some(Point::new(0, 0));
        let finish = Some(Point::new(2, 0));
        let result = dijkstra_path(&grid, start, finish).unwrap();
        assert_eq!(positions(&result.shortest_path), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn backtrack_rejects_foreign_table() {
        let grid = Grid::new(3, 3).unwrap();
        let distances = dijkstra(&grid, Some(Point::new(0, 0)), Some(Point::new(2, 2)))
            .unwrap()
            .distances;
        // The table was built from (0, 0), so no descent leads to row 2, column 0.
        assert!(backtrack(&grid, &distances, Some(Point::new(0, 2)), Some(Point::new(2, 2)))
            .unwrap_err()
            .is_no_path());
    }

    #[test]
    fn stepping_matches_run() {
        let grid: Grid = "..#\n...\n#..".parse().unwrap();
        let mut search = DijkstraSearch::new(&grid, Point::new(0, 0));
        let mut expanded = Vec::new();
        loop {
            match search.step() {
                Step::Expanded(p) => expanded.push(p),
                Step::Exhausted => break,
                Step::Found(_) => unreachable!(),
            }
        }
        let result = search.into_result().unwrap();
        assert_eq!(expanded.len(), 7);
        assert_eq!(
            expanded,
            result.visited.iter().map(Cell::position).collect::<Vec<_>>()
        );
    }
}
