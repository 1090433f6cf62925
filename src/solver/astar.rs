use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::cell::Cell;
use crate::error::Result;
use crate::grid::Grid;
use crate::heuristic::Heuristic;
use crate::priority_queue::PriorityQueue;
use crate::solver::{cell_for, endpoints, SearchResult, Step};
use crate::SQRT_2;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

/// Knobs for [AstarSearch]. The defaults give plain 4-connected A*.
#[derive(Clone, Debug, PartialEq)]
pub struct AstarConfig {
    /// Also step to the four diagonal neighbours at `weight * SQRT_2`.
    pub allow_diagonal: bool,
    /// Allow diagonal steps past a blocked orthogonal cell.
    pub allow_corner_cutting: bool,
    /// Cost of an orthogonal step.
    pub weight: f64,
    /// Scales the heuristic. Values above 1 give weighted A*, which expands
    /// fewer cells but may return longer paths.
    pub heuristic_factor: f64,
    /// When the finish cannot be reached, return the path to the cell closest
    /// to it instead of nothing.
    pub allow_closest: bool,
}

impl AstarConfig {
    pub fn new() -> AstarConfig {
        AstarConfig {
            allow_diagonal: false,
            allow_corner_cutting: false,
            weight: 1.0,
            heuristic_factor: 1.0,
            allow_closest: false,
        }
    }

    fn move_cost(&self, from: Point, to: Point) -> f64 {
        if from.x != to.x && from.y != to.y {
            self.weight * SQRT_2
        } else {
            self.weight
        }
    }
}

impl Default for AstarConfig {
    fn default() -> Self {
        AstarConfig::new()
    }
}

/// Per-cell search state. A cell has been visited once it has an entry.
#[derive(Clone, Copy, Debug)]
struct Node {
    g: f64,
    h: f64,
    f: f64,
    parent: usize,
    closed: bool,
}

/// A* from one start to one finish that can be driven one expansion at a time.
///
/// Search state lives in an index map keyed by position, so the grid is only
/// read. Parents are stored as indices into that map and resolved when the
/// path is rebuilt.
#[derive(Clone, Debug)]
pub struct AstarSearch<'g, H> {
    grid: &'g Grid,
    finish: Point,
    heuristic: H,
    config: AstarConfig,
    nodes: FxIndexMap<Point, Node>,
    open: PriorityQueue<usize, f64>,
    closest: usize,
    found: Option<usize>,
}

impl<'g, H: Heuristic> AstarSearch<'g, H> {
    pub fn new(
        grid: &'g Grid,
        start: Point,
        finish: Point,
        heuristic: H,
        config: AstarConfig,
    ) -> AstarSearch<'g, H> {
        let h = heuristic.estimate(start, finish) * config.heuristic_factor;
        let mut nodes = FxIndexMap::default();
        nodes.insert(
            start,
            Node {
                g: 0.0,
                h,
                f: h,
                parent: NO_PARENT,
                closed: false,
            },
        );
        let mut open = PriorityQueue::new();
        open.push(0, h);
        AstarSearch {
            grid,
            finish,
            heuristic,
            config,
            nodes,
            open,
            closest: 0,
            found: None,
        }
    }

    /// Pops the open cell with the lowest `f` and relaxes its neighbours.
    pub fn step(&mut self) -> Step {
        if let Some(index) = self.found {
            return Step::Found(self.point(index));
        }
        let Ok(index) = self.open.pop() else {
            return Step::Exhausted;
        };
        let Some((&current, node)) = self.nodes.get_index_mut(index) else {
            return Step::Exhausted;
        };
        if current == self.finish {
            self.found = Some(index);
            return Step::Found(current);
        }
        node.closed = true;
        let current_g = node.g;

        for neighbour in self.grid.neighborhood_points(
            current,
            self.config.allow_diagonal,
            self.config.allow_corner_cutting,
        ) {
            let g = current_g + self.config.move_cost(current, neighbour);
            let n;
            match self.nodes.entry(neighbour) {
                Vacant(e) => {
                    let h = self.heuristic.estimate(neighbour, self.finish)
                        * self.config.heuristic_factor;
                    n = e.index();
                    e.insert(Node {
                        g,
                        h,
                        f: g + h,
                        parent: index,
                        closed: false,
                    });
                    self.open.push(n, g + h);
                }
                Occupied(mut e) => {
                    n = e.index();
                    let node = e.get_mut();
                    if node.closed || g >= node.g {
                        continue;
                    }
                    // The heuristic is cached from the first visit.
                    node.g = g;
                    node.f = g + node.h;
                    node.parent = index;
                    let f = node.f;
                    if !self.open.rescore(&n, f) {
                        self.open.push(n, f);
                    }
                }
            }
            self.update_closest(n);
        }
        Step::Expanded(current)
    }

    // Closer by heuristic wins, a cheaper path breaks ties.
    fn update_closest(&mut self, candidate: usize) {
        let (Some((_, c)), Some((_, best))) = (
            self.nodes.get_index(candidate),
            self.nodes.get_index(self.closest),
        ) else {
            return;
        };
        if c.h < best.h || (c.h == best.h && c.g < best.g) {
            self.closest = candidate;
        }
    }

    fn point(&self, index: usize) -> Point {
        self.nodes
            .get_index(index)
            .map(|(p, _)| *p)
            .unwrap_or(self.finish)
    }

    /// Steps until the finish is found or the open set is empty.
    pub fn run(mut self) -> Result<SearchResult> {
        while !self.step().is_done() {}
        self.into_result()
    }

    /// Number of cells visited so far.
    pub fn visited_count(&self) -> usize {
        self.nodes.len()
    }

    /// Path from the start to `index`, following parent links.
    fn path_to(&self, index: usize) -> Result<Vec<Cell>> {
        let mut path = std::iter::successors(Some(index), |&i| {
            self.nodes
                .get_index(i)
                .map(|(_, node)| node.parent)
                .filter(|&p| p != NO_PARENT)
        })
        .map(|i| cell_for(self.grid, self.point(i)))
        .collect::<Result<Vec<_>>>()?;
        path.reverse();
        Ok(path)
    }

    fn visited(&self) -> Result<Vec<Cell>> {
        self.nodes
            .keys()
            .map(|p| cell_for(self.grid, *p))
            .collect()
    }

    /// The path to the finish if it was found. Otherwise the path to the
    /// closest cell when [AstarConfig::allow_closest] is set, or an empty
    /// result.
    pub fn into_result(self) -> Result<SearchResult> {
        let target = match self.found {
            Some(index) => index,
            None if self.config.allow_closest => {
                warn!(
                    "{:?} could not be reached, pathing to closest cell {:?}",
                    self.finish,
                    self.point(self.closest)
                );
                self.closest
            }
            None => {
                warn!("{:?} could not be reached", self.finish);
                return Ok(SearchResult::default());
            }
        };
        Ok(SearchResult {
            shortest_path: self.path_to(target)?,
            visited: self.visited()?,
        })
    }
}

/// Runs A* from `start` to `finish` with default movement settings.
///
/// Without `allow_closest` an unreachable finish gives an empty path and an
/// empty visited list.
pub fn astar<H: Heuristic>(
    grid: &Grid,
    start: Option<Point>,
    finish: Option<Point>,
    heuristic: H,
    allow_closest: bool,
) -> Result<SearchResult> {
    let config = AstarConfig {
        allow_closest,
        ..AstarConfig::new()
    };
    astar_with_config(grid, start, finish, heuristic, config)
}

pub fn astar_with_config<H: Heuristic>(
    grid: &Grid,
    start: Option<Point>,
    finish: Option<Point>,
    heuristic: H,
    config: AstarConfig,
) -> Result<SearchResult> {
    let (start, finish) = endpoints(grid, start, finish)?;
    info!(
        "A* on {}x{} grid from {:?} to {:?}",
        grid.rows(),
        grid.cols(),
        start,
        finish
    );
    let result = AstarSearch::new(grid, start, finish, heuristic, config).run()?;
    debug!(
        "A* visited {} cells, path has {} cells",
        result.visited.len(),
        result.shortest_path.len()
    );
    Ok(result)
}
