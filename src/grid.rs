use crate::cell::{Cell, CellType};
use crate::error::{Error, Result};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use core::str::FromStr;
use grid_util::grid::{BoolGrid, Grid as _, SimpleGrid};
use grid_util::point::Point;
use grid_util::rect::Rect;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Orthogonal offsets in neighbour order: top, right, bottom, left.
const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
/// Diagonal offsets: top-right, bottom-right, bottom-left, top-left.
const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// Rectangular grid of cells. Cell types are kept in a [SimpleGrid] with
/// `width` the number of columns; [Cell] values are built on access. The
/// shape is fixed at construction, cell types can be changed through
/// [Grid::set_kind].
#[derive(Clone, Debug)]
pub struct Grid {
    kinds: SimpleGrid<CellType>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.kinds.width == other.kinds.width
            && self.kinds.height == other.kinds.height
            && self.kinds.values == other.kinds.values
    }
}

impl Eq for Grid {}

impl Grid {
    /// A grid where every cell is [CellType::Normal].
    pub fn new(rows: usize, cols: usize) -> Result<Grid> {
        Grid::filled(rows, cols, CellType::Normal)
    }

    /// A grid where every cell is [CellType::Wall], the starting point for maze generation.
    pub fn all_walls(rows: usize, cols: usize) -> Result<Grid> {
        Grid::filled(rows, cols, CellType::Wall)
    }

    pub fn filled(rows: usize, cols: usize, kind: CellType) -> Result<Grid> {
        if rows == 0 || cols == 0 || i32::try_from(rows).is_err() || i32::try_from(cols).is_err()
        {
            return Err(Error::InvalidDimension { rows, cols });
        }
        Ok(Grid {
            kinds: SimpleGrid::new(cols, rows, kind),
        })
    }

    pub fn rows(&self) -> usize {
        self.kinds.height
    }
    pub fn cols(&self) -> usize {
        self.kinds.width
    }
    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.kinds.values.len()
    }
    /// Always false, a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.kinds.values.is_empty()
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        self.kinds.point_in_bounds(point)
    }

    pub fn get_cell(&self, row: i32, col: i32) -> Result<Cell> {
        self.cell_at(Point::new(col, row))
            .ok_or(Error::IndexOutOfRange { row, col })
    }

    pub fn cell_at(&self, point: Point) -> Option<Cell> {
        self.kind_at(point)
            .map(|kind| Cell::new(point.y, point.x, kind))
    }

    pub fn kind_at(&self, point: Point) -> Option<CellType> {
        self.in_bounds(point).then(|| self.kinds.get_point(point))
    }

    /// In bounds and not a wall.
    pub fn is_walkable(&self, point: Point) -> bool {
        self.kind_at(point).is_some_and(CellType::is_walkable)
    }

    pub fn set_kind(&mut self, row: i32, col: i32, kind: CellType) -> Result<()> {
        self.set_kind_point(Point::new(col, row), kind)
    }

    pub(crate) fn set_kind_point(&mut self, point: Point, kind: CellType) -> Result<()> {
        if !self.in_bounds(point) {
            return Err(Error::IndexOutOfRange {
                row: point.y,
                col: point.x,
            });
        }
        self.kinds.set_point(point, kind);
        Ok(())
    }

    /// Sets every cell of a row.
    pub fn fill_row(&mut self, row: i32, kind: CellType) -> Result<()> {
        if row < 0 || row >= self.rows() as i32 {
            return Err(Error::IndexOutOfRange { row, col: 0 });
        }
        self.kinds
            .set_rectangle(&Rect::new(0, row, self.cols() as i32, 1), kind);
        Ok(())
    }

    /// Sets every cell of a column.
    pub fn fill_col(&mut self, col: i32, kind: CellType) -> Result<()> {
        if col < 0 || col >= self.cols() as i32 {
            return Err(Error::IndexOutOfRange { row: 0, col });
        }
        self.kinds
            .set_rectangle(&Rect::new(col, 0, 1, self.rows() as i32), kind);
        Ok(())
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows() as i32)
            .cartesian_product(0..self.cols() as i32)
            .map(|(row, col)| Cell::new(row, col, self.kinds.get(col as usize, row as usize)))
    }

    pub fn count_kind(&self, kind: CellType) -> usize {
        self.kinds.values.iter().filter(|k| **k == kind).count()
    }

    /// The walkable orthogonal neighbours of `cell` in top, right, bottom, left order.
    pub fn neighbors(&self, cell: &Cell) -> SmallVec<[Cell; 4]> {
        self.neighborhood_points(cell.position(), false, false)
            .into_iter()
            .filter_map(|p| self.cell_at(p))
            .collect()
    }

    /// Like [Grid::neighbors] followed by the walkable diagonal neighbours in
    /// top-right, bottom-right, bottom-left, top-left order. Without corner
    /// cutting a diagonal step needs both adjacent orthogonal cells to be open.
    pub fn neighbors_with_diagonals(
        &self,
        cell: &Cell,
        allow_corner_cutting: bool,
    ) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        self.neighborhood_points(cell.position(), true, allow_corner_cutting)
            .into_iter()
            .filter_map(|p| self.cell_at(p))
            .collect()
    }

    /// Walkable neighbour points of `pos`, orthogonal first.
    pub(crate) fn neighborhood_points(
        &self,
        pos: Point,
        allow_diagonal: bool,
        allow_corner_cutting: bool,
    ) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let mut points: SmallVec<[Point; N_SMALLVEC_SIZE]> = ORTHOGONAL
            .iter()
            .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .filter(|p| self.is_walkable(*p))
            .collect();
        if allow_diagonal {
            points.extend(
                DIAGONAL
                    .iter()
                    .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
                    .filter(|p| self.can_move_diagonally(pos, *p, allow_corner_cutting)),
            );
        }
        points
    }

    fn can_move_diagonally(&self, from: Point, to: Point, allow_corner_cutting: bool) -> bool {
        if !self.is_walkable(to) {
            return false;
        }
        allow_corner_cutting
            || (self.is_walkable(Point::new(from.x, to.y))
                && self.is_walkable(Point::new(to.x, from.y)))
    }

    /// Links up orthogonally adjacent walkable cells into connected components.
    pub fn components(&self) -> Components {
        info!("Generating connected components");
        let mut walkable = BoolGrid::new(self.cols(), self.rows(), false);
        let mut union_find = UnionFind::new(self.len());
        for cell in self.cells().filter(Cell::is_walkable) {
            let p = cell.position();
            walkable.set_point(p, true);
            let parent_ix = self.kinds.get_ix_point(&p);
            // Right and bottom neighbours cover every edge exactly once.
            for n in [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)] {
                if self.is_walkable(n) {
                    union_find.union(parent_ix, self.kinds.get_ix_point(&n));
                }
            }
        }
        Components {
            walkable,
            union_find,
        }
    }
}

/// Connected components of the walkable cells of a [Grid], a snapshot taken by
/// [Grid::components].
#[derive(Clone, Debug)]
pub struct Components {
    walkable: BoolGrid,
    union_find: UnionFind<usize>,
}

impl Components {
    fn ix(&self, p: &Point) -> Option<usize> {
        (self.walkable.point_in_bounds(*p) && self.walkable.get_point(*p))
            .then(|| self.walkable.get_ix_point(p))
    }

    /// Checks if start and goal are walkable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.ix(start), self.ix(goal)) {
            (Some(a), Some(b)) => self.union_find.equiv(a, b),
            _ => false,
        }
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Number of distinct components formed by walkable cells.
    pub fn count(&self) -> usize {
        let mut roots = (0..self.walkable.height)
            .cartesian_product(0..self.walkable.width)
            .filter(|&(y, x)| self.walkable.get(x, y))
            .map(|(y, x)| self.union_find.find(self.walkable.get_ix(x, y)))
            .collect::<Vec<_>>();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.kinds.values.chunks(self.cols()) {
            writeln!(f, "{}", row.iter().map(|kind| kind.symbol()).join(""))?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parses the format written by [Display](fmt::Display): one line per row,
    /// one symbol per cell (see [CellType::symbol]). Blank lines are skipped.
    fn from_str(s: &str) -> Result<Grid> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = Grid::new(rows, cols)?;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(Error::RaggedRow {
                    line: row + 1,
                    expected: cols,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let kind = CellType::from_symbol(symbol).ok_or(Error::Parse {
                    line: row + 1,
                    column: col + 1,
                    symbol,
                })?;
                grid.set_kind(row as i32, col as i32, kind)?;
            }
        }
        Ok(grid)
    }
}
