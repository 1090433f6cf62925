use core::fmt;
use grid_util::point::Point;

/// What occupies a [Cell]. Only [CellType::Wall] blocks movement, the other
/// variants are markers the caller uses to render searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellType {
    #[default]
    Normal,
    Wall,
    Start,
    Finish,
    Highlight,
    SubtleHighlight,
}

impl CellType {
    pub const ALL: [CellType; 6] = [
        CellType::Normal,
        CellType::Wall,
        CellType::Start,
        CellType::Finish,
        CellType::Highlight,
        CellType::SubtleHighlight,
    ];

    pub fn is_walkable(self) -> bool {
        self != CellType::Wall
    }

    /// Style identifier used by front ends, e.g. `"cell-wall"`.
    pub fn class_name(self) -> &'static str {
        match self {
            CellType::Normal => "cell-normal",
            CellType::Wall => "cell-wall",
            CellType::Start => "cell-start",
            CellType::Finish => "cell-finish",
            CellType::Highlight => "cell-highlight",
            CellType::SubtleHighlight => "cell-subtle-highlight",
        }
    }

    /// Character used by the ASCII grid format.
    pub fn symbol(self) -> char {
        match self {
            CellType::Normal => '.',
            CellType::Wall => '#',
            CellType::Start => 'S',
            CellType::Finish => 'F',
            CellType::Highlight => '*',
            CellType::SubtleHighlight => '+',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<CellType> {
        CellType::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// A single grid position. The position is fixed when the grid is built,
/// only the [CellType] changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    position: Point,
    kind: CellType,
}

impl Cell {
    pub fn new(row: i32, col: i32, kind: CellType) -> Cell {
        Cell {
            position: Point::new(col, row),
            kind,
        }
    }
    pub fn row(&self) -> i32 {
        self.position.y
    }
    pub fn col(&self) -> i32 {
        self.position.x
    }
    /// The position as a [Point] with `x` the column and `y` the row.
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn kind(&self) -> CellType {
        self.kind
    }
    pub fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}-{})", self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for kind in CellType::ALL {
            assert_eq!(CellType::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(CellType::from_symbol('?'), None);
    }

    #[test]
    fn only_walls_block() {
        let walkable = CellType::ALL
            .into_iter()
            .filter(|kind| kind.is_walkable())
            .count();
        assert_eq!(walkable, 5);
        assert_eq!(CellType::Wall.to_string(), "cell-wall");
    }

    #[test]
    fn position_maps_row_to_y() {
        let cell = Cell::new(2, 5, CellType::Normal);
        assert_eq!(cell.position(), Point::new(5, 2));
        assert_eq!(cell.to_string(), "(2-5)");
    }
}
