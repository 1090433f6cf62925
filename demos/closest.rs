use grid_util::point::Point;
use maze_pathfinding::{astar, CellType, Grid, Manhattan};

// The finish F is walled off, so A* with allow_closest walks to the reachable
// cell nearest to it instead.
// .....#...
// .S...#.F.
// .....#...
fn main() {
    let grid: Grid = "\
        .....#...\n\
        .....#...\n\
        .....#...\n"
        .parse()
        .unwrap();
    let start = Point::new(1, 1);
    let finish = Point::new(7, 1);
    for allow_closest in [false, true] {
        let result = astar(&grid, Some(start), Some(finish), Manhattan, allow_closest).unwrap();
        println!(
            "allow_closest = {}: {} cells on the path, {} visited",
            allow_closest,
            result.shortest_path.len(),
            result.visited.len()
        );
        let mut shown = grid.clone();
        for cell in &result.shortest_path {
            shown.set_kind(cell.row(), cell.col(), CellType::Highlight).unwrap();
        }
        shown.set_kind(start.y, start.x, CellType::Start).unwrap();
        shown.set_kind(finish.y, finish.x, CellType::Finish).unwrap();
        print!("{}", shown);
    }
}
