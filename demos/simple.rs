use grid_util::point::Point;
use maze_pathfinding::{Algorithm, CellType, Grid};

// In this example a path is found on a grid with shape
// #####
// #S  #
// # # #
// #  F#
// #####
// S marks the start
// F marks the finish
fn main() {
    let mut grid = Grid::all_walls(5, 5).unwrap();
    for row in 1..4 {
        for col in 1..4 {
            grid.set_kind(row, col, CellType::Normal).unwrap();
        }
    }
    grid.set_kind(2, 2, CellType::Wall).unwrap();
    let start = Point::new(1, 1);
    let finish = Point::new(3, 3);
    match Algorithm::Dijkstra.solve(&grid, Some(start), Some(finish)) {
        Ok(result) => {
            println!("A path has been found:");
            for cell in result.shortest_path {
                println!("{}", cell);
            }
        }
        Err(err) => println!("{}", err),
    }
}
