use maze_pathfinding::{generate_maze_seeded, Algorithm, AstarConfig, CellType};

// Generates a maze, routes from the carve start to the farthest open cell of
// the bottom-right quarter and prints the maze with the path marked.
fn main() {
    let maze = generate_maze_seeded(21, 41, 7).unwrap();
    println!(
        "Carved {} passages from ({}, {})",
        maze.carve_steps().count(),
        maze.start.y,
        maze.start.x
    );
    let finish = maze
        .grid
        .cells()
        .filter(|c| c.is_walkable() && c.row() > 10 && c.col() > 20)
        .max_by_key(|c| c.row() + c.col())
        .map(|c| c.position());

    let mut grid = maze.grid.clone();
    for algorithm in [Algorithm::Dijkstra, Algorithm::Astar(AstarConfig::new())] {
        match algorithm.solve(&maze.grid, Some(maze.start), finish) {
            Ok(result) => {
                println!(
                    "{}: {} steps, {} cells visited",
                    algorithm.name(),
                    result.steps(),
                    result.visited.len()
                );
                for cell in &result.shortest_path {
                    grid.set_kind(cell.row(), cell.col(), CellType::Highlight)
                        .unwrap();
                }
            }
            Err(err) => println!("{}: {}", algorithm.name(), err),
        }
    }
    grid.set_kind(maze.start.y, maze.start.x, CellType::Start)
        .unwrap();
    if let Some(finish) = finish {
        grid.set_kind(finish.y, finish.x, CellType::Finish).unwrap();
    }
    print!("{}", grid);
}
