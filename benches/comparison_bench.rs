use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::point::Point;
use maze_pathfinding::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N_SCENARIOS: usize = 32;

/// A seeded maze with random pairs of open cells to route between.
fn maze_scenarios(size: usize) -> (Grid, Vec<(Point, Point)>) {
    let mut rng = StdRng::seed_from_u64(0);
    let maze = generate_maze_with_rng(size, size, &mut rng).unwrap();
    let open = maze
        .grid
        .cells()
        .filter(|c| c.is_walkable())
        .map(|c| c.position())
        .collect::<Vec<_>>();
    let scenarios = (0..N_SCENARIOS)
        .map(|_| {
            (
                open[rng.gen_range(0..open.len())],
                open[rng.gen_range(0..open.len())],
            )
        })
        .collect();
    (maze.grid, scenarios)
}

fn maze_bench_solver(c: &mut Criterion, size: usize, algorithm: Algorithm) {
    let (grid, scenarios) = maze_scenarios(size);
    c.bench_function(
        format!("maze {size}x{size}, {}", algorithm.name()).as_str(),
        |b| {
            b.iter(|| {
                for (start, end) in &scenarios {
                    let _ = black_box(algorithm.solve(&grid, Some(*start), Some(*end)));
                }
            })
        },
    );
}

fn maze_bench_dijkstra(c: &mut Criterion) {
    maze_bench_solver(c, 101, Algorithm::Dijkstra);
}

fn maze_bench_astar(c: &mut Criterion) {
    maze_bench_solver(c, 101, Algorithm::Astar(AstarConfig::new()));
}

fn open_bench_astar_diagonal(c: &mut Criterion) {
    let grid = Grid::new(128, 128).unwrap();
    let config = AstarConfig {
        allow_diagonal: true,
        ..AstarConfig::new()
    };
    c.bench_function("open 128x128, A* 8-grid", |b| {
        b.iter(|| {
            black_box(astar_with_config(
                &grid,
                Some(Point::new(0, 0)),
                Some(Point::new(127, 127)),
                Octile,
                config.clone(),
            ))
        })
    });
}

fn maze_bench_generation(c: &mut Criterion) {
    c.bench_function("generate maze 201x201", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| black_box(generate_maze_with_rng(201, 201, &mut rng)))
    });
}

criterion_group!(
    benches,
    maze_bench_dijkstra,
    maze_bench_astar,
    open_bench_astar_diagonal,
    maze_bench_generation,
);
criterion_main!(benches);
