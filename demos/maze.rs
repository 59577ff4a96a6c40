//! Random-maze demo: runs A* and JPS on the same map and prints both paths.
//!
//! Run: cargo run --bin maze -- [seed] [wall-chance]
//! Set `RUST_LOG=debug` to see search statistics.

use gridpath::{
    AStarParam, Grid, GridPos, JumpPointParam, SearchConfig, full_path, path_length,
};
use gridpath_demos::{random_grid, render};
use rand::SeedableRng;

const WIDTH: i32 = 48;
const HEIGHT: i32 = 16;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);
    let wall_chance = args
        .next()
        .and_then(|s| s.parse().ok())
        .filter(|c: &f64| (0.0..1.0).contains(c))
        .unwrap_or(0.3);

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut grid = random_grid(WIDTH, HEIGHT, wall_chance, &mut rng);
    let start = GridPos::new(0, 0);
    let end = GridPos::new(WIDTH - 1, HEIGHT - 1);
    grid.set_walkable_at(start, true);
    grid.set_walkable_at(end, true);

    let config = SearchConfig::default();
    println!("seed {seed}, wall chance {wall_chance}, {:?}", config.diagonal_movement);

    let mut astar = AStarParam::with_config(grid.clone_grid(), start, end, &config);
    let cells = astar.find_path();
    report("A*", &grid, &cells);

    let mut jps = JumpPointParam::with_config(grid.clone_grid(), start, end, &config);
    let route = jps.find_path();
    println!("JPS: {} jump points", route.len());
    report("JPS", &grid, &full_path(&route));
}

fn report(name: &str, grid: &impl Grid, path: &[GridPos]) {
    if path.is_empty() {
        println!("{name}: no path\n{}", render(grid, path));
        return;
    }
    println!(
        "{name}: {} cells, length {:.3}\n{}",
        path.len(),
        path_length(path),
        render(grid, path)
    );
}
