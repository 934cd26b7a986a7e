use criterion::{criterion_group, criterion_main, Criterion};
use maze_search::{Maze, MazeSolver};
use std::hint::black_box;
use std::path::PathBuf;

fn load(name: &str) -> Maze {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "mazes", name].iter().collect();
    Maze::from_file(path).expect("Could not load maze")
}

fn maze_bench(c: &mut Criterion) {
    for name in ["maze1.txt", "maze2.txt", "maze3.txt"] {
        let maze = load(name);
        for (label, solver) in [("dfs", MazeSolver::dfs()), ("bfs", MazeSolver::bfs())] {
            c.bench_function(format!("{name}, {label}").as_str(), |b| {
                b.iter(|| black_box(solver.solve(&maze)))
            });
        }
    }
}

criterion_group!(benches, maze_bench);
criterion_main!(benches);
