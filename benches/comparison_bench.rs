use criterion::{criterion_group, criterion_main, Criterion};
use grid_pathtrace::{
    AlgorithmKind, CellState, Grid, MapBuffer, Movement, NoOpCellObserver, Point, RunConfig,
    RunController, UpdateMode,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N: usize = 64;

fn random_map(rng: &mut StdRng) -> MapBuffer {
    let mut buffer = MapBuffer::new(N, N);
    for x in 0..N as i32 {
        for y in 0..N as i32 {
            if rng.gen_bool(0.3) {
                buffer.paint(Point::new(x, y), CellState::Wall);
            }
        }
    }
    buffer.paint(Point::new(0, 0), CellState::Start);
    buffer.paint(Point::new(N as i32 - 1, N as i32 - 1), CellState::End);
    buffer
}

fn strategy_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let buffer = random_map(&mut rng);
    for movement in [Movement::FourDirectional, Movement::EightDirectional] {
        let diag_str = match movement {
            Movement::FourDirectional => "4-grid",
            Movement::EightDirectional => "8-grid",
        };
        for (algorithm, name) in [
            (AlgorithmKind::UniformCost, "Dijkstra"),
            (AlgorithmKind::Heuristic, "Astar"),
        ] {
            let grid = Grid::from_source(&buffer, movement, false).unwrap();
            let config = RunConfig {
                algorithm,
                update_mode: UpdateMode::Immediate,
                movement,
                corner_cutting: false,
            };
            c.bench_function(format!("{name}, {diag_str}").as_str(), |b| {
                b.iter(|| {
                    let mut controller = RunController::new(grid.clone(), &config).unwrap();
                    black_box(controller.run(&mut NoOpCellObserver).unwrap());
                })
            });
        }
    }
}

criterion_group!(benches, strategy_bench);
criterion_main!(benches);
