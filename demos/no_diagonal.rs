use grid_pathtrace::{
    cost_as_steps, AlgorithmKind, CellState, Grid, MapBuffer, Movement, NoOpCellObserver, Point,
    RunConfig, RunController, UpdateMode,
};

// Runs the same map under both movement models to show how the neighborhood
// changes the result: the diagonal run takes fewer, costlier steps.

fn main() {
    let mut surface = MapBuffer::new(5, 5);
    surface.paint(Point::new(0, 0), CellState::Start);
    surface.paint(Point::new(4, 4), CellState::End);
    surface.paint(Point::new(2, 1), CellState::Wall);
    surface.paint(Point::new(2, 2), CellState::Wall);
    surface.paint(Point::new(2, 3), CellState::Wall);

    for movement in [Movement::FourDirectional, Movement::EightDirectional] {
        let config = RunConfig {
            algorithm: AlgorithmKind::UniformCost,
            update_mode: UpdateMode::Immediate,
            movement,
            corner_cutting: false,
        };
        let grid = Grid::from_source(&surface, config.movement, config.corner_cutting).unwrap();
        let mut controller = RunController::new(grid, &config).unwrap();
        controller.run(&mut NoOpCellObserver).unwrap();
        let path = controller.path().unwrap();
        println!("{:?}:", movement);
        println!(
            "  {} moves, cost {:.2} straight-step equivalents",
            path.len() - 1,
            cost_as_steps(controller.path_cost().unwrap())
        );
        println!("  {:?}", path);
    }
}
