use grid_pathtrace::{
    AlgorithmKind, CellState, Grid, MapBuffer, Movement, NoOpCellObserver, Point, RunConfig,
    RunController, UpdateMode,
};

// In this demo a path is found on a 3x3 map with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighborhood and the run publishes once, at the end.

fn main() {
    let mut surface = MapBuffer::new(3, 3);
    surface.paint(Point::new(0, 0), CellState::Start);
    surface.paint(Point::new(1, 1), CellState::Wall);
    surface.paint(Point::new(2, 2), CellState::End);

    let config = RunConfig {
        algorithm: AlgorithmKind::Heuristic,
        update_mode: UpdateMode::Immediate,
        movement: Movement::FourDirectional,
        corner_cutting: false,
    };
    let grid = Grid::from_source(&surface, config.movement, config.corner_cutting).unwrap();
    println!("{}", grid);
    let mut controller = RunController::new(grid, &config).unwrap();
    let status = controller.run(&mut NoOpCellObserver).unwrap();
    println!("Run finished: {:?}", status);
    println!("Path:");
    for p in controller.path().unwrap() {
        println!("{:?}", p);
    }
}
