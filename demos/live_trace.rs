use grid_pathtrace::{
    AlgorithmKind, CellObserver, CellRole, CellState, Grid, MapBuffer, Movement, Point, RunConfig,
    RunController, RunStatus, UpdateMode,
};

// Drives a live-mode run from a plain synchronous loop, repainting an ASCII
// frame after every expansion the way a windowing shell would repaint its
// canvas between ticks.

struct AsciiCanvas {
    frame: Vec<Vec<char>>,
}

impl AsciiCanvas {
    fn new(grid: &Grid) -> AsciiCanvas {
        let frame = (0..grid.height() as i32)
            .map(|y| {
                (0..grid.width() as i32)
                    .map(|x| match grid.state_at(Point::new(x, y)) {
                        CellState::Wall => '#',
                        CellState::Start => 'S',
                        CellState::End => 'E',
                        CellState::Empty => '.',
                    })
                    .collect()
            })
            .collect();
        AsciiCanvas { frame }
    }

    fn print(&self) {
        for row in &self.frame {
            println!("{}", row.iter().collect::<String>());
        }
        println!();
    }
}

impl CellObserver for AsciiCanvas {
    fn cell_changed(&mut self, cell: Point, role: CellRole) {
        let glyph = match role {
            CellRole::Unvisited => '.',
            CellRole::Frontier => 'o',
            CellRole::Visited => 'x',
            CellRole::Path => '*',
        };
        let current = &mut self.frame[cell.y as usize][cell.x as usize];
        // Keep the markers readable.
        if *current != 'S' && *current != 'E' {
            *current = glyph;
        }
    }

    fn path_found(&mut self, path: &[Point], cost: i32) {
        println!(
            "Found a {}-move path (cost {}).",
            path.len() - 1,
            cost
        );
    }

    fn search_failed(&mut self) {
        println!("No path exists.");
    }
}

fn main() {
    let mut surface = MapBuffer::new(8, 6);
    surface.paint(Point::new(0, 0), CellState::Start);
    surface.paint(Point::new(7, 5), CellState::End);
    for y in 0..5 {
        surface.paint(Point::new(3, y), CellState::Wall);
    }
    for y in 1..6 {
        surface.paint(Point::new(5, y), CellState::Wall);
    }

    let config = RunConfig {
        algorithm: AlgorithmKind::Heuristic,
        update_mode: UpdateMode::Live,
        movement: Movement::FourDirectional,
        corner_cutting: false,
    };
    let grid = Grid::from_source(&surface, config.movement, config.corner_cutting).unwrap();
    let mut controller = RunController::new(grid.clone(), &config).unwrap();
    let mut canvas = AsciiCanvas::new(&grid);

    // The host event loop: one expansion per iteration, repaint in between.
    loop {
        let status = controller.tick(&mut canvas).unwrap();
        canvas.print();
        if status != RunStatus::InProgress {
            println!("Finished with {:?} after {} expansions.", status, controller.expansions());
            break;
        }
    }
}
