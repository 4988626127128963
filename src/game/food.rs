use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use super::grid::{Grid, Segment};
use super::snake::Snake;

/// Random draws tried before falling back to a full scan of the board
pub const SAMPLE_ATTEMPTS: usize = 32;

/// Chooses where the next piece of food goes
pub trait CellPicker {
    /// A free cell chosen uniformly at random, or `None` when the board is full
    fn pick(&mut self, grid: Grid, snake: &Snake) -> Option<Segment>;
}

/// Sample-then-scan picker.
///
/// Sampling is fast on a sparse board; the scan guarantees an answer on a
/// nearly full one.
pub struct RandomCellPicker<R: Rng> {
    rng: R,
}

impl RandomCellPicker<ThreadRng> {
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomCellPicker<StdRng> {
    /// Deterministic picker for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomCellPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn sample(&mut self, grid: Grid) -> Segment {
        let row = self.rng.gen_range(1..=grid.rows() as i32);
        let col = self.rng.gen_range(1..=grid.cols() as i32);
        Segment::new(row, col)
    }
}

impl<R: Rng> CellPicker for RandomCellPicker<R> {
    fn pick(&mut self, grid: Grid, snake: &Snake) -> Option<Segment> {
        for _ in 0..SAMPLE_ATTEMPTS {
            let cell = self.sample(grid);
            if !snake.occupies(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Segment> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();
        if free.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..free.len());
        Some(free[index])
    }
}
