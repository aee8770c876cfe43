//! Random placement of the single food item.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_grid_core::{CellCoord, Grid};

/// Picks uniformly random cells for food.
///
/// Cells occupied by the snake are not excluded, so food can appear on the
/// body and only becomes edible once the head reaches it.
#[derive(Clone, Debug)]
pub(crate) struct FoodSpawner {
    rng: ChaCha8Rng,
}

impl FoodSpawner {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub(crate) fn spawn(&mut self, grid: &Grid) -> CellCoord {
        let column = self.rng.gen_range(0..grid.columns());
        let row = self.rng.gen_range(0..grid.rows());
        CellCoord::new(column, row)
    }
}
