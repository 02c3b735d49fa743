use std::collections::HashSet;

use log::trace;
use rand::Rng;

use crate::grid::{Cell, Grid};

/// Pick a random cell of `grid` that is not in `occupied`.
///
/// Samples at random first; if that keeps hitting occupied cells the free
/// cells are enumerated and one is chosen uniformly. Returns `None` only when
/// every cell is occupied.
pub fn place_food<R: Rng + ?Sized>(
    grid: &Grid,
    occupied: &HashSet<Cell>,
    rng: &mut R,
) -> Option<Cell> {
    // Small grids fill up quickly; don't spin on them.
    let max_attempts = grid.cell_count().saturating_mul(2).max(8);

    for _ in 0..max_attempts {
        let cell = grid.random_cell(rng);
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = grid.cells().filter(|c| !occupied.contains(c)).collect();
    trace!(
        "food sampling exhausted {max_attempts} attempts, {} free cells left",
        free.len()
    );
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn never_lands_on_occupied_cells() {
        let grid = Grid::new(4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let occupied: HashSet<Cell> = grid.cells().take(12).collect();
        for _ in 0..200 {
            let food = place_food(&grid, &occupied, &mut rng).unwrap();
            assert!(grid.is_valid(food));
            assert!(!occupied.contains(&food));
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        let grid = Grid::new(6).unwrap();
        let last = Cell::new(2, -1);
        let occupied: HashSet<Cell> = grid.cells().filter(|&c| c != last).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(place_food(&grid, &occupied, &mut rng), Some(last));
    }

    #[test]
    fn full_board_yields_none() {
        let grid = Grid::new(3).unwrap();
        let occupied: HashSet<Cell> = grid.cells().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(place_food(&grid, &occupied, &mut rng), None);
    }
}
