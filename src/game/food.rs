use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::grid::{GridSpec, Position};

/// Uniform draws tried before falling back to enumerating free cells.
const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Picks food cells uniformly from the free part of the grid.
pub struct FoodPlacer {
    rng: StdRng,
}

impl FoodPlacer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic placer, mostly useful in tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a free cell, or `None` when `occupied` covers the whole grid.
    ///
    /// Rejection sampling handles the common sparse case; once the draws run
    /// out the free cells are enumerated, so a crowded grid still terminates.
    pub fn place(&mut self, grid: &GridSpec, occupied: &HashSet<Position>) -> Option<Position> {
        if occupied.len() < grid.area() {
            for _ in 0..MAX_REJECTION_ATTEMPTS {
                let pos = Position::new(
                    self.rng.gen_range(0..grid.rows()) as i32,
                    self.rng.gen_range(0..grid.cols()) as i32,
                );
                if !occupied.contains(&pos) {
                    return Some(pos);
                }
            }
        }

        let free: Vec<Position> = grid.cells().filter(|pos| !occupied.contains(pos)).collect();
        free.choose(&mut self.rng).copied()
    }
}

impl Default for FoodPlacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_lands_in_grid_and_off_snake() {
        let grid = GridSpec::new(10, 10).unwrap();
        let occupied: HashSet<_> = (0..10).map(|col| Position::new(2, col)).collect();
        let mut placer = FoodPlacer::seeded(7);

        for _ in 0..200 {
            let food = placer.place(&grid, &occupied).unwrap();
            assert!(grid.contains(food));
            assert!(!occupied.contains(&food));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let grid = GridSpec::new(4, 4).unwrap();
        let hole = Position::new(3, 1);
        let occupied: HashSet<_> = grid.cells().filter(|p| *p != hole).collect();
        let mut placer = FoodPlacer::seeded(1);

        assert_eq!(placer.place(&grid, &occupied), Some(hole));
    }

    #[test]
    fn test_full_grid_yields_none() {
        let grid = GridSpec::new(3, 3).unwrap();
        let occupied: HashSet<_> = grid.cells().collect();
        let mut placer = FoodPlacer::seeded(1);

        assert_eq!(placer.place(&grid, &occupied), None);
    }

    #[test]
    fn test_food_stays_on_widest_grid() {
        let grid = GridSpec::new(1, i32::MAX as usize).unwrap();
        let occupied = HashSet::new();
        let mut placer = FoodPlacer::seeded(5);

        for _ in 0..100 {
            let food = placer.place(&grid, &occupied).unwrap();
            assert!(grid.contains(food));
        }
    }

    #[test]
    fn test_seeded_placers_agree() {
        let grid = GridSpec::new(10, 10).unwrap();
        let occupied = HashSet::new();
        let mut a = FoodPlacer::seeded(42);
        let mut b = FoodPlacer::seeded(42);

        for _ in 0..20 {
            assert_eq!(a.place(&grid, &occupied), b.place(&grid, &occupied));
        }
    }
}
