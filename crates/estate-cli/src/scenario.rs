//! Random estate layouts for demos and load checks.

use estate_core::{Cell, EstateGrid, HeightMap, MAX_TREE_HEIGHT_M};
use rand::Rng;
use std::collections::HashSet;

/// One tree to plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Planting {
    pub x: i64,
    pub y: i64,
    pub height: i64,
}

/// Pick up to `count` distinct plots of the grid and give each a valid height.
pub fn random_plantings<R: Rng + ?Sized>(
    rng: &mut R,
    grid: EstateGrid,
    count: usize,
) -> Vec<Planting> {
    let target = grid.cell_count().min(count as u64) as usize;
    let mut taken = HashSet::with_capacity(target);
    let mut cells = Vec::with_capacity(target);
    while cells.len() < target {
        let cell = Cell::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.length()),
        );
        if taken.insert(cell) {
            cells.push(cell);
        }
    }

    cells
        .into_iter()
        .map(|cell| Planting {
            x: i64::from(cell.x),
            y: i64::from(cell.y),
            height: rng.random_range(1..MAX_TREE_HEIGHT_M),
        })
        .collect()
}

/// Height map matching what the server will hold after `plantings`.
pub fn height_map(grid: EstateGrid, plantings: &[Planting]) -> HeightMap {
    let mut map = HeightMap::new(grid);
    for planting in plantings {
        if let Ok(cell) = grid.cell(planting.x, planting.y) {
            map.set(cell, planting.height as u32);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::{flight_distance, PlannerConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn plantings_are_distinct_and_valid() {
        let grid = EstateGrid::new(6, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let plantings = random_plantings(&mut rng, grid, 10);

        assert_eq!(plantings.len(), 10);
        let plots: HashSet<_> = plantings.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(plots.len(), 10);
        for p in &plantings {
            assert!(grid.contains(p.x, p.y));
            assert!((1..MAX_TREE_HEIGHT_M).contains(&p.height));
        }
    }

    #[test]
    fn count_is_capped_by_plot_count() {
        let grid = EstateGrid::new(2, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_plantings(&mut rng, grid, 50).len(), 4);
    }

    #[test]
    fn huge_estates_only_cost_the_trees_planted() {
        let side = estate_core::MAX_ESTATE_SIDE;
        let grid = EstateGrid::new(side, side).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let plantings = random_plantings(&mut rng, grid, 5);
        assert_eq!(plantings.len(), 5);
        assert!(plantings.iter().all(|p| grid.contains(p.x, p.y)));
    }

    #[test]
    fn height_map_feeds_the_planner() {
        let grid = EstateGrid::new(1, 3).unwrap();
        let map = height_map(grid, &[Planting { x: 0, y: 1, height: 9 }]);
        assert_eq!(flight_distance(&map, &PlannerConfig::default()), 22);
    }
}
