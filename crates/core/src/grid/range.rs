//! Movement range calculation. Range here is pure hex distance: there are no
//! obstacles or terrain costs, so every cell within the budget counts,
//! regardless of what's between it and the origin.

use crate::{
    grid::HexGrid,
    hex::{HexPoint, HexPointSet},
};

/// Get every cell on the grid that is at least 1 and at most `budget` steps
/// away from `origin`. The origin itself is never included, so a budget of 0
/// always gives an empty set. The origin doesn't need to be on the grid.
///
/// This is a straight filter over every cell in the grid, which is fine
/// because grids are small.
pub fn reachable(grid: &HexGrid, origin: HexPoint, budget: u32) -> HexPointSet {
    grid.cells()
        .map(|cell| cell.position())
        .filter(|position| {
            let distance = origin.distance_to(*position);
            distance > 0 && distance <= budget
        })
        .collect()
}
