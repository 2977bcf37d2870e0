//! Generated hex grids and the cells that make them up.

pub mod range;

use crate::{
    board::UnitId,
    config::GridConfig,
    hex::{HexLayout, HexPoint, HexPointIndexMap},
    timed, Error, Result,
};
use fnv::FnvBuildHasher;
use log::info;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single cell of a [HexGrid]. Cells can't be constructed directly, only by
/// grid generation, and they live exactly as long as the grid that made them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    /// Location of this cell within the grid. Every cell in a grid has a
    /// unique position.
    position: HexPoint,

    /// World position of this cell's center. Computed once at generation,
    /// since the grid's layout can never change afterwards.
    world_position: Point3<f64>,

    /// The unit standing on this cell, if any
    occupant: Option<UnitId>,
}

impl HexCell {
    pub fn position(&self) -> HexPoint {
        self.position
    }

    pub fn world_position(&self) -> Point3<f64> {
        self.world_position
    }

    pub fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }
}

/// A flat grid of hex cells, in a super hexagon pattern (the cells make up the
/// shape of a larger hexagon). For a grid of radius `r`, the furthest cells
/// are all `r` steps from the center, and there are always `3r² + 3r + 1`
/// cells in total.
///
/// Cells are stored in generation order (ascending `q`, then ascending `r`),
/// so any iteration over a grid is deterministic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HexGrid {
    radius: i32,
    layout: HexLayout,
    /// Serialize as a vec because hex points can't be JSON keys
    #[serde(with = "serde_cells")]
    cells: HexPointIndexMap<HexCell>,
}

impl HexGrid {
    /// Generate a new grid of the given radius, with cells of the given size,
    /// centered on `origin`. Returns an error if the radius is negative or
    /// larger than [GridConfig::MAX_RADIUS], or the size isn't a positive,
    /// finite number.
    ///
    /// The grid is always fully built before being returned, so a caller that
    /// swaps it in for an old grid never exposes a half-generated one.
    pub fn generate(
        radius: i32,
        size: f64,
        origin: Point3<f64>,
    ) -> Result<Self> {
        Self::from_config(
            origin,
            &GridConfig {
                radius,
                hex_size: size,
            },
        )
    }

    /// Generate a new grid from a config. See [Self::generate].
    pub fn from_config(origin: Point3<f64>, config: &GridConfig) -> Result<Self> {
        config.validate()?;
        let layout = HexLayout::new(origin, config.hex_size)?;
        let radius = config.radius;

        let cells = timed!("Grid generation", {
            let capacity = grid_len(radius);
            let mut cells = HexPointIndexMap::with_capacity_and_hasher(
                capacity,
                FnvBuildHasher::default(),
            );

            for q in -radius..=radius {
                for r in -radius..=radius {
                    let position = HexPoint::new(q, r);
                    // If we kept the whole [-r,r]² square we'd end up with a
                    // rhombus instead of a super hexagon. The sum of all three
                    // cube components is twice the distance from the center
                    let cube_sum = position.q().abs()
                        + position.r().abs()
                        + position.s().abs();
                    if cube_sum <= radius * 2 {
                        cells.insert(
                            position,
                            HexCell {
                                position,
                                world_position: layout.hex_to_world(position),
                                occupant: None,
                            },
                        );
                    }
                }
            }

            debug_assert_eq!(cells.len(), capacity, "expected 3r²+3r+1 cells");
            cells
        });

        info!(
            "Generated grid with {} cells (radius {}) at {}",
            cells.len(),
            radius,
            origin
        );
        Ok(Self {
            radius,
            layout,
            cells,
        })
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// The layout used to position this grid's cells in the world
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// Get the number of cells in the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A grid always has at least one cell, so this is always `false`. It's
    /// only here to keep clippy happy about `len`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, position: HexPoint) -> bool {
        self.cells.contains_key(&position)
    }

    /// Get the cell at a position, if it's on the grid
    pub fn get(&self, position: HexPoint) -> Option<&HexCell> {
        self.cells.get(&position)
    }

    /// Iterate over all cells, in generation order
    pub fn cells(&self) -> impl Iterator<Item = &HexCell> {
        self.cells.values()
    }

    /// Find the first cell (in generation order) whose center is strictly
    /// closer than `tolerance` to the given world position. This is a linear
    /// scan, so prefer [Self::cell_at_world] for hot paths.
    ///
    /// If `tolerance` is larger than [HexLayout::inner_radius], the tolerance
    /// circles of adjacent cells overlap, and a position in the overlap will
    /// match whichever of those cells was generated first.
    pub fn nearest_cell(
        &self,
        world_position: Point3<f64>,
        tolerance: f64,
    ) -> Option<&HexCell> {
        self.cells().find(|cell| {
            nalgebra::distance(&cell.world_position, &world_position)
                < tolerance
        })
    }

    /// Get the cell containing a world position (ignoring height), if any.
    /// Unlike [Self::nearest_cell], this is a constant-time lookup and every
    /// position inside a cell's hexagon matches, not just those near its
    /// center. Non-finite positions never match.
    pub fn cell_at_world(&self, world_position: Point3<f64>) -> Option<&HexCell> {
        self.get(self.layout.world_to_hex(world_position)?)
    }

    /// Put a unit on a cell. Fails if the cell doesn't exist or is held by a
    /// different unit. Doesn't touch any other cell the unit may be on.
    pub(crate) fn set_occupant(
        &mut self,
        position: HexPoint,
        unit: UnitId,
    ) -> Result<()> {
        let cell = self
            .cells
            .get_mut(&position)
            .ok_or(Error::UnknownCell(position))?;
        match cell.occupant {
            Some(occupant) if occupant != unit => {
                Err(Error::CellOccupied { position, occupant })
            }
            _ => {
                cell.occupant = Some(unit);
                Ok(())
            }
        }
    }

    /// Remove whatever unit is on a cell. Does nothing for unknown cells.
    pub(crate) fn clear_occupant(&mut self, position: HexPoint) {
        if let Some(cell) = self.cells.get_mut(&position) {
            cell.occupant = None;
        }
    }
}

/// Calculate the size of a grid (the number of cells it contains) based on
/// its radius. Radius 0 means 1 cell, 1 is 7 cells, 2 is 19, etc.
pub fn grid_len(radius: i32) -> usize {
    // We'll always have 3r^2+3r+1 cells (a reduction of a geometric sum).
    // f(0) = 1, and we add 6r cells for every step after that, so:
    // 1, (+6) 7, (+12) 19, (+18) 37, ...
    let r = radius.max(0) as usize;
    3 * r * r + 3 * r + 1
}

/// Serialize the cell map as a flat list of cells. Each cell already knows its
/// own position, so the keys can be rebuilt on the way back in.
mod serde_cells {
    use super::HexCell;
    use crate::hex::HexPointIndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        cells: &HexPointIndexMap<HexCell>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(cells.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HexPointIndexMap<HexCell>, D::Error> {
        let cells: Vec<HexCell> = Vec::deserialize(deserializer)?;
        Ok(cells.into_iter().map(|cell| (cell.position, cell)).collect())
    }
}
