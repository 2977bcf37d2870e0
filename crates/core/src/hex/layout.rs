use crate::{
    config::validate_hex_size,
    hex::{HexPoint, SQRT_3},
    Result,
};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Maps between hex coordinates and world space for one placed board. A
/// layout is just the board's world origin (where cell `(0, 0, 0)` sits) plus
/// the size of each cell, measured from a cell's center to any of its
/// vertices.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    origin: Point3<f64>,
    size: f64,
}

impl HexLayout {
    /// Create a new layout. Returns an error if `size` isn't a positive,
    /// finite number.
    pub fn new(origin: Point3<f64>, size: f64) -> Result<Self> {
        validate_hex_size(size)?;
        Ok(Self { origin, size })
    }

    /// World position of cell `(0, 0, 0)`
    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// Distance from a cell's center to one of its vertices, in world units
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Distance from a cell's center to the midpoint of one of its sides.
    /// Circles of this radius around two adjacent cells touch but never
    /// overlap, which makes it a safe tolerance for
    /// [HexGrid::nearest_cell](crate::HexGrid::nearest_cell).
    pub fn inner_radius(&self) -> f64 {
        self.size * SQRT_3 / 2.0
    }

    /// Get the world position of a cell's center
    pub fn hex_to_world(&self, point: HexPoint) -> Point3<f64> {
        self.origin + point.to_world(self.size).coords
    }

    /// Get the cell that contains a world position. The vertical (`y`)
    /// component is ignored, i.e. anything above or below a cell counts as
    /// being in that cell. The returned point may not exist on any particular
    /// grid; it's up to the caller to check that.
    ///
    /// Returns `None` if the position isn't finite, or is so far away that its
    /// cell can't be represented.
    pub fn world_to_hex(&self, position: Point3<f64>) -> Option<HexPoint> {
        // Invert the projection in HexPoint::to_world
        let offset = position - self.origin;
        let q = (SQRT_3 / 3.0 * offset.x - offset.z / 3.0) / self.size;
        let r = (2.0 / 3.0 * offset.z) / self.size;
        // `as i32` saturates, and turns NaN into 0
        let limit = f64::from(i32::MAX / 2);
        if q.abs() < limit && r.abs() < limit {
            Some(HexPoint::round(q, r))
        } else {
            None
        }
    }
}
