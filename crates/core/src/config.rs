use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Configuration that defines the shape of a generated grid. The grid's world
/// origin isn't part of this, because it's only known at placement time.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Distance from the center cell to the edge of the grid, in cells. 0
    /// means a grid of exactly 1 cell, 1 means 7 cells, 2 => 19, etc. Negative
    /// values are rejected.
    pub radius: i32,

    /// Distance from the center of a cell to one of its vertices, in world
    /// units. Must be positive (and finite).
    pub hex_size: f64,
}

impl GridConfig {
    pub const MAX_RADIUS: i32 = 10000;
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: 4,
            hex_size: 0.5,
        }
    }
}

// Implemented by hand because hex_size needs an exclusive lower bound, which
// the range validator can't express
impl Validate for GridConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !(0..=Self::MAX_RADIUS).contains(&self.radius) {
            let mut error = ValidationError::new("range");
            error.add_param(Cow::from("min"), &0);
            error.add_param(Cow::from("max"), &Self::MAX_RADIUS);
            error.add_param(Cow::from("value"), &self.radius);
            errors.add("radius", error);
        }
        if let Some(error) = hex_size_error(self.hex_size) {
            errors.add("hex_size", error);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration for a [Board](crate::Board): grid shape plus the rules of
/// the selection flow.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_pick_tolerance"))]
pub struct BoardConfig {
    /// Shape of every grid placed by the board via
    /// [Board::place_grid_from_config](crate::Board::place_grid_from_config)
    #[validate]
    pub grid: GridConfig,

    /// Maximum number of cells a unit can travel in a single move. 0 means
    /// units can be selected but never moved.
    #[validate(range(min = 0, max = 1000))]
    pub move_budget: u32,

    /// Maximum world distance between a unit and a cell center for the unit to
    /// count as standing on that cell. If unset, this is the inner radius of
    /// a cell (see [HexLayout::inner_radius](crate::HexLayout::inner_radius)).
    /// If this is larger than that, tolerance circles of adjacent cells
    /// overlap, and the first matching cell in generation order wins.
    pub pick_tolerance: Option<f64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            move_budget: 3,
            pick_tolerance: None,
        }
    }
}

fn validate_pick_tolerance(config: &BoardConfig) -> Result<(), ValidationError> {
    match config.pick_tolerance {
        Some(tolerance) if !(tolerance.is_finite() && tolerance > 0.0) => {
            Err(ValidationError::new("pick_tolerance"))
        }
        _ => Ok(()),
    }
}

/// Check that a cell size is usable. Anything non-positive would collapse the
/// grid onto a point (or mirror it), and NaN/infinity poison every position.
pub(crate) fn validate_hex_size(size: f64) -> Result<(), ValidationErrors> {
    match hex_size_error(size) {
        None => Ok(()),
        Some(error) => {
            let mut errors = ValidationErrors::new();
            errors.add("hex_size", error);
            Err(errors)
        }
    }
}

fn hex_size_error(size: f64) -> Option<ValidationError> {
    if size.is_finite() && size > 0.0 {
        None
    } else {
        let mut error = ValidationError::new("positive");
        error.add_param(Cow::from("value"), &size);
        Some(error)
    }
}
