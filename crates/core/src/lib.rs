//! Hexmove is the logic core of a tabletop-style hex grid: it generates a
//! hexagonal board anchored at some world location, computes how far a unit
//! can move, and runs the pick-driven selection flow that turns taps into
//! highlights and committed moves. Rendering, input polling and surface
//! detection live elsewhere; this crate only tells the presentation layer
//! *what* to show.
//!
//! ```
//! use hexmove::{Board, BoardConfig, HexPoint, PickEvent, Point3, UnitId};
//!
//! let mut board = Board::new(BoardConfig::default()).unwrap();
//! board.place_grid(Point3::origin(), 4, 0.5).unwrap();
//! let unit = UnitId(0);
//! let unit_position = board.spawn_unit(unit, HexPoint::ORIGIN).unwrap();
//!
//! // Select the unit, then move it one tile over
//! let result = board.pick(PickEvent::Unit {
//!     unit,
//!     world_position: unit_position,
//! });
//! assert_eq!(result.highlights.move_targets().len(), 36);
//! let result = board.pick(PickEvent::Cell(HexPoint::new(1, 0)));
//! assert_eq!(result.moved_unit.unwrap().to, HexPoint::new(1, 0));
//! ```
//!
//! See [BoardConfig] for details on how the board can be customized.

mod board;
mod config;
mod error;
pub mod grid;
pub mod hex;
mod util;

pub use crate::{
    board::{
        Board, Highlights, PickEvent, PickResult, SelectionState, UnitId,
        UnitMove,
    },
    config::{BoardConfig, GridConfig},
    error::{Error, Result},
    grid::{HexCell, HexGrid},
    hex::{HexLayout, HexPoint, HexPointSet},
};
/// World positions are plain nalgebra points, re-exported so callers don't
/// need to depend on nalgebra themselves.
pub use nalgebra::Point3;
