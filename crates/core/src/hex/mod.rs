//! This module holds basic types and data structures related to hexagon grids.
//!
//! ## Coordinate Systems
//!
//! Hexmove uses two different coordinate systems:
//!
//! ### Hex Coordinates
//!
//! Hex coordinates identify a cell on the board. We use the [axial/cube
//! coordinate system defined by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube):
//! each cell has three integer components `q`, `r` and `s` with
//! **`q + r + s = 0`**. Because of that constraint only `q` and `r` are
//! stored; `s` is always derived. Three components make the math (distance,
//! rounding, range) symmetric and simple, even though the board itself is
//! flat.
//!
//! **In that page's vernacular, we use "pointy topped" cells.**
//!
//! ### World Coordinates
//!
//! World coordinates are continuous 3D positions in whatever scene the board
//! is placed into. The board lies flat on the `y = 0` plane relative to its
//! origin, so only `x` and `z` are ever affected by a hex coordinate:
//!
//! ```text
//! +-------------------+
//! |        +z         |
//! |         ^         |
//! |         |         |
//! | -x <----o----> +x |
//! |         |         |
//! |         v         |
//! |        -z         |
//! +-------------------+
//! ```
//!
//! `o` is cell `(0, 0, 0)`, sitting exactly at the board's origin. Moving
//! `+1` in `q` moves `√3 · size` along `x`; moving `+1` in `r` moves
//! `√3/2 · size` along `x` and `3/2 · size` along `z`. See [HexLayout] for
//! both directions of the conversion.

mod layout;
mod point;

pub use self::{layout::*, point::*};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// A set of hex points
pub type HexPointSet = HashSet<HexPoint, FnvBuildHasher>;
/// A map of hex points to some `T`
pub type HexPointMap<T> = HashMap<HexPoint, T, FnvBuildHasher>;
/// An ORDERED map of hex points to some `T`. This has some extra memory
/// overhead, so we should only use it when we actually need the ordering.
pub type HexPointIndexMap<T> = IndexMap<HexPoint, T, FnvBuildHasher>;

/// √3, which shows up all over hex geometry. `f64::consts::SQRT_3` isn't
/// stable yet.
pub(crate) const SQRT_3: f64 = 1.732_050_807_568_877_2;
