use crate::hex::SQRT_3;
use derive_more::Display;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::ops;
use strum::{EnumIter, IntoEnumIterator};

/// A cell in a hexagon-tiled board, in axial coordinates. See the module-level
/// docs for how the coordinate system works.
///
/// This struct only stores `q` and `r`, since `q + r + s = 0` for all points,
/// so `s` can be derived as necessary. Two points are equal iff their `q` and
/// `r` match.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
// s is widened so that points near the edge of the i32 range still print
#[display(
    fmt = "({}, {}, {})",
    "self.q",
    "self.r",
    "-(i64::from(self.q) + i64::from(self.r))"
)]
pub struct HexPoint {
    q: i32,
    r: i32,
}

impl HexPoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Construct a new hex point with the given q and r. Since q+r+s=0 for all
    /// points, s is derived from the other two. Any `q` and `r` are accepted,
    /// but arithmetic on the point ([Self::s], [Self::distance_to], offsets)
    /// assumes `|q + r|` and the deltas to other points fit in an `i32`.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn s(&self) -> i32 {
        -(self.q + self.r)
    }

    /// Number of steps between this cell and another. This is computed in cube
    /// space as `(|Δq| + |Δr| + |Δs|) / 2`. The division is always exact,
    /// because the deltas also sum to zero.
    pub fn distance_to(&self, other: HexPoint) -> u32 {
        (*self - other).length()
    }

    /// Get an iterator of all the points directly adjacent to this one. The
    /// iterator will always contain exactly 6 values.
    pub fn adjacents(self) -> impl Iterator<Item = HexPoint> {
        HexDirection::iter().map(move |dir| self + dir.vec())
    }

    /// Project this cell's center into world space for a board of the given
    /// cell size, relative to the board's origin. The board is flat, so `y` is
    /// always zero.
    pub fn to_world(self, size: f64) -> Point3<f64> {
        let q = f64::from(self.q);
        let r = f64::from(self.r);
        Point3::new(
            size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
            0.0,
            size * (3.0 / 2.0 * r),
        )
    }

    /// Round fractional axial coordinates to the cell that contains them. The
    /// naive approach (rounding `q` and `r` independently) picks the wrong cell
    /// near corners, so instead we round all three cube components and then
    /// recompute whichever one drifted furthest from its original value.
    ///
    /// https://www.redblobgames.com/grids/hexagons/#rounding
    pub fn round(q: f64, r: f64) -> Self {
        let s = -q - r;
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let dq = (rq - q).abs();
        let dr = (rr - r).abs();
        let ds = (rs - s).abs();
        if dq > dr && dq > ds {
            rq = -rr - rs;
        } else if dr > ds {
            rr = -rq - rs;
        }
        Self::new(rq as i32, rr as i32)
    }
}

impl ops::Add<HexVec> for HexPoint {
    type Output = HexPoint;

    fn add(self, rhs: HexVec) -> Self::Output {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl ops::Sub for HexPoint {
    type Output = HexVec;

    fn sub(self, rhs: HexPoint) -> Self::Output {
        HexVec::new(self.q - rhs.q, self.r - rhs.r)
    }
}

/// An offset between two cells. This is the same shape as a [HexPoint] (and
/// q+r+s=0 holds here too), but keeping points and vectors as separate types
/// makes it a bit clearer when shifting points around.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HexVec {
    q: i32,
    r: i32,
}

impl HexVec {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Number of single-cell steps this vector spans
    pub fn length(&self) -> u32 {
        let s = -(self.q + self.r);
        (self.q.unsigned_abs() + self.r.unsigned_abs() + s.unsigned_abs()) / 2
    }
}

/// The 6 directions in which cells line up side-to-side. Compass names assume
/// `+z` is north (see the module-level diagram).
#[derive(Copy, Clone, Debug, EnumIter, PartialEq, Eq, Hash)]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    /// Get a vector offset that would move a point one cell in this direction
    pub fn vec(self) -> HexVec {
        match self {
            Self::East => HexVec::new(1, 0),
            Self::NorthEast => HexVec::new(0, 1),
            Self::NorthWest => HexVec::new(-1, 1),
            Self::West => HexVec::new(-1, 0),
            Self::SouthWest => HexVec::new(0, -1),
            Self::SouthEast => HexVec::new(1, -1),
        }
    }
}
