use crate::hex::{HexPoint, HexPointSet};
use derive_more::{Display, From, Into};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Identifies a unit. Units themselves live in whatever engine is rendering
/// them; the board only tracks which cell each one is standing on.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display(fmt = "#{}", _0)]
pub struct UnitId(pub u32);

/// A discrete, already-resolved pick from the input layer. By the time a pick
/// gets here, the input layer has already figured out whether the user hit a
/// cell or a unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PickEvent {
    /// The user picked a cell
    Cell(HexPoint),
    /// The user picked a unit, which is currently at the given world position.
    /// The unit's cell is derived from that position, so units that have been
    /// moved around outside the board are picked up wherever they are now.
    Unit {
        unit: UnitId,
        world_position: Point3<f64>,
    },
}

/// The state of the pick-driven selection flow. The board starts out
/// [Idle](Self::Idle), and returns to it after every committed or cancelled
/// move, and whenever a new grid is placed.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionState {
    /// Nothing is selected. Picking a cell just inspects it.
    Idle,
    /// A unit is selected, and waiting for a destination
    UnitSelected {
        unit: UnitId,
        /// The cell the unit was standing on when it was selected
        origin: HexPoint,
        /// The cells the unit can move to. Only these are valid destinations,
        /// anything else cancels the selection.
        highlighted: HexPointSet,
    },
}

impl SelectionState {
    /// The currently selected unit, if any
    pub fn selected_unit(&self) -> Option<UnitId> {
        match self {
            Self::Idle => None,
            Self::UnitSelected { unit, .. } => Some(*unit),
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// The set of cells the renderer should highlight. There are two flavors of
/// highlight, which are expected to be drawn differently:
///
/// - The focus: a single cell that was inspected, or the cell under the
///   selected unit
/// - Move targets: every cell the selected unit could move to
///
/// The focus is never also a move target.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Highlights {
    focus: Option<HexPoint>,
    move_targets: HexPointSet,
}

impl Highlights {
    /// Highlight a single cell
    pub(crate) fn single(position: HexPoint) -> Self {
        Self {
            focus: Some(position),
            move_targets: HexPointSet::default(),
        }
    }

    /// Highlight a unit's cell plus everywhere it could move
    pub(crate) fn movement(
        origin: HexPoint,
        mut move_targets: HexPointSet,
    ) -> Self {
        move_targets.remove(&origin);
        Self {
            focus: Some(origin),
            move_targets,
        }
    }

    pub fn focused(&self) -> Option<HexPoint> {
        self.focus
    }

    pub fn move_targets(&self) -> &HexPointSet {
        &self.move_targets
    }

    pub fn is_empty(&self) -> bool {
        self.focus.is_none() && self.move_targets.is_empty()
    }

    /// Is the given cell highlighted in any way?
    pub fn contains(&self, position: HexPoint) -> bool {
        self.focus == Some(position) || self.move_targets.contains(&position)
    }

    /// Every highlighted cell, focus first
    pub fn cells(&self) -> impl Iterator<Item = HexPoint> + '_ {
        self.focus
            .into_iter()
            .chain(self.move_targets.iter().copied())
    }
}

/// A committed move, for the renderer to apply to the unit's transform
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct UnitMove {
    pub unit: UnitId,
    pub from: HexPoint,
    pub to: HexPoint,
    /// World position of the center of the destination cell
    pub world_position: Point3<f64>,
}

/// Everything the presentation layer needs to do after a pick. Highlights are
/// always the *complete* set to display, i.e. anything not in here should be
/// un-highlighted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PickResult {
    pub highlights: Highlights,
    /// Populated only if the pick committed a move
    pub moved_unit: Option<UnitMove>,
}

impl PickResult {
    /// Serializes this result into JSON, for handing off to an external
    /// renderer.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> String {
        // Panic here indicates an internal bug in the data format
        serde_json::to_string(self).expect("error serializing pick result")
    }
}
