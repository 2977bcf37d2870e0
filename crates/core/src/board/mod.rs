//! The board ties a grid, its units, and the selection flow together. This is
//! the entrypoint for presentation layers: place a grid, feed it picks, and
//! render whatever comes back.

mod selection;

pub use self::selection::*;
use crate::{
    config::BoardConfig,
    grid::{range, HexCell, HexGrid},
    hex::HexPoint,
    Error, Result,
};
use fnv::FnvHashMap;
use log::{debug, info, warn};
use nalgebra::Point3;
use std::mem;
use validator::Validate;

/// The single coordinating object for one hex board. Owns the active grid,
/// the selection state, and a registry of where each unit is.
///
/// Everything here is synchronous, and every mutation takes `&mut self`, so
/// callers with multiple input sources must funnel them into a single stream
/// of picks before handing them over.
#[derive(Clone, Debug)]
pub struct Board {
    config: BoardConfig,
    /// `None` until the first placement
    grid: Option<HexGrid>,
    state: SelectionState,
    highlights: Highlights,
    /// Which cell each known unit is standing on. This is kept in sync with
    /// the occupant of each cell in the grid.
    units: FnvHashMap<UnitId, HexPoint>,
}

impl Board {
    /// Create a new board with no grid. Returns an error if the config is
    /// invalid.
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grid: None,
            state: SelectionState::Idle,
            highlights: Highlights::default(),
            units: FnvHashMap::default(),
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The active grid, if one has been placed
    pub fn grid(&self) -> Option<&HexGrid> {
        self.grid.as_ref()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Everything that should currently be highlighted
    pub fn current_highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Get the cell a unit is standing on, if the board knows about the unit
    pub fn unit_position(&self, unit: UnitId) -> Option<HexPoint> {
        self.units.get(&unit).copied()
    }

    /// Generate a new grid and swap it in for the current one. The selection
    /// is reset and all units are forgotten, since they were standing on cells
    /// that no longer exist. If the arguments are invalid, nothing changes.
    pub fn place_grid(
        &mut self,
        origin: Point3<f64>,
        radius: i32,
        size: f64,
    ) -> Result<&HexGrid> {
        let grid = HexGrid::generate(radius, size, origin)?;
        Ok(self.replace_grid(grid))
    }

    /// [Self::place_grid], but with the grid shape from this board's config
    pub fn place_grid_from_config(
        &mut self,
        origin: Point3<f64>,
    ) -> Result<&HexGrid> {
        let grid = HexGrid::from_config(origin, &self.config.grid)?;
        Ok(self.replace_grid(grid))
    }

    fn replace_grid(&mut self, grid: HexGrid) -> &HexGrid {
        if let Some(unit) = self.state.selected_unit() {
            debug!("Grid replaced, dropping selection of unit {}", unit);
        }
        self.state = SelectionState::Idle;
        self.highlights = Highlights::default();
        self.units.clear();
        self.grid.insert(grid)
    }

    /// Put a unit onto a cell of the current grid, returning the world
    /// position of that cell. If the unit was already on the board, it's
    /// moved (no range check). Fails if there's no grid, the cell doesn't
    /// exist, or another unit is already there.
    pub fn spawn_unit(
        &mut self,
        unit: UnitId,
        position: HexPoint,
    ) -> Result<Point3<f64>> {
        self.relocate_unit(unit, position)?;
        if self.state.selected_unit() == Some(unit) {
            // Its range was computed from where it used to be
            self.reset_selection();
        }
        info!("Spawned unit {} at {}", unit, position);
        self.grid
            .as_ref()
            .map(|grid| grid.layout().hex_to_world(position))
            .ok_or(Error::NoGrid)
    }

    /// Process a pick from the input layer. This is the only way the selection
    /// state changes (aside from grid placement). Picks without a grid are
    /// ignored.
    ///
    /// - Picking a cell with nothing selected highlights just that cell
    /// - Picking a unit selects it, and highlights everywhere it can move.
    ///   This also applies when another unit is already selected; the old
    ///   selection is dropped without moving anything.
    /// - Picking a highlighted cell with a unit selected moves the unit there
    /// - Picking any other cell with a unit selected cancels the selection
    pub fn pick(&mut self, event: PickEvent) -> PickResult {
        if self.grid.is_none() {
            debug!("Ignoring {:?}, no grid has been placed", event);
            return PickResult::default();
        }

        let previous = mem::take(&mut self.state);
        let moved_unit = match (event, previous) {
            (
                PickEvent::Unit {
                    unit,
                    world_position,
                },
                _,
            ) => {
                self.select_unit(unit, world_position);
                None
            }
            (PickEvent::Cell(position), SelectionState::Idle) => {
                self.inspect_cell(position);
                None
            }
            (
                PickEvent::Cell(position),
                SelectionState::UnitSelected {
                    unit,
                    origin,
                    highlighted,
                },
            ) => {
                let moved = if position != origin
                    && highlighted.contains(&position)
                {
                    self.move_unit(unit, origin, position)
                } else {
                    debug!(
                        "Cell {} is not a move target for unit {}, \
                        cancelling selection",
                        position, unit
                    );
                    None
                };
                self.reset_selection();
                moved
            }
        };

        PickResult {
            highlights: self.highlights.clone(),
            moved_unit,
        }
    }

    fn reset_selection(&mut self) {
        self.state = SelectionState::Idle;
        self.highlights = Highlights::default();
    }

    /// Pure inspection: highlight a cell without selecting anything
    fn inspect_cell(&mut self, position: HexPoint) {
        let on_grid = self
            .grid
            .as_ref()
            .map_or(false, |grid| grid.contains(position));
        self.state = SelectionState::Idle;
        self.highlights = if on_grid {
            debug!("Inspecting cell {}", position);
            Highlights::single(position)
        } else {
            debug!("Cell {} is not on the grid", position);
            Highlights::default()
        };
    }

    /// Select a unit and highlight its movement range. The unit's cell is
    /// whichever cell its world position is over. If it isn't over any cell,
    /// the selection is dropped.
    fn select_unit(&mut self, unit: UnitId, world_position: Point3<f64>) {
        self.reset_selection();

        let origin = match self.locate(world_position) {
            Some(origin) => origin,
            None => {
                warn!(
                    "Unit {} at {} is not over any cell, ignoring selection",
                    unit, world_position
                );
                return;
            }
        };
        if let Err(err) = self.relocate_unit(unit, origin) {
            warn!("Can't select unit {}: {}", unit, err);
            return;
        }

        let highlighted = match &self.grid {
            Some(grid) => range::reachable(grid, origin, self.config.move_budget),
            None => return,
        };
        debug!(
            "Selected unit {} at {}, {} cells in range",
            unit,
            origin,
            highlighted.len()
        );
        self.highlights = Highlights::movement(origin, highlighted.clone());
        self.state = SelectionState::UnitSelected {
            unit,
            origin,
            highlighted,
        };
    }

    /// Find the cell under a world position, using the configured tolerance
    fn locate(&self, world_position: Point3<f64>) -> Option<HexPoint> {
        let grid = self.grid.as_ref()?;
        let tolerance = self
            .config
            .pick_tolerance
            .unwrap_or_else(|| grid.layout().inner_radius());
        grid.nearest_cell(world_position, tolerance)
            .map(HexCell::position)
    }

    /// Commit a move that has already been range-checked. Returns `None` if
    /// the destination is held by a different unit.
    fn move_unit(
        &mut self,
        unit: UnitId,
        from: HexPoint,
        to: HexPoint,
    ) -> Option<UnitMove> {
        if let Err(err) = self.relocate_unit(unit, to) {
            debug!("Not moving unit {}: {}", unit, err);
            return None;
        }

        let world_position = self.grid.as_ref()?.layout().hex_to_world(to);
        info!("Moved unit {} from {} to {}", unit, from, to);
        Some(UnitMove {
            unit,
            from,
            to,
            world_position,
        })
    }

    /// Point the registry and the grid at a unit's new cell, vacating its old
    /// one. If this fails, nothing changes.
    fn relocate_unit(&mut self, unit: UnitId, position: HexPoint) -> Result<()> {
        let grid = self.grid.as_mut().ok_or(Error::NoGrid)?;
        grid.set_occupant(position, unit)?;
        if let Some(old) = self.units.insert(unit, position) {
            if old != position {
                grid.clear_occupant(old);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Board with a radius-4 grid at the origin and unit 0 in the center
    fn board() -> (Board, Point3<f64>) {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.place_grid(Point3::origin(), 4, 0.5).unwrap();
        let position = board.spawn_unit(UnitId(0), HexPoint::ORIGIN).unwrap();
        (board, position)
    }

    fn pick_unit(board: &mut Board, world_position: Point3<f64>) -> PickResult {
        board.pick(PickEvent::Unit {
            unit: UnitId(0),
            world_position,
        })
    }

    #[test]
    fn test_pick_without_grid() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        let result = board.pick(PickEvent::Cell(HexPoint::ORIGIN));
        assert_eq!(result, PickResult::default());
        assert!(matches!(
            board.spawn_unit(UnitId(0), HexPoint::ORIGIN),
            Err(Error::NoGrid)
        ));
    }

    #[test]
    fn test_inspect_cell() {
        let (mut board, _) = board();
        let result = board.pick(PickEvent::Cell(HexPoint::new(1, 2)));
        assert_eq!(result.highlights.focused(), Some(HexPoint::new(1, 2)));
        assert!(result.highlights.move_targets().is_empty());
        assert_eq!(board.state(), &SelectionState::Idle);

        // Inspecting replaces the previous highlight
        board.pick(PickEvent::Cell(HexPoint::new(-1, 0)));
        let cells: Vec<HexPoint> = board.current_highlights().cells().collect();
        assert_eq!(cells, vec![HexPoint::new(-1, 0)]);

        // Off the grid clears everything
        let result = board.pick(PickEvent::Cell(HexPoint::new(9, 0)));
        assert!(result.highlights.is_empty());
    }

    #[test]
    fn test_select_unit() {
        let (mut board, position) = board();
        let result = pick_unit(&mut board, position);
        assert_eq!(result.highlights.focused(), Some(HexPoint::ORIGIN));
        assert_eq!(result.highlights.move_targets().len(), 36);
        assert!(!result.highlights.move_targets().contains(&HexPoint::ORIGIN));
        assert_eq!(result.moved_unit, None);
        assert_eq!(board.state().selected_unit(), Some(UnitId(0)));
    }

    #[test]
    fn test_select_unit_above_cell() {
        // Units usually float a bit above the board
        let (mut board, position) = board();
        let result =
            pick_unit(&mut board, position + nalgebra::Vector3::new(0.0, 0.3, 0.0));
        assert_eq!(result.highlights.focused(), Some(HexPoint::ORIGIN));
    }

    #[test]
    fn test_select_unit_off_grid() {
        let (mut board, _) = board();
        let result = pick_unit(&mut board, Point3::new(50.0, 0.0, 0.0));
        assert!(result.highlights.is_empty());
        assert_eq!(board.state(), &SelectionState::Idle);
        // The registry still has the unit where it was
        assert_eq!(board.unit_position(UnitId(0)), Some(HexPoint::ORIGIN));
    }

    #[test]
    fn test_move() {
        let (mut board, position) = board();
        pick_unit(&mut board, position);
        let target = HexPoint::new(2, -1);
        let result = board.pick(PickEvent::Cell(target));

        let moved = result.moved_unit.unwrap();
        assert_eq!(moved.unit, UnitId(0));
        assert_eq!(moved.from, HexPoint::ORIGIN);
        assert_eq!(moved.to, target);
        let grid = board.grid().unwrap();
        assert_eq!(moved.world_position, grid.get(target).unwrap().world_position());
        assert_eq!(grid.get(target).unwrap().occupant(), Some(UnitId(0)));
        assert_eq!(grid.get(HexPoint::ORIGIN).unwrap().occupant(), None);

        assert!(result.highlights.is_empty());
        assert_eq!(board.state(), &SelectionState::Idle);
        assert_eq!(board.unit_position(UnitId(0)), Some(target));
    }

    #[test]
    fn test_cancel_out_of_range() {
        let (mut board, position) = board();
        pick_unit(&mut board, position);
        // On the grid, but 4 steps away
        let result = board.pick(PickEvent::Cell(HexPoint::new(4, 0)));
        assert_eq!(result.moved_unit, None);
        assert!(result.highlights.is_empty());
        assert_eq!(board.state(), &SelectionState::Idle);
        assert_eq!(board.unit_position(UnitId(0)), Some(HexPoint::ORIGIN));

        // Off the grid entirely
        pick_unit(&mut board, position);
        let result = board.pick(PickEvent::Cell(HexPoint::new(10, 10)));
        assert_eq!(result.moved_unit, None);
    }

    #[test]
    fn test_cancel_on_origin() {
        let (mut board, position) = board();
        pick_unit(&mut board, position);
        let result = board.pick(PickEvent::Cell(HexPoint::ORIGIN));
        assert_eq!(result.moved_unit, None);
        assert_eq!(board.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_move_onto_other_unit() {
        let (mut board, position) = board();
        board.spawn_unit(UnitId(1), HexPoint::new(1, 0)).unwrap();
        pick_unit(&mut board, position);
        let result = board.pick(PickEvent::Cell(HexPoint::new(1, 0)));
        assert_eq!(result.moved_unit, None);
        assert_eq!(board.state(), &SelectionState::Idle);
        assert_eq!(board.unit_position(UnitId(0)), Some(HexPoint::ORIGIN));
    }

    #[test]
    fn test_retarget() {
        let (mut board, position) = board();
        let other = board.spawn_unit(UnitId(1), HexPoint::new(-4, 0)).unwrap();
        pick_unit(&mut board, position);
        let result = board.pick(PickEvent::Unit {
            unit: UnitId(1),
            world_position: other,
        });
        assert_eq!(result.moved_unit, None);
        assert_eq!(result.highlights.focused(), Some(HexPoint::new(-4, 0)));
        // Corner of the grid, so the range is clipped
        assert_eq!(result.highlights.move_targets().len(), 15);
        assert_eq!(board.state().selected_unit(), Some(UnitId(1)));
        assert_eq!(board.unit_position(UnitId(0)), Some(HexPoint::ORIGIN));
    }

    #[test]
    fn test_zero_budget() {
        let mut board = Board::new(BoardConfig {
            move_budget: 0,
            ..Default::default()
        })
        .unwrap();
        board.place_grid_from_config(Point3::origin()).unwrap();
        let position = board.spawn_unit(UnitId(0), HexPoint::ORIGIN).unwrap();
        let result = pick_unit(&mut board, position);
        assert!(result.highlights.move_targets().is_empty());
        let result = board.pick(PickEvent::Cell(HexPoint::new(1, 0)));
        assert_eq!(result.moved_unit, None);
    }

    #[test]
    fn test_place_grid_resets() {
        let (mut board, position) = board();
        pick_unit(&mut board, position);
        board.place_grid(Point3::new(1.0, 0.0, 1.0), 2, 0.5).unwrap();
        assert_eq!(board.state(), &SelectionState::Idle);
        assert!(board.current_highlights().is_empty());
        assert_eq!(board.unit_position(UnitId(0)), None);
        assert_eq!(board.grid().unwrap().len(), 19);
    }

    #[test]
    fn test_place_grid_invalid() {
        let (mut board, position) = board();
        pick_unit(&mut board, position);
        let err = board.place_grid(Point3::origin(), -2, 0.5).unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["radius"]);
        // Old grid and selection survive
        assert_eq!(board.grid().unwrap().len(), 61);
        assert_eq!(board.state().selected_unit(), Some(UnitId(0)));
        assert_eq!(board.current_highlights().move_targets().len(), 36);
    }

    #[test]
    fn test_spawn_unit() {
        let (mut board, _) = board();
        assert!(matches!(
            board.spawn_unit(UnitId(1), HexPoint::ORIGIN),
            Err(Error::CellOccupied { .. })
        ));
        assert!(matches!(
            board.spawn_unit(UnitId(1), HexPoint::new(7, 0)),
            Err(Error::UnknownCell(_))
        ));
        // Respawning moves the unit and frees its old cell
        board.spawn_unit(UnitId(0), HexPoint::new(0, 3)).unwrap();
        let grid = board.grid().unwrap();
        assert_eq!(grid.get(HexPoint::ORIGIN).unwrap().occupant(), None);
        assert_eq!(board.unit_position(UnitId(0)), Some(HexPoint::new(0, 3)));
    }

    #[test]
    fn test_invalid_config() {
        let err = Board::new(BoardConfig {
            move_budget: 5000,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["move_budget"]);
    }
}
