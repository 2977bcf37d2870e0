use crate::{board::UnitId, hex::HexPoint};
use thiserror::Error as ThisError;
use validator::ValidationErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong in the core. Misses (picking a cell that
/// isn't on the board, moving out of range) are NOT errors; those are
/// represented as empty results instead.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A caller handed us a value outside its domain, e.g. a negative grid
    /// radius or a non-positive hex size. The validation errors are keyed by
    /// field name. Nothing was modified.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationErrors),

    #[error("no cell at {0}")]
    UnknownCell(HexPoint),

    #[error("cell {position} is already occupied by unit {occupant}")]
    CellOccupied {
        position: HexPoint,
        occupant: UnitId,
    },

    /// The operation needs a placed grid, but none has been placed yet
    #[error("no grid has been placed")]
    NoGrid,
}

impl Error {
    /// Names of the fields that failed validation, sorted. Empty for any
    /// other kind of error.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        match self {
            Self::InvalidArgument(errors) => {
                let mut fields: Vec<&'static str> =
                    errors.errors().keys().copied().collect();
                fields.sort_unstable();
                fields
            }
            _ => Vec::new(),
        }
    }
}
