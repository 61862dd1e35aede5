use crate::location::Position;
use crate::map::ObjectKind;
use thiserror::Error;

/// Errors raised while building a map from placements or scenario text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("{object:?} cannot be placed at {position}: conflicts with {other:?}")]
    Conflict {
        object: ObjectKind,
        other: ObjectKind,
        position: Position,
    },

    #[error("coordinates ({row}, {col}) are outside of the grid")]
    OutOfBounds { row: i64, col: i64 },

    #[error("{0:?} has not been placed")]
    MissingObject(ObjectKind),

    #[error("no free cell left for {0:?}")]
    NoRoom(ObjectKind),

    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Rejected open-set operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriorityError {
    #[error("key for {position} cannot increase from {current:?} to {requested:?}")]
    KeyIncrease {
        position: Position,
        current: (u32, u32),
        requested: (u32, u32),
    },

    #[error("{0} is not queued")]
    NotQueued(Position),
}

pub type MapResult<T> = std::result::Result<T, MapError>;
