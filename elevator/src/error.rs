use thiserror::Error;

/// Why a floor was not added to an elevator's destination queue. These are
/// reported and logged, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DestinationError {
    #[error("floor {floor} is outside {min_floor}..={max_floor}")]
    OutOfRange {
        floor: i32,
        min_floor: i32,
        max_floor: i32,
    },

    #[error("floor {0} is already queued")]
    AlreadyQueued(i32),

    #[error("elevator has been shut down")]
    NotRunning,
}
