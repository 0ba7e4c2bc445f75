use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid fleet: {0}")]
    InvalidFleet(String),

    #[error("failed to start elevator control loop: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("no elevator available for request {source_floor} -> {destination_floor}")]
    NoElevatorAvailable {
        source_floor: i32,
        destination_floor: i32,
    },

    #[error("dispatcher has been shut down")]
    ShutDown,
}
