pub mod doors;
pub mod elevator;
pub mod error;
pub mod factory;
pub mod fsm;

pub use elevator::{Elevator, Step};
pub use error::DestinationError;
pub use factory::{ElevatorFactory, StandardElevatorFactory};
