pub mod dispatcher;
pub mod error;
pub mod strategy;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use strategy::{FirstAvailable, LeastCost, SchedulingStrategy};
