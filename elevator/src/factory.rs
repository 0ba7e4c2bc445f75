use tracing::debug;

use shared_resources::config::ElevatorSettings;

use crate::elevator::Elevator;

/// Builds the elevators of a fleet.
pub trait ElevatorFactory: Send + Sync {
    fn create_elevator(&self, settings: &ElevatorSettings) -> Elevator;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardElevatorFactory;

impl ElevatorFactory for StandardElevatorFactory {
    fn create_elevator(&self, settings: &ElevatorSettings) -> Elevator {
        debug!(min_floor = settings.min_floor, max_floor = settings.max_floor, "creating standard elevator");
        Elevator::new(settings.clone())
    }
}

impl<F> ElevatorFactory for F
where
    F: Fn(&ElevatorSettings) -> Elevator + Send + Sync,
{
    fn create_elevator(&self, settings: &ElevatorSettings) -> Elevator {
        self(settings)
    }
}
