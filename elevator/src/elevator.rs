/// ----- ELEVATOR MODULE -----
/// A single elevator car: its position, direction, behaviour and the queue
/// of floors it is going to visit. All state sits behind one lock, so every
/// transition is atomic and readers always get a consistent snapshot. The
/// door cycle runs with the lock released.

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_resources::config::ElevatorSettings;
use shared_resources::direction::Direction;
use shared_resources::elevator_status::{Behaviour, ElevatorStatus};

use crate::doors::Doors;
use crate::error::DestinationError;

/// Outcome of one call to [`Elevator::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing queued, or the elevator is in maintenance.
    Idle,
    /// Moved one floor and is still on its way.
    Moved,
    /// Stopped at a queued floor and completed the door cycle.
    Arrived,
    /// A door cycle is in progress on another thread.
    Busy,
    /// Shut down during the door cycle.
    Interrupted,
}

pub struct Elevator {
    id: String,
    settings: ElevatorSettings,
    status: Mutex<ElevatorStatus>,
    running: AtomicBool,
    doors: Doors,
    shutdown_tx: Mutex<Option<Sender<()>>>,
    shutdown_rx: Receiver<()>,
}

impl Elevator {
    pub fn new(settings: ElevatorSettings) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), settings)
    }

    pub fn with_id(id: String, settings: ElevatorSettings) -> Self {
        let (shutdown_tx, shutdown_rx) = bounded(0);
        let status = ElevatorStatus::new(id.clone(), settings.min_floor);
        info!(elevator = %id, floor = settings.min_floor, "elevator initialized");
        Elevator {
            id: id,
            doors: Doors::new(settings.door_dwell, shutdown_rx.clone()),
            settings: settings,
            status: Mutex::new(status),
            running: AtomicBool::new(true),
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
            shutdown_rx: shutdown_rx,
        }
    }

    pub fn add_destination(&self, floor: i32) -> Result<(), DestinationError> {
        let mut status = self.status.lock();
        let result = if !self.is_running() {
            Err(DestinationError::NotRunning)
        } else if !self.settings.contains(floor) {
            Err(DestinationError::OutOfRange {
                floor: floor,
                min_floor: self.settings.min_floor,
                max_floor: self.settings.max_floor,
            })
        } else if status.destinations.contains(&floor) {
            Err(DestinationError::AlreadyQueued(floor))
        } else {
            status.destinations.push(floor);
            status.update_direction();
            Ok(())
        };

        match &result {
            Ok(()) => info!(elevator = %self.id, floor, direction = %status.direction, "added destination"),
            Err(e) => warn!(elevator = %self.id, floor, "rejected destination: {}", e),
        }
        result
    }

    /// One discrete simulation step: move one floor towards the head of the
    /// queue, and stop if that floor has been reached.
    pub fn step(&self) -> Step {
        let mut status = self.status.lock();
        match status.behaviour {
            Behaviour::Maintenance => return Step::Idle,
            Behaviour::DoorsOpen | Behaviour::DoorsClosed => return Step::Busy,
            _ => {},
        }

        let next_floor = match status.next_destination() {
            Some(floor) => floor,
            None => {
                status.direction = Direction::Idle;
                status.behaviour = Behaviour::Stopped;
                return Step::Idle;
            },
        };

        status.behaviour = Behaviour::Moving;
        if status.floor != next_floor {
            let direction = Direction::towards(status.floor, next_floor);
            status.direction = direction;
            status.floor += direction.step();
            debug!(elevator = %self.id, floor = status.floor, "moved");
        }

        if status.next_destination() == Some(status.floor) {
            self.stop(status)
        } else {
            Step::Moved
        }
    }

    fn stop(&self, mut status: MutexGuard<'_, ElevatorStatus>) -> Step {
        let floor = status.floor;
        status.behaviour = Behaviour::Stopped;
        status.destinations.retain(|&f| f != floor);
        status.update_direction();
        info!(elevator = %self.id, floor, "stopped");

        status.behaviour = Behaviour::DoorsOpen;
        debug!(elevator = %self.id, floor, "doors opening");
        drop(status);
        if !self.doors.hold() {
            return self.interrupted();
        }

        settle(&mut self.status.lock(), Behaviour::DoorsClosed);
        debug!(elevator = %self.id, floor, "doors closing");
        if !self.doors.hold() {
            return self.interrupted();
        }

        let mut status = self.status.lock();
        settle(&mut status, Behaviour::Stopped);
        status.update_direction();
        Step::Arrived
    }

    // Leaves the car where it is, with the doors settled.
    fn interrupted(&self) -> Step {
        let mut status = self.status.lock();
        settle(&mut status, Behaviour::Stopped);
        status.update_direction();
        info!(elevator = %self.id, floor = status.floor, "door cycle interrupted");
        Step::Interrupted
    }

    pub fn clear_destinations(&self) {
        self.status.lock().clear_destinations();
        info!(elevator = %self.id, "destinations cleared");
    }

    /// Stops accepting destinations, clears the queue and wakes the control
    /// loop so it can exit. Safe to call more than once.
    pub fn shutdown(&self) {
        {
            let mut status = self.status.lock();
            self.running.store(false, Ordering::SeqCst);
            status.clear_destinations();
        }
        if self.shutdown_tx.lock().take().is_some() {
            info!(elevator = %self.id, "shutting down");
        }
    }

    /// Hook for taking the elevator out of (or back into) service. An
    /// elevator in maintenance keeps its position and is never scheduled.
    pub fn set_maintenance(&self, maintenance: bool) {
        let mut status = self.status.lock();
        if maintenance {
            status.behaviour = Behaviour::Maintenance;
        } else if status.behaviour == Behaviour::Maintenance {
            status.behaviour = Behaviour::Stopped;
        }
        info!(elevator = %self.id, maintenance, "maintenance mode changed");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Disconnects when the elevator is shut down.
    pub fn shutdown_signal(&self) -> &Receiver<()> {
        &self.shutdown_rx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn settings(&self) -> &ElevatorSettings {
        &self.settings
    }

    pub fn status(&self) -> ElevatorStatus {
        self.status.lock().clone()
    }

    pub fn current_floor(&self) -> i32 {
        self.status.lock().floor
    }

    pub fn direction(&self) -> Direction {
        self.status.lock().direction
    }

    pub fn behaviour(&self) -> Behaviour {
        self.status.lock().behaviour
    }

    pub fn destinations(&self) -> Vec<i32> {
        self.status.lock().destinations.clone()
    }
}

// Maintenance entered during a door cycle wins over the cycle.
fn settle(status: &mut ElevatorStatus, behaviour: Behaviour) {
    if status.behaviour != Behaviour::Maintenance {
        status.behaviour = behaviour;
    }
}
