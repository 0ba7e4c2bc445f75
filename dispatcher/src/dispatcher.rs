/// ----- DISPATCHER MODULE -----
/// Owns the fleet and the control loop threads, and assigns incoming
/// requests to elevators through the active scheduling strategy. Only one
/// assignment is decided at a time, so two requests never both see the
/// same elevator as the cheapest one from a stale snapshot.

use std::mem;
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use elevator::{fsm, Elevator, ElevatorFactory, StandardElevatorFactory};
use shared_resources::config::{BankConfig, ElevatorSettings};
use shared_resources::elevator_status::ElevatorStatus;
use shared_resources::request::Request;

use crate::error::DispatchError;
use crate::strategy::{self, LeastCost, SchedulingStrategy};

struct Policy {
    strategy: Box<dyn SchedulingStrategy>,
    factory: Box<dyn ElevatorFactory>,
    accepting: bool,
}

pub struct Dispatcher {
    settings: ElevatorSettings,
    fleet: Vec<Arc<Elevator>>,
    policy: Mutex<Policy>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Dispatcher {
    /// A fleet of standard elevators scheduled by least cost.
    pub fn new(num_elevators: usize, settings: ElevatorSettings) -> Result<Self, DispatchError> {
        let strategy = Box::new(LeastCost::new(&settings));
        Self::with_policy(num_elevators, settings, strategy, Box::new(StandardElevatorFactory))
    }

    pub fn from_config(config: &BankConfig) -> Result<Self, DispatchError> {
        let strategy = strategy::from_kind(config.strategy, &config.elevator);
        Self::with_policy(
            config.num_elevators,
            config.elevator.clone(),
            strategy,
            Box::new(StandardElevatorFactory),
        )
    }

    pub fn with_policy(
        num_elevators: usize,
        settings: ElevatorSettings,
        strategy: Box<dyn SchedulingStrategy>,
        factory: Box<dyn ElevatorFactory>,
    ) -> Result<Self, DispatchError> {
        if num_elevators == 0 {
            return Err(DispatchError::InvalidFleet(String::from("a fleet needs at least one elevator")));
        }
        if settings.min_floor > settings.max_floor {
            return Err(DispatchError::InvalidFleet(format!(
                "min floor {} is above max floor {}",
                settings.min_floor, settings.max_floor
            )));
        }
        info!(
            num_elevators,
            min_floor = settings.min_floor,
            max_floor = settings.max_floor,
            strategy = strategy.name(),
            "creating elevator dispatcher"
        );

        let mut fleet: Vec<Arc<Elevator>> = Vec::with_capacity(num_elevators);
        let mut handles = Vec::with_capacity(num_elevators);
        for i in 0..num_elevators {
            let elevator = Arc::new(factory.create_elevator(&settings));
            match fsm::spawn(Arc::clone(&elevator), format!("elevator_{}", i)) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    elevator.shutdown();
                    for started in &fleet {
                        started.shutdown();
                    }
                    for handle in handles {
                        if handle.join().is_err() {
                            warn!("elevator control loop panicked");
                        }
                    }
                    return Err(DispatchError::Spawn(e));
                },
            }
            info!(elevator = %elevator.id(), index = i, "elevator started");
            fleet.push(elevator);
        }

        Ok(Dispatcher {
            settings: settings,
            fleet: fleet,
            policy: Mutex::new(Policy {
                strategy: strategy,
                factory: factory,
                accepting: true,
            }),
            handles: Mutex::new(handles),
        })
    }

    /// Assigns the request to an elevator and queues its pickup and drop-off
    /// floors, in that order. Returns the index of the chosen elevator.
    pub fn request_elevator(&self, request: Request) -> Result<usize, DispatchError> {
        let policy = self.policy.lock();
        if !policy.accepting {
            warn!("request rejected, dispatcher is shut down");
            return Err(DispatchError::ShutDown);
        }
        info!(
            source = request.source_floor(),
            destination = request.destination_floor(),
            "processing new request"
        );

        let snapshot = self.status();
        let selected = policy
            .strategy
            .select_elevator(&snapshot, &request)
            .filter(|&index| snapshot.get(index).map_or(false, ElevatorStatus::is_available));
        let index = match selected {
            Some(index) => index,
            None => {
                warn!("No available elevator found for the request");
                return Err(DispatchError::NoElevatorAvailable {
                    source_floor: request.source_floor(),
                    destination_floor: request.destination_floor(),
                });
            },
        };

        let elevator = &self.fleet[index];
        info!(elevator = %elevator.id(), floor = snapshot[index].floor, "assigned request");
        for floor in [request.source_floor(), request.destination_floor()] {
            if let Err(e) = elevator.add_destination(floor) {
                debug!(elevator = %elevator.id(), floor, "floor not queued: {}", e);
            }
        }
        Ok(index)
    }

    pub fn request(&self, source_floor: i32, destination_floor: i32) -> Result<usize, DispatchError> {
        self.request_elevator(Request::new(source_floor, destination_floor))
    }

    /// Takes effect from the next request.
    pub fn set_scheduling_strategy<S>(&self, strategy: S)
    where
        S: SchedulingStrategy + 'static,
    {
        let mut policy = self.policy.lock();
        info!(strategy = strategy.name(), "scheduling strategy changed");
        policy.strategy = Box::new(strategy);
    }

    pub fn set_elevator_factory<F>(&self, factory: F)
    where
        F: ElevatorFactory + 'static,
    {
        self.policy.lock().factory = Box::new(factory);
        info!("elevator factory changed");
    }

    /// A new elevator for this fleet's floor range from the active factory.
    /// It is not part of the fleet and has no control loop.
    pub fn build_elevator(&self) -> Elevator {
        self.policy.lock().factory.create_elevator(&self.settings)
    }

    pub fn strategy_name(&self) -> &'static str {
        self.policy.lock().strategy.name()
    }

    /// Shuts down every elevator and waits for all control loops to exit.
    /// Calling it again is harmless.
    pub fn shutdown(&self) {
        let mut policy = self.policy.lock();
        if policy.accepting {
            info!("Shutting down elevator dispatcher");
        }
        policy.accepting = false;

        for elevator in &self.fleet {
            elevator.shutdown();
        }
        let handles = mem::take(&mut *self.handles.lock());
        let stopped = handles.len();
        for handle in handles {
            if handle.join().is_err() {
                warn!("elevator control loop panicked");
            }
        }
        if stopped > 0 {
            info!(stopped, "All elevators shut down");
        }
    }

    pub fn status(&self) -> Vec<ElevatorStatus> {
        self.fleet.iter().map(|elevator| elevator.status()).collect()
    }

    pub fn elevator_status(&self, index: usize) -> Option<ElevatorStatus> {
        self.fleet.get(index).map(|elevator| elevator.status())
    }

    pub fn elevators(&self) -> &[Arc<Elevator>] {
        &self.fleet
    }

    pub fn settings(&self) -> &ElevatorSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.fleet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fleet.is_empty()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
