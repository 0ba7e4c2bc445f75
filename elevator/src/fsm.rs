/// ----- FSM MODULE -----
/// The control loop of a single elevator. It ticks at a fixed interval and
/// advances the elevator's state machine one step per tick, until the
/// elevator is shut down.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{select, tick};
use tracing::info;

use crate::elevator::{Elevator, Step};

const MIN_TICK: Duration = Duration::from_millis(1);

pub fn main(elevator: Arc<Elevator>) {
    let timer = tick(elevator.settings().tick.max(MIN_TICK));
    info!(elevator = %elevator.id(), "control loop started");

    while elevator.is_running() {
        select! {
            recv(timer) -> _ => {
                if elevator.step() == Step::Interrupted {
                    break;
                }
            },
            recv(elevator.shutdown_signal()) -> _ => break,
        }
    }
    info!(elevator = %elevator.id(), floor = elevator.current_floor(), "control loop stopped");
}

/// Runs the control loop on its own named thread.
pub fn spawn(elevator: Arc<Elevator>, name: String) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new().name(name).spawn(move || main(elevator))
}
