use std::io::{Error, ErrorKind};
use std::time::Duration;

use crossbeam_channel::{after, select, tick};
use tracing::{info, warn};

use dispatcher::Dispatcher;
use shared_resources::config::BankConfig;

pub mod debug;
pub mod logging;

const MIN_REDRAW: Duration = Duration::from_millis(50);
const DEMO_REQUESTS: [(i32, i32); 3] = [(0, 5), (2, 7), (3, 1)];

fn main() -> std::io::Result<()> {
    // INITIALIZE LOGGING
    logging::init();

    // READ CONFIGURATION
    let config = BankConfig::get().map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

    // INITIALIZE DISPATCHER AND ELEVATOR THREADS
    let dispatcher = Dispatcher::from_config(&config).map_err(|e| Error::new(ErrorKind::Other, e))?;

    // SUBMIT REQUESTS
    for (source_floor, destination_floor) in DEMO_REQUESTS {
        if let Err(e) = dispatcher.request(source_floor, destination_floor) {
            warn!("request {} -> {} not assigned: {}", source_floor, destination_floor, e);
        }
    }
    let settings = dispatcher.settings();
    info!(
        elevators = dispatcher.len(),
        min_floor = settings.min_floor,
        max_floor = settings.max_floor,
        "All requests submitted. System will run for {:?}...",
        config.runtime
    );

    let mut debug = debug::Debug::new();
    let timer = tick(config.elevator.tick.max(MIN_REDRAW));
    let deadline = after(config.runtime);
    loop {
        select! {
            recv(timer) -> _ => {
                debug.printstatus(&dispatcher.status())?;
            },
            recv(deadline) -> _ => break,
        }
    }

    dispatcher.shutdown();
    info!("Elevator simulation completed");
    Ok(())
}
