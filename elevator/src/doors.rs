/// ----- DOORS MODULE -----
/// This module keeps track of how long the doors stay open, and then
/// closed, at a stop. The wait happens without holding the elevator's
/// lock, and ends early when the elevator is shut down.

use std::time::Duration;

use crossbeam_channel::{select, Receiver};

#[derive(Debug, Clone)]
pub struct Doors {
    dwell: Duration,
    shutdown_rx: Receiver<()>,
}

impl Doors {
    pub fn new(dwell: Duration, shutdown_rx: Receiver<()>) -> Self {
        Doors {
            dwell: dwell,
            shutdown_rx: shutdown_rx,
        }
    }

    /// Holds the doors in their current position for one dwell period.
    /// Returns `false` if the wait was cut short by a shutdown.
    pub fn hold(&self) -> bool {
        select! {
            // nothing is ever sent, the sender is dropped on shutdown
            recv(self.shutdown_rx) -> _ => false,
            default(self.dwell) => true,
        }
    }
}
