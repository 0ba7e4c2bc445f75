use std::io::{stdout, Stdout, Write};

use crossterm::{cursor, terminal, Result, ExecutableCommand};

use shared_resources::elevator_status::ElevatorStatus;

const HEADER_SIZE: u16 = 5;
const ID_WIDTH: usize = 8;

pub struct Debug {
    stdout: Stdout,
    printed: u16,
}

impl Debug {
    pub fn new() -> Self {
        Debug {
            stdout: stdout(),
            printed: 0,
        }
    }

    /// Redraws the fleet table in place.
    pub fn printstatus(&mut self, fleet: &[ElevatorStatus]) -> Result<()> {
        if self.printed > 0 {
            self.stdout.execute(cursor::MoveUp(self.printed))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        writeln!(self.stdout, "+----------------------------------------------------------------------------+")?;
        writeln!(self.stdout, "| ELEVATORS                                                                  |")?;
        writeln!(self.stdout, "+------------+------------+--------------+------------+----------------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} | {2:<12} | {3:<10} | {4:<20} |", "ID", "FLOOR", "STATE", "DIRECTION", "DESTINATIONS")?;
        writeln!(self.stdout, "+------------+------------+--------------+------------+----------------------+")?;
        for elevator in fleet {
            let id: String = elevator.id.chars().take(ID_WIDTH).collect();
            let destinations = elevator
                .destinations
                .iter()
                .map(|floor| floor.to_string())
                .collect::<Vec<_>>()
                .join(",");
            writeln!(self.stdout, "| {0:<10} | {1:<10} | {2:<12} | {3:<10} | {4:<20} |",
                id,
                elevator.floor,
                elevator.behaviour.as_string(),
                elevator.direction.as_string(),
                destinations)?;
            writeln!(self.stdout, "+------------+------------+--------------+------------+----------------------+")?;
        }
        self.stdout.flush()?;

        self.printed = HEADER_SIZE + 2 * fleet.len() as u16;
        Ok(())
    }
}
