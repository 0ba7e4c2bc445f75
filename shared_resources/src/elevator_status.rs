use crate::direction::Direction;

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Behaviour {
    Stopped,
    Moving,
    DoorsOpen,
    DoorsClosed,
    Maintenance,
}

impl Behaviour {
    pub fn as_string(&self) -> String {
        match self {
            Behaviour::Stopped => String::from("stopped"),
            Behaviour::Moving => String::from("moving"),
            Behaviour::DoorsOpen => String::from("doorsOpen"),
            Behaviour::DoorsClosed => String::from("doorsClosed"),
            Behaviour::Maintenance => String::from("maintenance"),
        }
    }
}

/// Point-in-time copy of one elevator. Also the value the elevator keeps
/// behind its lock, so a snapshot is a plain clone.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ElevatorStatus {
    pub id: String,
    pub floor: i32,
    pub direction: Direction,
    pub behaviour: Behaviour,
    pub destinations: Vec<i32>,
}

impl ElevatorStatus {
    pub fn new(id: String, floor: i32) -> Self {
        ElevatorStatus {
            id: id,
            floor: floor,
            direction: Direction::Idle,
            behaviour: Behaviour::Stopped,
            destinations: Vec::new(),
        }
    }

    /// Eligible for new assignments.
    pub fn is_available(&self) -> bool {
        self.behaviour != Behaviour::Maintenance
    }

    pub fn next_destination(&self) -> Option<i32> {
        self.destinations.first().copied()
    }

    /// Recompute the direction from the head of the queue.
    pub fn update_direction(&mut self) {
        self.direction = match self.next_destination() {
            Some(next_floor) => Direction::towards(self.floor, next_floor),
            None => Direction::Idle,
        };
    }

    pub fn clear_destinations(&mut self) {
        self.destinations.clear();
        self.direction = Direction::Idle;
        self.behaviour = Behaviour::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_taken_from_the_head_of_the_queue() {
        let mut status = ElevatorStatus::new(String::from("one"), 4);
        status.destinations = vec![2, 9];
        status.update_direction();
        assert_eq!(status.direction, Direction::Down);

        status.destinations.remove(0);
        status.update_direction();
        assert_eq!(status.direction, Direction::Up);

        status.destinations.clear();
        status.update_direction();
        assert_eq!(status.direction, Direction::Idle);
    }

    #[test]
    fn maintenance_is_not_available() {
        let mut status = ElevatorStatus::new(String::from("one"), 0);
        assert!(status.is_available());
        status.behaviour = Behaviour::Maintenance;
        assert!(!status.is_available());
    }

    #[test]
    fn clearing_resets_maintenance() {
        let mut status = ElevatorStatus::new(String::from("one"), 3);
        status.destinations = vec![7];
        status.update_direction();
        status.behaviour = Behaviour::Maintenance;

        status.clear_destinations();
        assert!(status.destinations.is_empty());
        assert_eq!(status.direction, Direction::Idle);
        assert_eq!(status.behaviour, Behaviour::Stopped);
        assert!(status.is_available());
    }
}
