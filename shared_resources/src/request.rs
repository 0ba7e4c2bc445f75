use super::direction::Direction;

/// A single transport request: pick up at `source_floor`, drop off at
/// `destination_floor`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    source_floor: i32,
    destination_floor: i32,
    direction: Direction,
}

impl Request {
    pub fn new(source_floor: i32, destination_floor: i32) -> Self {
        Request {
            source_floor: source_floor,
            destination_floor: destination_floor,
            direction: Direction::towards(source_floor, destination_floor),
        }
    }

    pub fn source_floor(&self) -> i32 {
        self.source_floor
    }

    pub fn destination_floor(&self) -> i32 {
        self.destination_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}
