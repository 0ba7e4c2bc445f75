use std::fmt;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Idle,
    Up,
}

impl Direction {
    /// Direction of travel needed to get from `from` to `to`. Equal floors
    /// count as `Down`, matching how requests and queue heads are classified.
    pub fn towards(from: i32, to: i32) -> Self {
        if to > from { Direction::Up } else { Direction::Down }
    }

    pub fn as_string(self) -> String {
        match self {
            Direction::Down => String::from("down"),
            Direction::Idle => String::from("idle"),
            Direction::Up => String::from("up"),
        }
    }

    pub fn step(self) -> i32 {
        match self {
            Direction::Down => -1,
            Direction::Idle => 0,
            Direction::Up => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}
