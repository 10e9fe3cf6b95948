use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    Right = 1,
    #[default]
    Down = 2,
    Left = 3,
}

impl From<u8> for Direction {
    fn from(value: u8) -> Self {
        match value {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            3 => Direction::Left,
            _ => Direction::Down,
        }
    }
}

impl Direction {
    /// Cardinal direction of the offset `(dx, dy)` in world space (y grows upward).
    ///
    /// Horizontal wins when both axes are equal. Returns `None` for a zero offset.
    pub fn toward(dx: f32, dy: f32) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            })
        }
    }
}
