//! Mapping raw player input (key names, typed commands, touch swipes) to [`Direction`].

use crate::engine::Direction;
use std::str::FromStr;

/// Minimum swipe distance, in pixels, before a gesture counts as a move.
pub const SWIPE_THRESHOLD: f32 = 30.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts `up`/`down`/`left`/`right` in any case, browser key names
    /// (`ArrowUp`, ...) and `w`/`a`/`s`/`d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "up" | "arrowup" | "w" => Ok(Direction::Up),
            "down" | "arrowdown" | "s" => Ok(Direction::Down),
            "left" | "arrowleft" | "a" => Ok(Direction::Left),
            "right" | "arrowright" | "d" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Direction of a swipe from touch start to touch end, in screen coordinates (y grows downward).
///
/// Short swipes return `None`; otherwise the dominant axis wins, with ties going vertical.
pub fn swipe(dx: f32, dy: f32) -> Option<Direction> {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax.max(ay) <= SWIPE_THRESHOLD {
        return None;
    }
    let dir = if ax > ay {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(dir)
}
