#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure steering system that turns player gestures into direction commands.
//!
//! Every recognised gesture becomes a [`Command::SetDirection`]. Reversals are
//! forwarded untouched; turning back into the neck is a legal move that the
//! world resolves as a collision.

use std::str::FromStr;

use snake_grid_core::{Command, Direction, Event};
use thiserror::Error;

/// Arrow keys understood by the steering system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Steers toward decreasing rows.
    ArrowUp,
    /// Steers toward increasing rows.
    ArrowDown,
    /// Steers toward decreasing columns.
    ArrowLeft,
    /// Steers toward increasing columns.
    ArrowRight,
}

impl Key {
    /// Direction requested by the key.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::ArrowUp => Direction::North,
            Self::ArrowDown => Direction::South,
            Self::ArrowLeft => Direction::West,
            Self::ArrowRight => Direction::East,
        }
    }
}

impl FromStr for Key {
    type Err = SteeringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "arrowup" | "up" => Ok(Self::ArrowUp),
            "arrowdown" | "down" => Ok(Self::ArrowDown),
            "arrowleft" | "left" => Ok(Self::ArrowLeft),
            "arrowright" | "right" => Ok(Self::ArrowRight),
            _ => Err(SteeringError::UnknownKey(value.to_owned())),
        }
    }
}

/// Input captured by the host between two frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// A key was pressed.
    Key(Key),
    /// A touch moved from its start point by the given offset, in pixels.
    Swipe {
        /// Horizontal travel; positive values point right.
        dx: f32,
        /// Vertical travel; positive values point down.
        dy: f32,
    },
}

impl Gesture {
    /// Direction requested by the gesture, if it expresses one.
    ///
    /// Swipes follow their dominant axis; ties count as vertical. Swipes
    /// without travel carry no direction.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Key(key) => Some(key.direction()),
            Self::Swipe { dx, dy } => swipe_direction(dx, dy),
        }
    }
}

fn swipe_direction(dx: f32, dy: f32) -> Option<Direction> {
    if !(dx.is_finite() && dy.is_finite()) {
        return None;
    }
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Some(Direction::East)
        } else {
            Some(Direction::West)
        }
    } else if dy > 0.0 {
        Some(Direction::South)
    } else if dy < 0.0 {
        Some(Direction::North)
    } else {
        None
    }
}

/// Errors raised while decoding host input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SteeringError {
    /// The key name is not one of the arrow keys.
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// Steering system that forwards gestures while a game is in play.
#[derive(Clone, Debug, Default)]
pub struct Steering {
    in_play: bool,
}

impl Steering {
    /// Creates a steering system that waits for a game to start.
    #[must_use]
    pub const fn new() -> Self {
        Self { in_play: false }
    }

    /// Consumes world events and host gestures to emit direction commands.
    ///
    /// Gestures arriving before a game starts or after it ends are dropped.
    pub fn handle(&mut self, events: &[Event], gestures: &[Gesture], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStarted { .. } => self.in_play = true,
                Event::GameOver { .. } | Event::GridConfigured { .. } => self.in_play = false,
                _ => {}
            }
        }

        if !self.in_play {
            return;
        }

        out.extend(
            gestures
                .iter()
                .filter_map(|gesture| gesture.direction())
                .map(|direction| Command::SetDirection { direction }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipes_follow_their_dominant_axis() {
        assert_eq!(swipe_direction(40.0, -3.0), Some(Direction::East));
        assert_eq!(swipe_direction(-40.0, 12.0), Some(Direction::West));
        assert_eq!(swipe_direction(5.0, 30.0), Some(Direction::South));
        assert_eq!(swipe_direction(-5.0, -30.0), Some(Direction::North));
    }

    #[test]
    fn diagonal_swipes_count_as_vertical() {
        assert_eq!(swipe_direction(10.0, 10.0), Some(Direction::South));
        assert_eq!(swipe_direction(10.0, -10.0), Some(Direction::North));
    }

    #[test]
    fn taps_and_garbage_carry_no_direction() {
        assert_eq!(swipe_direction(0.0, 0.0), None);
        assert_eq!(swipe_direction(f32::NAN, 4.0), None);
    }

    #[test]
    fn key_names_parse_case_insensitively() {
        assert_eq!("ArrowUp".parse::<Key>(), Ok(Key::ArrowUp));
        assert_eq!(" arrowleft ".parse::<Key>(), Ok(Key::ArrowLeft));
        assert_eq!("right".parse::<Key>(), Ok(Key::ArrowRight));
        assert_eq!(
            "Space".parse::<Key>(),
            Err(SteeringError::UnknownKey("Space".to_owned()))
        );
    }
}
