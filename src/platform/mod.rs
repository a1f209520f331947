//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (`Clock`)
//! - Key decoding
//! - Headless drawing and sound for native runs and tests
//! - The web-sys shell (wasm only)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{DrawCall, HeadlessSurface, ManualClock, SilentSound};

use crate::sim::Direction;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Legacy DOM key codes the game reacts to
pub mod key_codes {
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const M: u32 = 77;
    pub const R: u32 = 82;
    pub const S: u32 = 83;
}

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Arrow(Direction),
    Enter,
    Escape,
    /// Debug key: stop the frame loop
    Pause,
    /// Debug key: restart the frame loop
    Resume,
    /// Toggle all sound
    Mute,
    Other(u32),
}

impl Key {
    pub fn from_code(code: u32) -> Self {
        use key_codes::*;
        match code {
            UP => Key::Arrow(Direction::Up),
            DOWN => Key::Arrow(Direction::Down),
            LEFT => Key::Arrow(Direction::Left),
            RIGHT => Key::Arrow(Direction::Right),
            ENTER => Key::Enter,
            ESCAPE => Key::Escape,
            S => Key::Pause,
            R => Key::Resume,
            M => Key::Mute,
            other => Key::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_decoding() {
        assert_eq!(Key::from_code(38), Key::Arrow(Direction::Up));
        assert_eq!(Key::from_code(40), Key::Arrow(Direction::Down));
        assert_eq!(Key::from_code(37), Key::Arrow(Direction::Left));
        assert_eq!(Key::from_code(39), Key::Arrow(Direction::Right));
        assert_eq!(Key::from_code(13), Key::Enter);
        assert_eq!(Key::from_code(27), Key::Escape);
        assert_eq!(Key::from_code(83), Key::Pause);
        assert_eq!(Key::from_code(82), Key::Resume);
        assert_eq!(Key::from_code(77), Key::Mute);
        assert_eq!(Key::from_code(65), Key::Other(65));
    }
}
