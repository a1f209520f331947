//! Fatal errors
//!
//! Usage mistakes (unknown screen or asset names, re-activating the active
//! screen) are logged and ignored where they happen. Only conditions that
//! must stop the game before the loop starts end up here.

use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    /// Viewport is too close to square for a board with one dominant axis
    ViewportTooSquare {
        width: f32,
        height: f32,
        tile_size: f32,
    },
    /// Configuration parsed but describes an unplayable game
    InvalidConfig(String),
    /// Configuration JSON could not be parsed
    ConfigParse(serde_json::Error),
}

impl Error {
    /// Message suitable for a blocking alert
    pub fn user_message(&self) -> String {
        match self {
            Error::ViewportTooSquare { .. } => "The screen should not be squarish for a proper \
                 game experience. Please use landscape or portrait mode and restart the page."
                .to_string(),
            Error::InvalidConfig(_) | Error::ConfigParse(_) => {
                format!("The game could not start: {}", self)
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::ViewportTooSquare {
                width,
                height,
                tile_size,
            } => write!(
                f,
                "viewport {}x{} is too close to square for {} px tiles",
                width, height, tile_size
            ),
            Error::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
            Error::ConfigParse(e) => write!(f, "config parse error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::ConfigParse(e)
    }
}

pub type Result<T = ()> = std::result::Result<T, Error>;
