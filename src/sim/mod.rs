//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the browser:
//! - Time comes in as a millisecond timestamp argument
//! - Randomness comes in as an `Rng` argument (seeded in tests)
//! - At most one snake step per `tick` call

pub mod food;
pub mod game;
pub mod grid;
pub mod power_up;
pub mod snake;

pub use food::Food;
pub use game::{EffectFrame, Game, GamePhase, Step};
pub use grid::{Direction, GridGeometry, Position, Viewport};
pub use power_up::{PowerUp, PowerUpKind, PowerUpSpawner};
pub use snake::{ActiveEffect, Advance, Snake};
