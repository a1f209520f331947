//! Food placement

use rand::Rng;

use super::grid::Position;
use super::snake::Snake;

/// Uniformly sample cells until one is not `blocked`
///
/// Unbounded: the board is always far from full during play.
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: u32,
    mut blocked: impl FnMut(Position) -> bool,
) -> Position {
    let n = grid_size as i32;
    loop {
        let candidate = Position::new(rng.random_range(0..n), rng.random_range(0..n));
        if !blocked(candidate) {
            return candidate;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Place food on a random cell the snake does not cover
    pub fn spawn<R: Rng + ?Sized>(snake: &Snake, grid_size: u32, rng: &mut R) -> Self {
        Self::spawn_avoiding(snake, grid_size, None, rng)
    }

    /// Like `spawn`, but also keeps off `avoid` (the power-up cell)
    pub fn spawn_avoiding<R: Rng + ?Sized>(
        snake: &Snake,
        grid_size: u32,
        avoid: Option<Position>,
        rng: &mut R,
    ) -> Self {
        let head = snake.head();
        let position = random_free_cell(rng, grid_size, |cell| {
            cell == head || Some(cell) == avoid || snake.occupies(cell)
        });
        log::debug!("Food spawned at ({}, {})", position.x, position.y);
        Self { position }
    }

    /// Move to a fresh cell after being eaten
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        snake: &Snake,
        grid_size: u32,
        avoid: Option<Position>,
        rng: &mut R,
    ) {
        *self = Self::spawn_avoiding(snake, grid_size, avoid, rng);
    }
}
