//! Periodic bonus items that give the snake a timed effect

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::food::random_free_cell;
use super::grid::Position;
use super::snake::Snake;

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Background flashes random colours while active
    Strobe,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 1] = [PowerUpKind::Strobe];

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A power-up lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
}

/// Spawn timer plus the (at most one) power-up on the board
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpSpawner {
    pub spawn_interval_ms: f64,
    last_spawn_ms: f64,
    current: Option<PowerUp>,
}

impl PowerUpSpawner {
    pub fn new(spawn_interval_ms: f64, now_ms: f64) -> Self {
        Self {
            spawn_interval_ms,
            last_spawn_ms: now_ms,
            current: None,
        }
    }

    pub fn current(&self) -> Option<PowerUp> {
        self.current
    }

    /// Place a power-up if none is out and the interval has elapsed
    ///
    /// Returns the power-up when one was placed this call.
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        snake: &Snake,
        food: Position,
        grid_size: u32,
        now_ms: f64,
        rng: &mut R,
    ) -> Option<PowerUp> {
        if self.current.is_some() || now_ms - self.last_spawn_ms < self.spawn_interval_ms {
            return None;
        }

        let head = snake.head();
        let position = random_free_cell(rng, grid_size, |cell| {
            cell == head || cell == food || snake.occupies(cell)
        });
        let power_up = PowerUp {
            position,
            kind: PowerUpKind::random(rng),
        };
        self.current = Some(power_up);
        self.last_spawn_ms = now_ms;
        log::debug!(
            "Power-up {:?} spawned at ({}, {})",
            power_up.kind,
            position.x,
            position.y
        );
        Some(power_up)
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, power_up: PowerUp) {
        self.current = Some(power_up);
    }

    /// Remove and return the power-up if it sits at `pos`
    pub fn take_at(&mut self, pos: Position) -> Option<PowerUp> {
        match self.current {
            Some(p) if p.position == pos => self.current.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Direction;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn snake() -> Snake {
        Snake::new(
            [Position::new(6, 15), Position::new(7, 15), Position::new(8, 15)],
            Direction::Right,
        )
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = PowerUpSpawner::new(15_000.0, 0.0);
        let food = Position::new(1, 1);

        assert!(spawner.try_spawn(&snake(), food, 30, 14_999.0, &mut rng).is_none());
        let placed = spawner.try_spawn(&snake(), food, 30, 15_000.0, &mut rng).unwrap();
        assert_eq!(spawner.current(), Some(placed));
        assert_ne!(placed.position, food);
        assert!(!snake().occupies(placed.position));

        // Only one at a time
        assert!(spawner.try_spawn(&snake(), food, 30, 60_000.0, &mut rng).is_none());
    }

    #[test]
    fn test_take_at() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut spawner = PowerUpSpawner::new(0.0, 0.0);
        let placed = spawner
            .try_spawn(&snake(), Position::new(0, 0), 30, 0.0, &mut rng)
            .unwrap();

        let elsewhere = Position::new(placed.position.x, (placed.position.y + 1) % 30);
        assert!(spawner.take_at(elsewhere).is_none());
        assert_eq!(spawner.take_at(placed.position), Some(placed));
        assert!(spawner.current().is_none());
    }

    #[test]
    fn test_interval_restarts_from_last_spawn() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawner = PowerUpSpawner::new(1_000.0, 0.0);
        let placed = spawner
            .try_spawn(&snake(), Position::new(0, 0), 30, 1_000.0, &mut rng)
            .unwrap();
        spawner.take_at(placed.position);

        assert!(spawner.try_spawn(&snake(), Position::new(0, 0), 30, 1_500.0, &mut rng).is_none());
        assert!(spawner.try_spawn(&snake(), Position::new(0, 0), 30, 2_000.0, &mut rng).is_some());
    }
}
