//! One run of Snake: board geometry, snake, food, power-ups, and the tick clock
//!
//! Rendering may happen every animation frame; the snake only moves when
//! `tick` sees that a full interval has passed since the previous step. At
//! most one step is taken per call, however late the call is.

use glam::Vec2;
use rand::Rng;

use super::food::Food;
use super::grid::{Direction, GridGeometry, Viewport};
use super::power_up::{PowerUpKind, PowerUpSpawner};
use super::snake::Snake;
use crate::config::GameConfig;
use crate::error::Result;
use crate::platform::Key;

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fresh board, no step taken yet
    JustReset,
    Running,
    /// Snake crashed; nothing moves until the next reset
    Over,
}

/// Outcome of a `tick` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Interval not elapsed (or run over); nothing changed
    Waiting,
    /// Snake moved one cell
    Moved {
        ate: bool,
        power_up: Option<PowerUpKind>,
    },
    /// Snake hit a wall or itself
    Died { score: u32, anchor: Vec2 },
}

/// Per-frame state of the snake's power-up effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectFrame {
    None,
    Active(PowerUpKind),
    /// The effect ran out during this frame
    Expired,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    pub geometry: GridGeometry,
    pub snake: Snake,
    pub food: Food,
    pub power_ups: PowerUpSpawner,
    pub score: u32,
    pub phase: GamePhase,
    last_tick_ms: f64,
}

impl Game {
    /// Start a run sized for `viewport`
    pub fn new<R: Rng + ?Sized>(
        config: &GameConfig,
        viewport: Viewport,
        now_ms: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let geometry =
            GridGeometry::fit(viewport, config.grid_size, config.square_tolerance_tiles)?;
        let snake = Snake::new(config.start_body.iter().copied(), config.start_direction);
        let food = Food::spawn(&snake, config.grid_size, rng);

        log::info!(
            "Game reset: {}x{} grid, {:.1} px tiles, {}",
            config.grid_size,
            config.grid_size,
            geometry.tile_size,
            if geometry.landscape { "landscape" } else { "portrait" }
        );

        Ok(Self {
            config: config.clone(),
            geometry,
            snake,
            food,
            power_ups: PowerUpSpawner::new(config.power_up.spawn_interval_ms, now_ms),
            score: 0,
            phase: GamePhase::JustReset,
            last_tick_ms: now_ms,
        })
    }

    /// Throw the current run away and start over
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        viewport: Viewport,
        now_ms: f64,
        rng: &mut R,
    ) -> Result<()> {
        *self = Self::new(&self.config, viewport, now_ms, rng)?;
        Ok(())
    }

    pub fn grid_size(&self) -> u32 {
        self.config.grid_size
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.config.tick_interval_ms
    }

    /// Queue a turn; reversing straight into the body is ignored
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.phase == GamePhase::Over {
            return false;
        }
        self.snake.steer(dir)
    }

    /// Apply a key press; returns true if the key steered the snake
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Arrow(dir) => self.steer(dir),
            _ => false,
        }
    }

    /// Advance the simulation if a full interval has passed
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> Step {
        if self.phase == GamePhase::Over
            || now_ms - self.last_tick_ms < self.config.tick_interval_ms
        {
            return Step::Waiting;
        }
        self.last_tick_ms = now_ms;
        self.phase = GamePhase::Running;

        let grid_size = self.config.grid_size;
        let advance = self.snake.advance(self.food.position, grid_size);
        if !advance.alive {
            self.phase = GamePhase::Over;
            let head = self.snake.head();
            log::info!(
                "Snake crashed at ({}, {}) with score {}",
                head.x,
                head.y,
                self.score
            );
            return Step::Died {
                score: self.score,
                anchor: self.geometry.board_center(),
            };
        }

        if advance.ate {
            self.score += 1;
            let power_up = self.power_ups.current().map(|p| p.position);
            self.food.respawn(&self.snake, grid_size, power_up, rng);
        }

        let power_up = if self.config.power_up.enabled {
            self.power_ups
                .take_at(self.snake.head())
                .map(|picked| {
                    self.snake.apply_effect(picked.kind, now_ms);
                    log::info!("Power-up {:?} picked up", picked.kind);
                    picked.kind
                })
        } else {
            None
        };

        Step::Moved {
            ate: advance.ate,
            power_up,
        }
    }

    /// Expire a running effect, or try to place a new power-up when none is active
    pub fn update_power_up<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> EffectFrame {
        if !self.config.power_up.enabled || self.phase == GamePhase::Over {
            return EffectFrame::None;
        }

        match self.snake.effect {
            Some(effect) => {
                if self
                    .snake
                    .expire_effect(now_ms, self.config.power_up.effect_duration_ms)
                {
                    log::info!("Power-up {:?} wore off", effect.kind);
                    EffectFrame::Expired
                } else {
                    EffectFrame::Active(effect.kind)
                }
            }
            None => {
                self.power_ups.try_spawn(
                    &self.snake,
                    self.food.position,
                    self.config.grid_size,
                    now_ms,
                    rng,
                );
                EffectFrame::None
            }
        }
    }
}
