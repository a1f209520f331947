//! Snake body, steering, and the one-cell advance step

use std::collections::VecDeque;

use super::grid::{Direction, Position};
use super::power_up::PowerUpKind;

/// Result of a single advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub alive: bool,
    pub ate: bool,
}

impl Advance {
    const DEAD: Self = Self {
        alive: false,
        ate: false,
    };
}

/// Timed status effect picked up from a power-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    /// Clock time (ms) when the effect started
    pub since_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments from tail (front) to head (back)
    body: VecDeque<Position>,
    direction: Direction,
    /// Requested turn, applied on the next advance
    pending: Option<Direction>,
    pub effect: Option<ActiveEffect>,
}

impl Snake {
    /// Build a snake from tail-to-head segments
    ///
    /// The body must be non-empty; `GameConfig::validate` rejects empty
    /// start bodies before a snake is ever built from one.
    pub fn new(body: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        let body: VecDeque<Position> = body.into_iter().collect();
        debug_assert!(!body.is_empty(), "snake needs at least one segment");
        Self {
            body,
            direction,
            pending: None,
            effect: None,
        }
    }

    pub fn head(&self) -> Position {
        // Non-empty by construction
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments from tail to head
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = Position> + ExactSizeIterator + '_ {
        self.body.iter().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next advance will take
    pub fn heading(&self) -> Direction {
        self.pending.unwrap_or(self.direction)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Queue a turn for the next advance
    ///
    /// Reversing into the neck is refused; returns whether the turn was queued.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() {
            return false;
        }
        self.pending = Some(dir);
        true
    }

    /// Move the head one cell and resolve collisions
    ///
    /// On a wall or self hit the new head stays appended and the tail is not
    /// trimmed, so the crash position remains visible.
    pub fn advance(&mut self, food: Position, grid_size: u32) -> Advance {
        let dir = self.heading();
        let new_head = self.head().step(dir);
        self.direction = dir;
        self.pending = None;
        self.body.push_back(new_head);

        if !new_head.in_bounds(grid_size) {
            return Advance::DEAD;
        }

        let before_head = self.body.len() - 1;
        if self.body.iter().take(before_head).any(|&s| s == new_head) {
            return Advance::DEAD;
        }

        if new_head == food {
            return Advance {
                alive: true,
                ate: true,
            };
        }

        self.body.pop_front();
        Advance {
            alive: true,
            ate: false,
        }
    }

    pub fn apply_effect(&mut self, kind: PowerUpKind, now_ms: f64) {
        self.effect = Some(ActiveEffect {
            kind,
            since_ms: now_ms,
        });
    }

    /// Drop the effect once it has lasted `duration_ms`; returns true if it expired
    pub fn expire_effect(&mut self, now_ms: f64, duration_ms: f64) -> bool {
        match self.effect {
            Some(effect) if now_ms - effect.since_ms > duration_ms => {
                self.effect = None;
                true
            }
            _ => false,
        }
    }
}
