//! Browser-free stand-ins for the drawing surface, clock, and sounds
//!
//! Used by the native binary and by tests.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use super::Clock;
use crate::audio::Playable;
use crate::renderer::{Color, ImageHandle, Surface};

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background(Color),
    Rect {
        origin: Vec2,
        size: Vec2,
        fill: Color,
        stroke_weight: f32,
    },
    Circle {
        center: Vec2,
        diameter: f32,
        fill: Color,
    },
    Image {
        image: ImageHandle,
        origin: Vec2,
        size: Vec2,
    },
    Text {
        text: String,
        center: Vec2,
        size: f32,
        fill: Color,
    },
}

/// Surface that records every call instead of drawing
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub calls: Vec<DrawCall>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn backgrounds(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Background(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for HeadlessSurface {
    fn background(&mut self, color: Color) {
        self.calls.push(DrawCall::Background(color));
    }

    fn rect(&mut self, origin: Vec2, size: Vec2, fill: Color, stroke_weight: f32) {
        self.calls.push(DrawCall::Rect {
            origin,
            size,
            fill,
            stroke_weight,
        });
    }

    fn circle(&mut self, center: Vec2, diameter: f32, fill: Color) {
        self.calls.push(DrawCall::Circle {
            center,
            diameter,
            fill,
        });
    }

    fn image(&mut self, image: ImageHandle, origin: Vec2, size: Vec2) {
        self.calls.push(DrawCall::Image {
            image,
            origin,
            size,
        });
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, fill: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            center,
            size,
            fill,
        });
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Sound that only counts what was asked of it; clones share state
#[derive(Debug, Clone, Default)]
pub struct SilentSound {
    plays: Rc<Cell<u32>>,
    playing: Rc<Cell<bool>>,
    looped: Rc<Cell<bool>>,
    volume: Rc<Cell<f32>>,
}

impl SilentSound {
    pub fn plays(&self) -> u32 {
        self.plays.get()
    }

    pub fn is_looped(&self) -> bool {
        self.looped.get()
    }

    /// Last volume set on this sound
    pub fn volume(&self) -> f32 {
        self.volume.get()
    }
}

impl Playable for SilentSound {
    fn play(&self) {
        self.plays.set(self.plays.get() + 1);
        self.looped.set(false);
        self.playing.set(true);
    }

    fn play_looped(&self) {
        self.plays.set(self.plays.get() + 1);
        self.looped.set(true);
        self.playing.set(true);
    }

    fn stop(&self) {
        self.playing.set(false);
    }

    fn is_playing(&self) -> bool {
        self.playing.get()
    }

    fn set_volume(&self, volume: f32) {
        self.volume.set(volume);
    }
}
