//! Drawing target abstraction
//!
//! Screens draw through `Surface`, which exposes the handful of immediate-mode
//! primitives the game needs. Coordinates are top-left-origin pixels.

pub mod board;

pub use board::paint_board;

use glam::Vec2;
use rand::Rng;

/// Opaque handle to a loaded image, issued by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }

    /// CSS colour string for canvas fill/stroke styles
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const BACKGROUND: Color = WHITE;
    pub const BOARD: Color = WHITE;
    pub const SNAKE_BODY: Color = WHITE;
    pub const FOOD: Color = WHITE;
    pub const TEXT: Color = BLACK;
    pub const MENU_SELECTED: Color = BLUE;
    pub const GAME_OVER: Color = RED;
}

/// Immediate-mode drawing primitives
///
/// Shapes are filled with the given colour and outlined in black.
pub trait Surface {
    /// Fill the whole surface
    fn background(&mut self, color: Color);
    fn rect(&mut self, origin: Vec2, size: Vec2, fill: Color, stroke_weight: f32);
    fn circle(&mut self, center: Vec2, diameter: f32, fill: Color);
    fn image(&mut self, image: ImageHandle, origin: Vec2, size: Vec2);
    /// Text centred on `center`
    fn text(&mut self, text: &str, center: Vec2, size: f32, fill: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(colors::RED.to_css(), "rgb(255, 0, 0)");
        assert_eq!(Color::rgb(1, 2, 3).to_css(), "rgb(1, 2, 3)");
    }
}
