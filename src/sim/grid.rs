//! Grid cells, directions, and the board's placement on screen

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A cell on the square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir`
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether the cell lies on a `grid_size` × `grid_size` board
    pub fn in_bounds(self, grid_size: u32) -> bool {
        let n = grid_size as i32;
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// Movement direction (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step as (dx, dy)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Placement of the square board inside the viewport
///
/// The board takes the full extent of the shorter axis and is centred along
/// the longer one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub grid_size: u32,
    pub landscape: bool,
    /// Side length of the board in pixels
    pub board_size: f32,
    /// Centering offset along the longer axis
    pub offset: f32,
    pub tile_size: f32,
}

impl GridGeometry {
    /// Fit a `grid_size` board into `viewport`
    ///
    /// Fails when the two viewport dimensions differ by less than
    /// `square_tolerance_tiles` tiles.
    pub fn fit(viewport: Viewport, grid_size: u32, square_tolerance_tiles: f32) -> Result<Self> {
        let landscape = viewport.is_landscape();
        let (board_size, long_side) = if landscape {
            (viewport.height, viewport.width)
        } else {
            (viewport.width, viewport.height)
        };
        let offset = (long_side - board_size) / 2.0;
        let tile_size = board_size / grid_size as f32;

        if (viewport.width - viewport.height).abs() < tile_size * square_tolerance_tiles {
            return Err(Error::ViewportTooSquare {
                width: viewport.width,
                height: viewport.height,
                tile_size,
            });
        }

        Ok(Self {
            grid_size,
            landscape,
            board_size,
            offset,
            tile_size,
        })
    }

    /// Top-left corner of the board
    pub fn board_origin(&self) -> Vec2 {
        if self.landscape {
            Vec2::new(self.offset, 0.0)
        } else {
            Vec2::new(0.0, self.offset)
        }
    }

    /// Centre of the board, where end-of-run messages are anchored
    pub fn board_center(&self) -> Vec2 {
        self.board_origin() + Vec2::splat(self.board_size / 2.0)
    }

    /// Top-left pixel of a cell
    pub fn cell_origin(&self, pos: Position) -> Vec2 {
        self.board_origin() + Vec2::new(pos.x as f32, pos.y as f32) * self.tile_size
    }

    pub fn cell_center(&self, pos: Position) -> Vec2 {
        self.cell_origin(pos) + Vec2::splat(self.tile_size / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_bounds() {
        assert!(Position::new(0, 0).in_bounds(30));
        assert!(Position::new(29, 29).in_bounds(30));
        assert!(!Position::new(30, 15).in_bounds(30));
        assert!(!Position::new(-1, 15).in_bounds(30));
        assert!(!Position::new(4, -1).in_bounds(30));
    }

    #[test]
    fn test_fit_landscape() {
        let geo = GridGeometry::fit(Viewport::new(1200.0, 600.0), 30, 2.0).unwrap();
        assert!(geo.landscape);
        assert_eq!(geo.board_size, 600.0);
        assert_eq!(geo.offset, 300.0);
        assert_eq!(geo.tile_size, 20.0);
        assert_eq!(geo.board_origin(), Vec2::new(300.0, 0.0));
        assert_eq!(geo.board_center(), Vec2::new(600.0, 300.0));
        assert_eq!(geo.cell_origin(Position::new(1, 2)), Vec2::new(320.0, 40.0));
        assert_eq!(geo.cell_center(Position::new(0, 0)), Vec2::new(310.0, 10.0));
    }

    #[test]
    fn test_fit_portrait() {
        let geo = GridGeometry::fit(Viewport::new(300.0, 900.0), 30, 2.0).unwrap();
        assert!(!geo.landscape);
        assert_eq!(geo.tile_size, 10.0);
        assert_eq!(geo.board_origin(), Vec2::new(0.0, 300.0));
        assert_eq!(geo.board_center(), Vec2::new(150.0, 450.0));
    }

    #[test]
    fn test_fit_rejects_near_square() {
        // 600 px board, 20 px tiles: 30 px difference is under two tiles
        let err = GridGeometry::fit(Viewport::new(630.0, 600.0), 30, 2.0).unwrap_err();
        assert!(matches!(err, Error::ViewportTooSquare { .. }));

        // Exactly two tiles is playable
        assert!(GridGeometry::fit(Viewport::new(640.0, 600.0), 30, 2.0).is_ok());
    }
}
