//! Board painting: grid cells to pixel primitives

use glam::Vec2;

use super::{Surface, colors};
use crate::assets::ImageManager;
use crate::config::AssetNames;
use crate::sim::Game;

/// Border thickness of the playing field
const WALL_STROKE: f32 = 5.0;
const SEGMENT_STROKE: f32 = 1.0;

/// Draw walls, body, head sprite, food, and any power-up for the current state
///
/// Sprites whose images are missing are skipped.
pub fn paint_board(surface: &mut dyn Surface, game: &Game, images: &ImageManager, names: &AssetNames) {
    let geo = &game.geometry;
    let tile = Vec2::splat(geo.tile_size);

    // Walls
    surface.rect(
        geo.board_origin(),
        Vec2::splat(geo.board_size),
        colors::BOARD,
        WALL_STROKE,
    );

    // Body, everything but the head
    let body_len = game.snake.len() - 1;
    for segment in game.snake.segments().take(body_len) {
        surface.rect(geo.cell_origin(segment), tile, colors::SNAKE_BODY, SEGMENT_STROKE);
    }

    // Head
    if let Some(head_image) = images.handle(&names.head_image) {
        surface.image(head_image, geo.cell_origin(game.snake.head()), tile);
    }

    // Food
    surface.circle(geo.cell_center(game.food.position), geo.tile_size, colors::FOOD);

    // Power-up
    if let Some(power_up) = game.power_ups.current() {
        if let Some(image) = images.handle(&names.power_up_image) {
            surface.image(image, geo.cell_origin(power_up.position), tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::{DrawCall, HeadlessSurface};
    use crate::renderer::ImageHandle;
    use crate::sim::{Food, Position, Viewport};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn game() -> Game {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut game =
            Game::new(&GameConfig::default(), Viewport::new(1200.0, 600.0), 0.0, &mut rng).unwrap();
        game.food = Food {
            position: Position::new(2, 3),
        };
        game
    }

    #[test]
    fn test_paint_board() {
        let names = AssetNames::default();
        let mut images = ImageManager::images();
        images.insert(&names.head_image, ImageHandle(1));

        let mut surface = HeadlessSurface::new();
        paint_board(&mut surface, &game(), &images, &names);

        assert_eq!(
            surface.calls[0],
            DrawCall::Rect {
                origin: Vec2::new(300.0, 0.0),
                size: Vec2::splat(600.0),
                fill: colors::BOARD,
                stroke_weight: WALL_STROKE,
            }
        );
        // Two body rects for a three-segment snake
        assert_eq!(
            surface.count(|c| matches!(c, DrawCall::Rect { stroke_weight, .. } if *stroke_weight == SEGMENT_STROKE)),
            2
        );
        assert!(surface.calls.contains(&DrawCall::Image {
            image: ImageHandle(1),
            origin: Vec2::new(300.0 + 8.0 * 20.0, 15.0 * 20.0),
            size: Vec2::splat(20.0),
        }));
        assert!(surface.calls.contains(&DrawCall::Circle {
            center: Vec2::new(300.0 + 2.5 * 20.0, 3.5 * 20.0),
            diameter: 20.0,
            fill: colors::FOOD,
        }));
    }

    #[test]
    fn test_missing_head_image_is_skipped() {
        let names = AssetNames::default();
        let images = ImageManager::images();
        let mut surface = HeadlessSurface::new();
        paint_board(&mut surface, &game(), &images, &names);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Image { .. })), 0);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Circle { .. })), 1);
    }
}
