//! First screen: waits for assets, then for the click browsers require before audio

use glam::Vec2;

use super::{Command, names};
use crate::context::Context;
use crate::renderer::{Surface, colors};

const LOADING_FRAMES: [&str; 3] = ["Loading .", "Loading . .", "Loading . . ."];
const LOADING_FRAME_MS: f64 = 1_000.0;
const LOGO_SIZE: f32 = 100.0;
const TEXT_SIZE: f32 = 32.0;

#[derive(Debug, Default)]
pub struct LoadingScreen;

impl LoadingScreen {
    pub fn new() -> Self {
        Self
    }

    /// Animated loading text for the given time
    pub fn loading_text(now_ms: f64) -> &'static str {
        let frame = (now_ms.max(0.0) / LOADING_FRAME_MS) as usize % LOADING_FRAMES.len();
        LOADING_FRAMES[frame]
    }

    pub fn render(&self, ctx: &Context, surface: &mut dyn Surface) {
        surface.background(colors::BACKGROUND);
        let center = ctx.viewport.center();

        if ctx.assets_pending() > 0 {
            surface.text(
                Self::loading_text(ctx.now_ms()),
                center,
                TEXT_SIZE,
                colors::TEXT,
            );
            return;
        }

        if let Some(logo) = ctx.images.handle(&ctx.config.assets.head_image) {
            surface.image(
                logo,
                center - Vec2::splat(LOGO_SIZE / 2.0),
                Vec2::splat(LOGO_SIZE),
            );
        }
        surface.text(
            "Click to start!",
            center + Vec2::new(0.0, 75.0),
            TEXT_SIZE,
            colors::TEXT,
        );
    }

    pub fn handle_pointer(&mut self, ctx: &Context) -> Option<Command> {
        if ctx.assets_pending() > 0 {
            log::debug!("Ignoring click, {} assets still loading", ctx.assets_pending());
            return None;
        }
        Some(Command::switch(names::MAIN_MENU))
    }
}
