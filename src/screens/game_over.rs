//! End-of-run screen

use glam::Vec2;

use super::{ActivationProps, Command, names};
use crate::platform::Key;
use crate::renderer::{Surface, colors};

const TEXT_SIZE: f32 = 32.0;

#[derive(Debug, Default)]
pub struct GameOverScreen {
    score: u32,
    /// Where the message is centred, usually the middle of the board
    anchor: Vec2,
}

impl GameOverScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn on_activate(&mut self, props: ActivationProps) {
        match props {
            ActivationProps::RunResult { score, anchor } => {
                self.score = score;
                self.anchor = anchor;
                log::info!("Game over, score {}", score);
            }
            ActivationProps::None => {
                log::warn!("Game over screen activated without a run result");
            }
        }
    }

    pub fn message(&self) -> String {
        format!("You lost :((. Your score was {}!", self.score)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.background(colors::GAME_OVER);
        surface.text(&self.message(), self.anchor, TEXT_SIZE, colors::TEXT);
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Escape => Some(Command::switch(names::MAIN_MENU)),
            Key::Enter => Some(Command::switch(names::GAMEPLAY)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCall, HeadlessSurface};

    #[test]
    fn test_render_at_anchor() {
        let mut screen = GameOverScreen::new();
        screen.on_activate(ActivationProps::RunResult {
            score: 4,
            anchor: Vec2::new(150.0, 450.0),
        });

        let mut surface = HeadlessSurface::new();
        screen.render(&mut surface);
        assert_eq!(surface.calls[0], DrawCall::Background(colors::GAME_OVER));
        assert_eq!(
            surface.calls[1],
            DrawCall::Text {
                text: "You lost :((. Your score was 4!".to_string(),
                center: Vec2::new(150.0, 450.0),
                size: TEXT_SIZE,
                fill: colors::TEXT,
            }
        );
    }

    #[test]
    fn test_keys() {
        let mut screen = GameOverScreen::new();
        assert_eq!(screen.handle_key(Key::Escape), Some(Command::switch(names::MAIN_MENU)));
        assert_eq!(screen.handle_key(Key::Enter), Some(Command::switch(names::GAMEPLAY)));
        assert_eq!(screen.handle_key(Key::Pause), None);
    }
}
