//! Main menu

use glam::Vec2;

use super::{Command, ShellRequest, names};
use crate::context::Context;
use crate::platform::Key;
use crate::renderer::{Surface, colors};
use crate::sim::Direction;

const ROW_SPACING: f32 = 50.0;
const TEXT_SIZE: f32 = 32.0;

/// Menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    StartGame,
    Instructions,
    Credits,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::StartGame,
        MenuOption::Instructions,
        MenuOption::Credits,
        MenuOption::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::StartGame => "Start game",
            MenuOption::Instructions => "Instructions",
            MenuOption::Credits => "Credits",
            MenuOption::Exit => "Exit",
        }
    }
}

pub const INSTRUCTIONS: &str =
    "Use arrow keys to control the snake. Eat food to grow and avoid walls and your own body.";
pub const CREDITS: &str = "Enjoy!";

#[derive(Debug, Default)]
pub struct MainMenuScreen {
    selected: usize,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> MenuOption {
        MenuOption::ALL[self.selected]
    }

    pub fn on_activate(&mut self, ctx: &mut Context) {
        ctx.music.play(&ctx.config.assets.menu_music, true);
    }

    pub fn on_deactivate(&mut self, ctx: &mut Context) {
        ctx.music.stop(&ctx.config.assets.menu_music);
    }

    pub fn render(&self, ctx: &Context, surface: &mut dyn Surface) {
        surface.background(colors::BACKGROUND);
        let count = MenuOption::ALL.len() as f32;
        let center = ctx.viewport.center();

        for (i, option) in MenuOption::ALL.iter().enumerate() {
            let y = center.y - (count / 2.0 - i as f32) * ROW_SPACING;
            let fill = if i == self.selected {
                colors::MENU_SELECTED
            } else {
                colors::TEXT
            };
            surface.text(option.label(), Vec2::new(center.x, y), TEXT_SIZE, fill);
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Command> {
        let count = MenuOption::ALL.len();
        match key {
            Key::Arrow(Direction::Up) => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            Key::Arrow(Direction::Down) => {
                self.selected = (self.selected + 1) % count;
                None
            }
            Key::Enter => Some(self.select()),
            _ => None,
        }
    }

    fn select(&self) -> Command {
        match self.selected() {
            MenuOption::StartGame => Command::switch(names::GAMEPLAY),
            MenuOption::Instructions => Command::Shell(ShellRequest::Alert(INSTRUCTIONS.to_string())),
            MenuOption::Credits => Command::Shell(ShellRequest::Alert(CREDITS.to_string())),
            MenuOption::Exit => Command::Shell(ShellRequest::CloseWindow),
        }
    }
}
