//! Screens and the screen state machine
//!
//! Each screen is one variant of `Screen`, holding only the state it needs.
//! Screens never switch themselves: they return a `Command` and the
//! `ScreenManager` applies it.

pub mod game_over;
pub mod gameplay;
pub mod loading;
pub mod manager;
pub mod menu;

pub use game_over::GameOverScreen;
pub use gameplay::GameplayScreen;
pub use loading::LoadingScreen;
pub use manager::ScreenManager;
pub use menu::MainMenuScreen;

use glam::Vec2;

use crate::context::Context;
use crate::error::Result;
use crate::platform::Key;
use crate::renderer::Surface;

/// Registered screen names
pub mod names {
    pub const LOADING: &str = "loading";
    pub const MAIN_MENU: &str = "mainMenu";
    pub const GAMEPLAY: &str = "gameplay";
    pub const GAME_OVER: &str = "gameOver";
}

/// Data handed to a screen as it becomes active
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActivationProps {
    #[default]
    None,
    /// Final result of a run, for the game-over screen
    RunResult { score: u32, anchor: Vec2 },
}

/// Requests only the outer shell can carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    /// Show a blocking message
    Alert(String),
    CloseWindow,
    /// Stop scheduling frames
    PauseLoop,
    /// Start scheduling frames again
    ResumeLoop,
}

/// What a screen asks for after handling a call
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Switch {
        to: &'static str,
        props: ActivationProps,
    },
    Shell(ShellRequest),
}

impl Command {
    pub fn switch(to: &'static str) -> Self {
        Command::Switch {
            to,
            props: ActivationProps::None,
        }
    }
}

pub enum Screen {
    Loading(LoadingScreen),
    MainMenu(MainMenuScreen),
    Gameplay(GameplayScreen),
    GameOver(GameOverScreen),
}

impl Screen {
    pub fn on_activate(&mut self, ctx: &mut Context, props: ActivationProps) -> Result<()> {
        match self {
            Screen::Loading(_) => Ok(()),
            Screen::MainMenu(s) => {
                s.on_activate(ctx);
                Ok(())
            }
            Screen::Gameplay(s) => s.on_activate(ctx),
            Screen::GameOver(s) => {
                s.on_activate(props);
                Ok(())
            }
        }
    }

    pub fn on_deactivate(&mut self, ctx: &mut Context) {
        match self {
            Screen::Loading(_) | Screen::GameOver(_) => {}
            Screen::MainMenu(s) => s.on_deactivate(ctx),
            Screen::Gameplay(s) => s.on_deactivate(ctx),
        }
    }

    pub fn render(&mut self, ctx: &mut Context, surface: &mut dyn Surface) -> Option<Command> {
        match self {
            Screen::Loading(s) => {
                s.render(ctx, surface);
                None
            }
            Screen::MainMenu(s) => {
                s.render(ctx, surface);
                None
            }
            Screen::Gameplay(s) => s.render(ctx, surface),
            Screen::GameOver(s) => {
                s.render(surface);
                None
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Command> {
        match self {
            Screen::Loading(_) => None,
            Screen::MainMenu(s) => s.handle_key(key),
            Screen::Gameplay(s) => s.handle_key(key),
            Screen::GameOver(s) => s.handle_key(key),
        }
    }

    pub fn handle_pointer(&mut self, ctx: &mut Context) -> Option<Command> {
        match self {
            Screen::Loading(s) => s.handle_pointer(ctx),
            _ => None,
        }
    }
}
