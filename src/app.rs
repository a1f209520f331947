//! Top-level driver shared by the web shell and the native binary
//!
//! Owns the `Context` and the `ScreenManager`, forwards frames and input to
//! the active screen, and turns fatal errors into a halted app plus a
//! blocking alert.

use crate::config::GameConfig;
use crate::context::Context;
use crate::error::Result;
use crate::platform::{Clock, Key};
use crate::renderer::Surface;
use crate::screens::{
    names, ActivationProps, GameOverScreen, GameplayScreen, LoadingScreen, MainMenuScreen, Screen,
    ScreenManager, ShellRequest,
};
use crate::sim::{GridGeometry, Viewport};

pub struct App {
    pub ctx: Context,
    pub screens: ScreenManager,
    /// False while the frame loop is paused
    running: bool,
    /// Set once a fatal error stopped the game
    halted: bool,
}

impl App {
    /// Validate config and viewport, register every screen, and show the loading screen
    pub fn new(config: GameConfig, viewport: Viewport, clock: Box<dyn Clock>, seed: u64) -> Result<Self> {
        config.validate()?;
        // Refuse a near-square viewport before anything is shown
        GridGeometry::fit(viewport, config.grid_size, config.square_tolerance_tiles)?;

        let mut ctx = Context::new(config, viewport, clock, seed);
        let mut screens = ScreenManager::new();
        screens.register(names::LOADING, Screen::Loading(LoadingScreen::new()));
        screens.register(names::MAIN_MENU, Screen::MainMenu(MainMenuScreen::new()));
        screens.register(names::GAMEPLAY, Screen::Gameplay(GameplayScreen::new()));
        screens.register(names::GAME_OVER, Screen::GameOver(GameOverScreen::new()));
        screens.set_active(&mut ctx, names::LOADING, ActivationProps::None)?;

        log::info!(
            "App ready: viewport {}x{}, seed {}",
            viewport.width,
            viewport.height,
            seed
        );

        Ok(Self {
            ctx,
            screens,
            running: true,
            halted: false,
        })
    }

    /// Whether the shell should keep scheduling frames
    pub fn is_running(&self) -> bool {
        self.running && !self.halted
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Render one animation frame
    pub fn frame(&mut self, surface: &mut dyn Surface) -> Option<ShellRequest> {
        if !self.is_running() {
            return None;
        }
        let result = self.screens.render(&mut self.ctx, surface);
        self.settle(result)
    }

    /// Handle a raw DOM key code
    pub fn key_pressed(&mut self, code: u32) -> Option<ShellRequest> {
        if self.halted {
            return None;
        }
        let key = Key::from_code(code);
        // Mute works on every screen
        if key == Key::Mute {
            self.ctx.toggle_mute();
            return None;
        }
        let result = self.screens.handle_key(&mut self.ctx, key);
        self.settle(result)
    }

    /// Handle a mouse press or touch start
    pub fn pointer_pressed(&mut self) -> Option<ShellRequest> {
        if self.halted {
            return None;
        }
        let result = self.screens.handle_pointer(&mut self.ctx);
        self.settle(result)
    }

    /// Apply loop requests to our own state and decide what the shell must do
    fn settle(&mut self, result: Result<Option<ShellRequest>>) -> Option<ShellRequest> {
        match result {
            Ok(Some(ShellRequest::PauseLoop)) => {
                self.running = false;
                Some(ShellRequest::PauseLoop)
            }
            Ok(Some(ShellRequest::ResumeLoop)) => {
                if self.running {
                    None
                } else {
                    self.running = true;
                    Some(ShellRequest::ResumeLoop)
                }
            }
            Ok(request) => request,
            Err(e) => {
                log::error!("Fatal: {}", e);
                self.halted = true;
                Some(ShellRequest::Alert(e.user_message()))
            }
        }
    }
}
