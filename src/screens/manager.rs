//! Screen registry and transitions
//!
//! A small finite-state machine: states are the registered screen names and
//! every transition comes from a `Command::Switch` returned by the active
//! screen (or an explicit `set_active` from the app).

use std::collections::HashMap;

use super::{ActivationProps, Command, Screen, ShellRequest};
use crate::context::Context;
use crate::error::Result;
use crate::platform::Key;
use crate::renderer::Surface;

#[derive(Default)]
pub struct ScreenManager {
    screens: HashMap<String, Screen>,
    active: Option<String>,
}

impl ScreenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a screen; an existing screen with the same name is replaced
    pub fn register(&mut self, name: &str, screen: Screen) {
        if self.screens.insert(name.to_string(), screen).is_some() {
            log::warn!("Screen \"{}\" already exists. Overwriting.", name);
        }
    }

    /// Drop a screen, deactivating it first if it is the active one
    pub fn remove(&mut self, ctx: &mut Context, name: &str) {
        let Some(mut screen) = self.screens.remove(name) else {
            log::error!("Screen \"{}\" does not exist.", name);
            return;
        };
        if self.active.as_deref() == Some(name) {
            screen.on_deactivate(ctx);
            self.active = None;
        }
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Screen> {
        self.active.as_ref().and_then(|name| self.screens.get(name))
    }

    /// Switch to `name`
    ///
    /// Unknown names and the already-active screen are logged and ignored.
    /// Returns whether a switch happened; errors come only from the new
    /// screen's activation.
    pub fn set_active(
        &mut self,
        ctx: &mut Context,
        name: &str,
        props: ActivationProps,
    ) -> Result<bool> {
        if !self.screens.contains_key(name) {
            log::error!("Screen \"{}\" does not exist.", name);
            return Ok(false);
        }
        if self.active.as_deref() == Some(name) {
            log::error!("Trying to activate already active screen \"{}\".", name);
            return Ok(false);
        }

        if let Some(old) = self.active.as_ref().and_then(|n| self.screens.get_mut(n)) {
            old.on_deactivate(ctx);
        }
        log::info!(
            "Screen {} -> {}",
            self.active.as_deref().unwrap_or("<none>"),
            name
        );
        self.active = Some(name.to_string());

        if let Some(screen) = self.screens.get_mut(name) {
            screen.on_activate(ctx, props)?;
        }
        Ok(true)
    }

    pub fn render(
        &mut self,
        ctx: &mut Context,
        surface: &mut dyn Surface,
    ) -> Result<Option<ShellRequest>> {
        let command = self.active_mut().and_then(|s| s.render(ctx, surface));
        self.apply(ctx, command)
    }

    pub fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<Option<ShellRequest>> {
        let command = self.active_mut().and_then(|s| s.handle_key(key));
        self.apply(ctx, command)
    }

    pub fn handle_pointer(&mut self, ctx: &mut Context) -> Result<Option<ShellRequest>> {
        let command = self.active_mut().and_then(|s| s.handle_pointer(ctx));
        self.apply(ctx, command)
    }

    fn active_mut(&mut self) -> Option<&mut Screen> {
        let name = self.active.as_ref()?;
        self.screens.get_mut(name)
    }

    /// Carry out screen switches; hand shell requests back to the caller
    fn apply(&mut self, ctx: &mut Context, command: Option<Command>) -> Result<Option<ShellRequest>> {
        match command {
            None => Ok(None),
            Some(Command::Switch { to, props }) => {
                self.set_active(ctx, to, props)?;
                Ok(None)
            }
            Some(Command::Shell(request)) => Ok(Some(request)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Playable;
    use crate::config::GameConfig;
    use crate::platform::{HeadlessSurface, ManualClock, SilentSound};
    use crate::screens::{
        names, GameOverScreen, GameplayScreen, LoadingScreen, MainMenuScreen,
    };
    use crate::sim::{Direction, Viewport};
    use glam::Vec2;

    fn context() -> (Context, SilentSound, SilentSound) {
        let config = GameConfig::default();
        let menu = SilentSound::default();
        let gameplay = SilentSound::default();
        let mut ctx = Context::new(
            config.clone(),
            Viewport::new(1200.0, 600.0),
            Box::new(ManualClock::new(0.0)),
            42,
        );
        ctx.music.add(&config.assets.menu_music, Box::new(menu.clone()));
        ctx.music.add(&config.assets.gameplay_music, Box::new(gameplay.clone()));
        (ctx, menu, gameplay)
    }

    fn manager() -> ScreenManager {
        let mut screens = ScreenManager::new();
        screens.register(names::LOADING, Screen::Loading(LoadingScreen::new()));
        screens.register(names::MAIN_MENU, Screen::MainMenu(MainMenuScreen::new()));
        screens.register(names::GAMEPLAY, Screen::Gameplay(GameplayScreen::new()));
        screens.register(names::GAME_OVER, Screen::GameOver(GameOverScreen::new()));
        screens
    }

    #[test]
    fn test_no_active_screen_is_a_noop() {
        let (mut ctx, _, _) = context();
        let mut screens = manager();
        let mut surface = HeadlessSurface::new();

        assert_eq!(screens.render(&mut ctx, &mut surface).unwrap(), None);
        assert_eq!(screens.handle_key(&mut ctx, Key::Enter).unwrap(), None);
        assert_eq!(screens.handle_pointer(&mut ctx).unwrap(), None);
        assert!(surface.is_empty());
        assert!(screens.active_name().is_none());
    }

    #[test]
    fn test_unknown_screen_is_ignored() {
        let (mut ctx, _, _) = context();
        let mut screens = manager();
        screens
            .set_active(&mut ctx, names::LOADING, ActivationProps::None)
            .unwrap();

        assert!(!screens
            .set_active(&mut ctx, "credits", ActivationProps::None)
            .unwrap());
        assert_eq!(screens.active_name(), Some(names::LOADING));
    }

    #[test]
    fn test_reactivating_active_screen_is_ignored() {
        let (mut ctx, menu, _) = context();
        let mut screens = manager();
        assert!(screens
            .set_active(&mut ctx, names::MAIN_MENU, ActivationProps::None)
            .unwrap());
        assert_eq!(menu.plays(), 1);

        assert!(!screens
            .set_active(&mut ctx, names::MAIN_MENU, ActivationProps::None)
            .unwrap());
        // No second deactivate/activate pair
        assert_eq!(menu.plays(), 1);
        assert!(menu.is_playing());
    }

    #[test]
    fn test_switch_deactivates_then_activates() {
        let (mut ctx, menu, gameplay) = context();
        let mut screens = manager();
        screens
            .set_active(&mut ctx, names::MAIN_MENU, ActivationProps::None)
            .unwrap();
        assert!(menu.is_playing());

        // Enter on "Start game"
        screens.handle_key(&mut ctx, Key::Enter).unwrap();
        assert_eq!(screens.active_name(), Some(names::GAMEPLAY));
        assert!(!menu.is_playing());
        assert!(gameplay.is_playing());
        assert!(gameplay.is_looped());
    }

    #[test]
    fn test_props_reach_game_over() {
        let (mut ctx, _, _) = context();
        let mut screens = manager();
        screens
            .set_active(
                &mut ctx,
                names::GAME_OVER,
                ActivationProps::RunResult {
                    score: 12,
                    anchor: Vec2::new(600.0, 300.0),
                },
            )
            .unwrap();

        let mut surface = HeadlessSurface::new();
        screens.render(&mut ctx, &mut surface).unwrap();
        assert_eq!(surface.texts(), vec!["You lost :((. Your score was 12!"]);
    }

    #[test]
    fn test_remove_active_screen() {
        let (mut ctx, menu, _) = context();
        let mut screens = manager();
        screens
            .set_active(&mut ctx, names::MAIN_MENU, ActivationProps::None)
            .unwrap();
        screens.remove(&mut ctx, names::MAIN_MENU);
        assert!(screens.active_name().is_none());
        assert!(!menu.is_playing());

        // Removing twice only logs
        screens.remove(&mut ctx, names::MAIN_MENU);
    }

    #[test]
    fn test_double_registration_replaces() {
        let (mut ctx, _, _) = context();
        let mut screens = manager();
        screens.register(names::GAME_OVER, Screen::GameOver(GameOverScreen::new()));
        assert!(screens
            .set_active(&mut ctx, names::GAME_OVER, ActivationProps::None)
            .unwrap());
    }

    #[test]
    fn test_shell_requests_pass_through() {
        let (mut ctx, _, _) = context();
        let mut screens = manager();
        screens
            .set_active(&mut ctx, names::GAMEPLAY, ActivationProps::None)
            .unwrap();
        assert_eq!(
            screens.handle_key(&mut ctx, Key::Pause).unwrap(),
            Some(ShellRequest::PauseLoop)
        );
        assert_eq!(
            screens.handle_key(&mut ctx, Key::Resume).unwrap(),
            Some(ShellRequest::ResumeLoop)
        );
        assert_eq!(
            screens
                .handle_key(&mut ctx, Key::Arrow(Direction::Up))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_gameplay_activation_fails_on_square_viewport() {
        let (mut ctx, _, _) = context();
        ctx.viewport = Viewport::new(800.0, 790.0);
        let mut screens = manager();
        let result = screens.set_active(&mut ctx, names::GAMEPLAY, ActivationProps::None);
        assert!(result.is_err());
    }
}
