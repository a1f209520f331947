//! Gameplay screen: runs a `Game` and paints it

use super::{ActivationProps, Command, ShellRequest, names};
use crate::context::Context;
use crate::error::Result;
use crate::platform::Key;
use crate::renderer::{Color, Surface, colors, paint_board};
use crate::sim::{EffectFrame, Game, PowerUpKind, Step};

#[derive(Debug, Default)]
pub struct GameplayScreen {
    game: Option<Game>,
    /// Wipe the canvas on the next frame (set on activation)
    clear_pending: bool,
}

impl GameplayScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    /// Start a fresh run; fails if the viewport cannot hold the board
    pub fn on_activate(&mut self, ctx: &mut Context) -> Result<()> {
        let now = ctx.now_ms();
        match self.game.as_mut() {
            Some(game) => game.reset(ctx.viewport, now, &mut ctx.rng)?,
            None => self.game = Some(Game::new(&ctx.config, ctx.viewport, now, &mut ctx.rng)?),
        }
        self.clear_pending = true;
        ctx.music.play(&ctx.config.assets.gameplay_music, true);
        Ok(())
    }

    pub fn on_deactivate(&mut self, ctx: &mut Context) {
        ctx.music.stop(&ctx.config.assets.gameplay_music);
    }

    /// Update effects, maybe step the snake, and repaint after a step
    ///
    /// The board is only repainted when the snake moved; between steps the
    /// canvas keeps the previous frame.
    pub fn render(&mut self, ctx: &mut Context, surface: &mut dyn Surface) -> Option<Command> {
        let game = self.game.as_mut()?;
        if self.clear_pending {
            surface.background(colors::BACKGROUND);
            self.clear_pending = false;
        }

        let now = ctx.now_ms();
        match game.update_power_up(now, &mut ctx.rng) {
            EffectFrame::Active(PowerUpKind::Strobe) => {
                surface.background(Color::random(&mut ctx.rng));
            }
            EffectFrame::Expired => surface.background(colors::BACKGROUND),
            EffectFrame::None => {}
        }

        match game.tick(now, &mut ctx.rng) {
            Step::Waiting => None,
            Step::Died { score, anchor } => Some(Command::Switch {
                to: names::GAME_OVER,
                props: ActivationProps::RunResult { score, anchor },
            }),
            Step::Moved { ate, power_up } => {
                let assets = &ctx.config.assets;
                if ate {
                    ctx.sfx.play(&assets.eat_sfx);
                }
                if power_up.is_some() {
                    ctx.sfx.play(&assets.power_up_sfx);
                }
                paint_board(surface, game, &ctx.images, assets);
                None
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Pause => {
                log::info!("Stopping the game");
                Some(Command::Shell(ShellRequest::PauseLoop))
            }
            Key::Resume => {
                log::info!("Resuming the game");
                Some(Command::Shell(ShellRequest::ResumeLoop))
            }
            other => {
                if let Some(game) = self.game.as_mut() {
                    game.handle_key(other);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::{DrawCall, HeadlessSurface, ManualClock, SilentSound};
    use crate::sim::{Direction, Food, Position, Viewport};

    struct Harness {
        ctx: Context,
        clock: ManualClock,
        eat: SilentSound,
        screen: GameplayScreen,
        surface: HeadlessSurface,
    }

    fn harness() -> Harness {
        let clock = ManualClock::new(0.0);
        let mut config = GameConfig::default();
        config.power_up.enabled = false;
        let mut ctx = Context::new(
            config.clone(),
            Viewport::new(1200.0, 600.0),
            Box::new(clock.clone()),
            3,
        );
        let eat = SilentSound::default();
        ctx.sfx.add(&config.assets.eat_sfx, Box::new(eat.clone()));

        let mut screen = GameplayScreen::new();
        screen.on_activate(&mut ctx).unwrap();
        Harness {
            ctx,
            clock,
            eat,
            screen,
            surface: HeadlessSurface::new(),
        }
    }

    #[test]
    fn test_render_between_ticks_draws_nothing_new() {
        let mut h = harness();
        h.screen.render(&mut h.ctx, &mut h.surface);
        // Only the activation wipe
        assert_eq!(h.surface.backgrounds(), vec![colors::BACKGROUND]);
        assert_eq!(h.surface.calls.len(), 1);

        h.surface.clear();
        h.clock.set(50.0);
        assert!(h.screen.render(&mut h.ctx, &mut h.surface).is_none());
        assert!(h.surface.is_empty());

        h.clock.set(100.0);
        h.screen.render(&mut h.ctx, &mut h.surface);
        assert!(!h.surface.is_empty());
        assert_eq!(
            h.screen.game().unwrap().snake.head(),
            Position::new(9, 15)
        );
    }

    #[test]
    fn test_eating_plays_sound() {
        let mut h = harness();
        h.screen.game_mut().unwrap().food = Food {
            position: Position::new(9, 15),
        };
        h.clock.set(100.0);
        h.screen.render(&mut h.ctx, &mut h.surface);
        assert_eq!(h.eat.plays(), 1);
        assert_eq!(h.screen.game().unwrap().score, 1);
    }

    #[test]
    fn test_crash_switches_to_game_over() {
        let mut h = harness();
        h.screen.game_mut().unwrap().food = Food {
            position: Position::new(0, 0),
        };
        h.screen.handle_key(Key::Arrow(Direction::Up));

        let mut now = 0.0;
        let command = loop {
            now += 100.0;
            h.clock.set(now);
            h.surface.clear();
            if let Some(command) = h.screen.render(&mut h.ctx, &mut h.surface) {
                break command;
            }
        };

        // Head at y=15 moving up: 15 safe moves, the 16th leaves the board
        assert_eq!(now, 1_600.0);
        assert!(matches!(
            command,
            Command::Switch {
                to: names::GAME_OVER,
                props: ActivationProps::RunResult { score: 0, .. }
            }
        ));
        // Crash frame is not repainted
        assert_eq!(h.surface.count(|c| matches!(c, DrawCall::Rect { .. })), 0);
    }

    #[test]
    fn test_reactivation_starts_fresh_run() {
        let mut h = harness();
        h.clock.set(100.0);
        h.screen.render(&mut h.ctx, &mut h.surface);
        h.screen.game_mut().unwrap().score = 9;

        h.screen.on_deactivate(&mut h.ctx);
        h.screen.on_activate(&mut h.ctx).unwrap();
        let game = h.screen.game().unwrap();
        assert_eq!(game.score, 0);
        assert_eq!(game.snake.head(), Position::new(8, 15));
    }

    #[test]
    fn test_strobe_flashes_background() {
        let clock = ManualClock::new(0.0);
        let mut config = GameConfig::default();
        config.power_up.spawn_interval_ms = 0.0;
        let mut ctx = Context::new(
            config,
            Viewport::new(1200.0, 600.0),
            Box::new(clock.clone()),
            4,
        );
        let mut screen = GameplayScreen::new();
        screen.on_activate(&mut ctx).unwrap();
        screen
            .game_mut()
            .unwrap()
            .snake
            .apply_effect(PowerUpKind::Strobe, 0.0);

        let mut surface = HeadlessSurface::new();
        clock.set(10.0);
        screen.render(&mut ctx, &mut surface);
        // Activation wipe plus one flash
        assert_eq!(surface.backgrounds().len(), 2);

        surface.clear();
        clock.set(5_001.0);
        screen.render(&mut ctx, &mut surface);
        assert_eq!(surface.backgrounds()[0], colors::BACKGROUND);
        assert!(screen.game().unwrap().snake.effect.is_none());
    }
}
