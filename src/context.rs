//! Process-wide state shared by every screen
//!
//! Built once at startup and passed by `&mut` into screen hooks, so nothing
//! reaches for globals to find an image, a sound, the clock, or the RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::ImageManager;
use crate::audio::{MusicManager, SfxManager};
use crate::config::GameConfig;
use crate::platform::Clock;
use crate::sim::Viewport;

pub struct Context {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub images: ImageManager,
    pub sfx: SfxManager,
    pub music: MusicManager,
    pub rng: Pcg32,
    clock: Box<dyn Clock>,
}

impl Context {
    pub fn new(config: GameConfig, viewport: Viewport, clock: Box<dyn Clock>, seed: u64) -> Self {
        let mut sfx = SfxManager::new();
        sfx.set_volume(config.audio.sfx_volume);
        let mut music = MusicManager::new();
        music.set_volume(config.audio.music_volume);
        Self {
            config,
            viewport,
            images: ImageManager::images(),
            sfx,
            music,
            rng: Pcg32::seed_from_u64(seed),
            clock,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Flip mute on effects and music together; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.sfx.is_muted();
        self.sfx.set_muted(muted);
        self.music.set_muted(muted);
        log::info!("Sound {}", if muted { "muted" } else { "on" });
        muted
    }

    /// Image and sound loads still in flight
    pub fn assets_pending(&self) -> usize {
        self.images.pending() + self.sfx.pending() + self.music.pending()
    }
}
