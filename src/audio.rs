//! Sound effects and music
//!
//! The platform supplies `Playable` handles (an `HtmlAudioElement` on the web,
//! `SilentSound` natively); these managers own them by name.

use crate::assets::AssetRegistry;
use crate::consts::{MUSIC_VOLUME, SFX_VOLUME};

/// A loaded sound the game can start and stop
pub trait Playable {
    /// Play once from the start
    fn play(&self);
    /// Play from the start, repeating until stopped
    fn play_looped(&self);
    /// Stop and rewind
    fn stop(&self);
    fn is_playing(&self) -> bool;
    /// Volume in 0.0 - 1.0
    fn set_volume(&self, volume: f32);
}

/// One-shot sound effects
pub struct SfxManager {
    sounds: AssetRegistry<Box<dyn Playable>>,
    volume: f32,
    muted: bool,
}

impl Default for SfxManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SfxManager {
    pub fn new() -> Self {
        Self {
            sounds: AssetRegistry::new("Sound effect"),
            volume: SFX_VOLUME,
            muted: false,
        }
    }

    pub fn registry_mut(&mut self) -> &mut AssetRegistry<Box<dyn Playable>> {
        &mut self.sounds
    }

    pub fn pending(&self) -> usize {
        self.sounds.pending()
    }

    /// Register a loaded sound effect
    pub fn add(&mut self, name: &str, sound: Box<dyn Playable>) {
        sound.set_volume(self.volume);
        self.sounds.insert(name, sound);
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Mute/unmute all effects
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn play(&self, name: &str) {
        if self.muted {
            return;
        }
        if let Some(sound) = self.sounds.get(name) {
            sound.set_volume(self.volume);
            sound.play();
        }
    }
}

/// Background music tracks
pub struct MusicManager {
    tracks: AssetRegistry<Box<dyn Playable>>,
    volume: f32,
    muted: bool,
}

impl Default for MusicManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicManager {
    pub fn new() -> Self {
        Self {
            tracks: AssetRegistry::new("Music"),
            volume: MUSIC_VOLUME,
            muted: false,
        }
    }

    pub fn registry_mut(&mut self) -> &mut AssetRegistry<Box<dyn Playable>> {
        &mut self.tracks
    }

    pub fn pending(&self) -> usize {
        self.tracks.pending()
    }

    pub fn add(&mut self, name: &str, track: Box<dyn Playable>) {
        track.set_volume(self.effective_volume());
        self.tracks.insert(name, track);
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_volume();
    }

    /// Muted tracks keep playing at zero volume so unmuting resumes in place
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    fn apply_volume(&self) {
        let volume = self.effective_volume();
        for track in self.tracks.values() {
            track.set_volume(volume);
        }
    }

    pub fn play(&self, name: &str, looped: bool) {
        if let Some(track) = self.tracks.get(name) {
            if looped {
                track.play_looped();
            } else {
                track.play();
            }
        }
    }

    /// Stop a playing track; stopping a silent or unknown track is logged
    pub fn stop(&self, name: &str) {
        match self.tracks.get(name) {
            Some(track) if track.is_playing() => track.stop(),
            Some(_) => log::error!("Music \"{}\" is not playing.", name),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SilentSound;

    #[test]
    fn test_music_mute_silences_without_stopping() {
        let track = SilentSound::default();
        let mut music = MusicManager::new();
        music.set_volume(0.5);
        music.add("menu", Box::new(track.clone()));
        assert_eq!(track.volume(), 0.5);

        music.play("menu", true);
        music.set_muted(true);
        assert_eq!(track.volume(), 0.0);
        assert!(track.is_playing());

        music.set_muted(false);
        assert_eq!(track.volume(), 0.5);
    }

    #[test]
    fn test_sfx_play_and_mute() {
        let sound = SilentSound::default();
        let mut sfx = SfxManager::new();
        sfx.add("eat", Box::new(sound.clone()));

        sfx.play("eat");
        sfx.play("missing");
        assert_eq!(sound.plays(), 1);

        sfx.set_muted(true);
        sfx.play("eat");
        assert_eq!(sound.plays(), 1);
    }

    #[test]
    fn test_music_loop_and_stop() {
        let track = SilentSound::default();
        let mut music = MusicManager::new();
        music.add("menu", Box::new(track.clone()));

        music.play("menu", true);
        assert!(track.is_playing());
        assert!(track.is_looped());

        music.stop("menu");
        assert!(!track.is_playing());

        // Stopping again only logs
        music.stop("menu");
        music.stop("unknown");
        assert!(!track.is_playing());
    }
}
