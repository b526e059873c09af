use anyhow::Result;
use std::path::{Path, PathBuf};

/// Media playback collaborator. Decoding and device output live behind
/// this seam; end-of-media is an external event the shell delivers back
/// to the controller when its backend reports one.
pub trait MediaPlayer {
    fn play(&mut self, path: &Path) -> Result<()>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// Gain in 0.0..=1.0.
    fn set_volume(&mut self, volume: f32);
    fn current_track(&self) -> Option<&Path>;
}

/// State-only player for shells without an audio device and for tests.
pub struct NullPlayer {
    current: Option<PathBuf>,
    paused: bool,
    volume: f32,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self {
            current: None,
            paused: false,
            volume: 1.0,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Default for NullPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPlayer for NullPlayer {
    fn play(&mut self, path: &Path) -> Result<()> {
        self.current = Some(path.to_path_buf());
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        if self.current.is_some() {
            self.paused = false;
        }
    }

    fn stop(&mut self) {
        self.current = None;
        self.paused = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn current_track(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_replaces_current_and_clears_pause() {
        let mut player = NullPlayer::new();
        player.play(Path::new("a.mp3")).expect("play");
        player.pause();
        assert!(player.is_paused());

        player.play(Path::new("b.mp3")).expect("play");
        assert!(!player.is_paused());
        assert_eq!(player.current_track(), Some(Path::new("b.mp3")));
    }

    #[test]
    fn stop_clears_current() {
        let mut player = NullPlayer::new();
        player.play(Path::new("a.mp3")).expect("play");
        player.stop();
        assert_eq!(player.current_track(), None);
    }
}
