use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;

use crate::audio::{AudioEngine, EngineError};
use crate::config::LibrarySettings;
use crate::library::{Track, scan};

use super::progress::{ProgressReporter, ProgressView};

/// Playback state derived for the UI and MPRIS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The playlist/transport state manager.
///
/// Every operation is a safe no-op on an empty playlist, and `current`
/// stays within bounds after every transition: indices wrap, they are
/// never clamped.
pub struct Player<E: AudioEngine> {
    engine: E,
    tracks: Vec<Track>,
    current: usize,
    paused: bool,
    repeat: bool,
    shuffle: bool,
    volume: f32,
    volume_percent: u8,
    song_length: Duration,
    progress: ProgressReporter,
    music_dir: PathBuf,
    library: LibrarySettings,
}

impl<E: AudioEngine> Player<E> {
    pub fn new(
        engine: E,
        tracks: Vec<Track>,
        music_dir: PathBuf,
        library: LibrarySettings,
        tick_interval: Duration,
    ) -> Self {
        Self {
            engine,
            tracks,
            current: 0,
            paused: false,
            repeat: false,
            shuffle: false,
            volume: 0.5,
            volume_percent: 50,
            song_length: Duration::ZERO,
            progress: ProgressReporter::new(tick_interval),
            music_dir,
            library,
        }
    }

    /// Start or resume playback.
    ///
    /// Resuming from pause continues in place (no reload, no seek).
    /// Otherwise the current track is freshly loaded, the volume applied,
    /// its duration captured and a new progress session started.
    pub fn play(&mut self) -> Result<(), EngineError> {
        if self.tracks.is_empty() {
            return Ok(());
        }

        if self.paused {
            self.engine.unpause();
            self.paused = false;
            return Ok(());
        }

        let path = self.tracks[self.current].path.clone();
        self.engine.load(&path)?;
        self.engine.set_volume(self.volume);
        self.engine.play();
        self.song_length = self.engine.track_duration(&path).unwrap_or_default();
        self.progress.start(Instant::now(), self.song_length);
        Ok(())
    }

    /// Pause in place. No-op when already paused or nothing is loaded.
    pub fn pause(&mut self) {
        if self.paused || !self.engine.is_loaded() {
            return;
        }
        self.engine.pause();
        self.paused = true;
    }

    /// Advance to the next track (wrapping) and play it from the beginning.
    pub fn next(&mut self) -> Result<(), EngineError> {
        self.step(1)
    }

    /// Step back to the previous track (wrapping) and play it from the
    /// beginning.
    pub fn previous(&mut self) -> Result<(), EngineError> {
        let len = self.tracks.len();
        if len == 0 {
            return Ok(());
        }
        self.step(len - 1)
    }

    fn step(&mut self, delta: usize) -> Result<(), EngineError> {
        if self.tracks.is_empty() {
            return Ok(());
        }

        self.progress.cancel();
        self.current = (self.current + delta) % self.tracks.len();
        // A fresh load of the new track, even if the old one was paused.
        self.paused = false;
        self.play()
    }

    /// Set the volume from a 0 to 100 slider value. Applied immediately,
    /// mid-playback included.
    pub fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.volume_percent = percent;
        self.volume = f32::from(percent) / 100.0;
        self.engine.set_volume(self.volume);
    }

    /// Flip repeat mode and return the new value.
    ///
    /// The flag is advisory: it is displayed and reported but nothing
    /// consults it when sequencing tracks.
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    /// Flip shuffle mode and return the new value.
    ///
    /// Turning shuffle on permutes the playlist in memory; `current` keeps
    /// its numeric value, so it may now name a different track. Turning
    /// shuffle off rebuilds the playlist from a fresh directory scan,
    /// discarding the shuffled order; if the directory changed meanwhile
    /// the restored order differs from the original. Either way `current`
    /// is re-wrapped into bounds afterwards.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        if self.shuffle {
            self.tracks.shuffle(&mut rand::rng());
        } else {
            self.tracks = scan(&self.music_dir, &self.library);
        }

        if self.tracks.is_empty() {
            self.current = 0;
        } else {
            self.current %= self.tracks.len();
        }
        self.shuffle
    }

    /// Drive the progress reporter; called once per event-loop iteration.
    /// Does nothing while no session is active.
    pub fn tick_progress(&mut self, now: Instant) {
        if !self.progress.is_active() {
            return;
        }
        let position = self.engine.position();
        self.progress.tick(now, position);
    }

    pub fn progress(&self) -> &ProgressView {
        self.progress.view()
    }

    pub fn status(&self) -> PlaybackStatus {
        if !self.engine.is_loaded() {
            PlaybackStatus::Stopped
        } else if self.paused {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Playing
        }
    }

    /// The track the player is pointed at, once something is loaded.
    pub fn now_playing(&self) -> Option<&Track> {
        if self.engine.is_loaded() {
            self.tracks.get(self.current)
        } else {
            None
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume_percent
    }

    /// The text shown next to the volume slider.
    pub fn volume_label(&self) -> String {
        format!("Volume: {}%", self.volume_percent)
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[cfg(test)]
    pub(crate) fn progress_is_active(&self) -> bool {
        self.progress.is_active()
    }
}
