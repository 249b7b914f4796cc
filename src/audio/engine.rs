use std::path::Path;
use std::time::{Duration, Instant};

use lofty::prelude::AudioFile;
use lofty::probe::Probe;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::create_sink;
use super::types::EngineError;

/// The external audio mixer the player drives.
///
/// At most one track is loaded at a time; loading replaces the previous
/// one. `unpause` resumes in place and is distinct from a fresh `play`.
pub trait AudioEngine {
    /// Load `path`, replacing any previously loaded track. The engine is
    /// left paused at position zero.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;
    /// Start playback of the loaded track.
    fn play(&mut self);
    /// Pause playback in place.
    fn pause(&mut self);
    /// Resume paused playback in place.
    fn unpause(&mut self);
    /// Apply `volume` (0.0 to 1.0) immediately, mid-playback included.
    fn set_volume(&mut self, volume: f32);
    /// Elapsed playback position of the loaded track.
    fn position(&self) -> Duration;
    /// Total duration of `path`, read from its audio properties without
    /// decoding the stream.
    fn track_duration(&self, path: &Path) -> Option<Duration>;
    /// Whether a track is currently loaded.
    fn is_loaded(&self) -> bool;
}

/// Wall-clock position tracker for the loaded track.
///
/// rodio does not report a playback position, so the engine mirrors how it
/// drives the sink: `accumulated` holds time played before the last pause,
/// `started_at` marks the currently running segment.
#[derive(Debug, Default)]
pub(super) struct PlaybackClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl PlaybackClock {
    pub(super) fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    pub(super) fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub(super) fn pause(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.duration_since(st);
        }
    }

    pub(super) fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.duration_since(st))
    }
}

/// [`AudioEngine`] backed by the default rodio output stream.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
    clock: PlaybackClock,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn new() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            volume: 1.0,
            clock: PlaybackClock::default(),
        })
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = create_sink(&self.stream, path)?;
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        self.clock.reset();
        Ok(())
    }

    fn play(&mut self) {
        if let Some(ref s) = self.sink {
            s.play();
            self.clock.start(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(ref s) = self.sink {
            s.pause();
            self.clock.pause(Instant::now());
        }
    }

    fn unpause(&mut self) {
        if let Some(ref s) = self.sink {
            s.play();
            self.clock.start(Instant::now());
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(ref s) = self.sink {
            s.set_volume(volume);
        }
    }

    fn position(&self) -> Duration {
        self.clock.elapsed(Instant::now())
    }

    fn track_duration(&self, path: &Path) -> Option<Duration> {
        let tagged = Probe::open(path).ok()?.read().ok()?;
        Some(tagged.properties().duration())
    }

    fn is_loaded(&self) -> bool {
        self.sink.is_some()
    }
}
