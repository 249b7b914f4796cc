//! Playlist and transport state: the controller every UI command goes
//! through.
//!
//! `Player` owns the scanned playlist, the current index and the mode
//! flags, and is the only place that talks to the audio engine. The
//! progress reporter lives here too, as a cancellable repeating task
//! polled by the event loop.

mod model;
mod progress;

pub use model::{PlaybackStatus, Player};
pub use progress::ProgressView;
