//! The audio engine: a thin seam over the `rodio` mixer.
//!
//! Transport logic talks to [`AudioEngine`] only, so it can be exercised
//! in tests without an output device.

mod engine;
mod sink;
mod types;

pub use engine::{AudioEngine, RodioEngine};
pub use types::EngineError;

#[cfg(test)]
mod tests;
