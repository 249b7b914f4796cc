use std::time::{Duration, Instant};

use super::engine::PlaybackClock;

#[test]
fn clock_runs_while_started() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();

    clock.start(t0);
    assert_eq!(clock.elapsed(t0 + Duration::from_secs(5)), Duration::from_secs(5));
}

#[test]
fn clock_freezes_across_pause_and_accumulates_on_resume() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();

    clock.start(t0);
    clock.pause(t0 + Duration::from_secs(5));

    // Frozen while paused.
    assert_eq!(clock.elapsed(t0 + Duration::from_secs(9)), Duration::from_secs(5));

    clock.start(t0 + Duration::from_secs(9));
    assert_eq!(
        clock.elapsed(t0 + Duration::from_secs(12)),
        Duration::from_secs(8)
    );
}

#[test]
fn clock_reset_discards_everything() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();

    clock.start(t0);
    clock.pause(t0 + Duration::from_secs(30));
    clock.reset();

    assert_eq!(clock.elapsed(t0 + Duration::from_secs(60)), Duration::ZERO);
}

#[test]
fn clock_pause_without_start_is_a_noop() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();

    clock.pause(t0 + Duration::from_secs(3));
    assert_eq!(clock.elapsed(t0 + Duration::from_secs(4)), Duration::ZERO);
}
