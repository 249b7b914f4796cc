use crate::audio::AudioEngine;
use crate::config;
use crate::player::Player;

/// Apply configured playback defaults before the first frame.
pub fn apply_playback_defaults<E: AudioEngine>(
    player: &mut Player<E>,
    settings: &config::Settings,
) {
    player.set_volume(settings.playback.volume);

    if settings.playback.repeat {
        player.toggle_repeat();
    }
    // Toggling shuffle on permutes the freshly scanned playlist, exactly as
    // if the user had pressed the key.
    if settings.playback.shuffle {
        player.toggle_shuffle();
    }
}
