use crate::audio::AudioEngine;
use crate::mpris::MprisHandle;
use crate::player::Player;

pub fn update_mpris<E: AudioEngine>(mpris: &MprisHandle, player: &Player<E>) {
    mpris.set_title(player.now_playing().map(|t| t.display.clone()));
    mpris.set_playback(player.status());
}
