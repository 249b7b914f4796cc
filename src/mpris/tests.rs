use super::*;
use std::sync::mpsc;

#[test]
fn handle_updates_shared_playback_and_title() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_playback(PlaybackStatus::Playing);
    handle.set_title(Some("song.mp3".to_string()));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.playback, PlaybackStatus::Playing);
        assert_eq!(s.title.as_deref(), Some("song.mp3"));
    }

    handle.set_title(None);
    assert_eq!(state.lock().unwrap().title, None);
}

#[test]
fn playback_status_maps_state_to_spec_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");

    state.lock().unwrap().playback = PlaybackStatus::Playing;
    assert_eq!(iface.playback_status(), "Playing");

    state.lock().unwrap().playback = PlaybackStatus::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn transport_methods_post_commands_into_the_channel() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play();
    iface.pause();
    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();

    let received: Vec<ControlCmd> = rx.try_iter().collect();
    assert!(matches!(
        received.as_slice(),
        [
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            // Stop maps to Pause; the player has no stop operation.
            ControlCmd::Pause,
        ]
    ));
}

#[test]
fn metadata_always_carries_a_title_entry() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert!(iface.metadata().contains_key("xesam:title"));

    state.lock().unwrap().title = Some("song.mp3".to_string());
    assert!(iface.metadata().contains_key("xesam:title"));
}
