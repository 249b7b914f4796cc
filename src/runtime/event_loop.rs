use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{AudioEngine, EngineError};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlaybackStatus, Player};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Latest diagnostic line shown in the status box (toggle messages,
    /// playback errors).
    pub status_message: String,
    /// Last playback status emitted to MPRIS.
    last_mpris_playback: PlaybackStatus,
    /// Last now-playing title emitted to MPRIS.
    last_mpris_title: Option<String>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            status_message: String::new(),
            last_mpris_playback: PlaybackStatus::Stopped,
            last_mpris_title: None,
        }
    }
}

/// Main terminal event loop: drives progress ticks, drawing, MPRIS command
/// dispatch and key handling. Returns `Ok(())` when shutdown is requested.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player<E>,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        player.tick_progress(Instant::now());

        // Keep MPRIS in sync even when changes come from media keys.
        let title = player.now_playing().map(|t| t.display.clone());
        if player.status() != state.last_mpris_playback || title != state.last_mpris_title {
            update_mpris(mpris, player);
            state.last_mpris_playback = player.status();
            state.last_mpris_title = title;
        }

        terminal.draw(|f| ui::draw(f, player, &state.status_message, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, player, state) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, player, control_tx, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Dispatch one transport command. Returns `true` on quit.
fn handle_control_cmd<E: AudioEngine>(
    cmd: ControlCmd,
    player: &mut Player<E>,
    state: &mut EventLoopState,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => report_transport(player.play(), state),
        ControlCmd::Pause => player.pause(),
        ControlCmd::PlayPause => {
            if player.status() == PlaybackStatus::Playing {
                player.pause();
            } else {
                report_transport(player.play(), state);
            }
        }
        ControlCmd::Next => {
            if player.has_tracks() {
                report_transport(player.next(), state);
            }
        }
        ControlCmd::Prev => {
            if player.has_tracks() {
                report_transport(player.previous(), state);
            }
        }
    }
    false
}

/// Engine failures are not retried; they land in the status line.
fn report_transport(result: Result<(), EngineError>, state: &mut EventLoopState) {
    if let Err(e) = result {
        state.status_message = format!("playback error: {e}");
    }
}

/// Handle one key press. Returns `true` on quit.
fn handle_key_event<E: AudioEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    player: &mut Player<E>,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Enter => {
            let _ = control_tx.send(ControlCmd::Play);
        }
        KeyCode::Char('p') => {
            let _ = control_tx.send(ControlCmd::Pause);
        }
        KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('-') | KeyCode::Left => {
            let v = player
                .volume_percent()
                .saturating_sub(settings.ui.volume_step);
            player.set_volume(v);
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
            let v = player
                .volume_percent()
                .saturating_add(settings.ui.volume_step)
                .min(100);
            player.set_volume(v);
        }
        KeyCode::Char('r') => {
            let on = player.toggle_repeat();
            state.status_message = format!("Repeat mode is {}", if on { "ON" } else { "OFF" });
        }
        KeyCode::Char('s') => {
            let on = player.toggle_shuffle();
            state.status_message = format!("Shuffle mode is {}", if on { "ON" } else { "OFF" });
        }
        _ => {}
    }

    false
}
