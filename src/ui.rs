//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. It
//! owns no transport logic; everything shown comes from `Player` state and
//! the published progress view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::audio::AudioEngine;
use crate::config::UiSettings;
use crate::player::{PlaybackStatus, Player};

/// Render the controls help text, incorporating the volume step.
fn controls_text(volume_step: u8) -> String {
    [
        "[enter] play".to_string(),
        "[p] pause".to_string(),
        "[space] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[-/+] volume -/+{volume_step}"),
        "[r] repeat".to_string(),
        "[s] shuffle".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Render the entire UI into the provided `frame` from the player state.
pub fn draw<E: AudioEngine>(
    frame: &mut Frame,
    player: &Player<E>,
    status_message: &str,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" adagio ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        match player.now_playing() {
            Some(track) => {
                parts.push(format!("Now Playing: {}", track.display));
                let state = match player.status() {
                    PlaybackStatus::Playing => "Playing",
                    PlaybackStatus::Paused => "Paused",
                    PlaybackStatus::Stopped => "Stopped",
                };
                parts.push(state.to_string());
            }
            None => parts.push("Stopped".to_string()),
        }

        parts.push(player.progress().time_text.clone());
        parts.push(player.volume_label());
        parts.push(format!(
            "Repeat: {}",
            if player.repeat() { "ON" } else { "OFF" }
        ));
        parts.push(format!(
            "Shuffle: {}",
            if player.shuffle() { "ON" } else { "OFF" }
        ));

        if !status_message.is_empty() {
            parts.push(status_message.to_string());
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track list, windowed around the current track when it overflows.
    {
        let total = player.tracks().len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel_pos = player.current_index().min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = player.tracks()[start..end]
            .iter()
            .map(|t| ListItem::new(t.display.as_str()))
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Progress gauge
    let progress = player.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(progress.percent)
        .label(progress.time_text.clone());
    frame.render_widget(gauge, chunks[3]);

    // Controls footer
    let footer = Paragraph::new(controls_text(ui_settings.volume_step))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
