// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Render the now playing page.
//!
//! This module renders the current track's artwork stand-in and metadata
//! above the full set of transport controls.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    components::{ControlsLayout, ControlsMode, draw_audio_controls},
    model::PlayerState,
    render::icons::{ART_TRACK, art_glyph},
    theme::Theme,
};

const CONTROLS_WIDTH: u16 = 60;

pub(crate) fn draw_now_playing(
    f: &mut Frame,
    area: Rect,
    state: &PlayerState,
    theme: &Theme,
) -> ControlsLayout {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [info_area, controls_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(ControlsMode::Full.height()),
    ])
    .flex(Flex::Center)
    .spacing(1)
    .areas(inner);

    f.render_widget(
        Paragraph::new(track_info(state, theme)).alignment(Alignment::Center),
        info_area,
    );

    let [controls_area] = Layout::horizontal([Constraint::Max(CONTROLS_WIDTH)])
        .flex(Flex::Center)
        .areas(controls_area);

    draw_audio_controls(f, controls_area, state, ControlsMode::Full, theme)
}

fn track_info<'a>(state: &'a PlayerState, theme: &Theme) -> Vec<Line<'a>> {
    let Some(track) = state.current_track() else {
        return vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing playing",
                Style::default()
                    .fg(theme.heading_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Pick a dzikir from a collection to start listening",
                Style::default().fg(theme.placeholder_fg),
            )),
        ];
    };

    let position = state.current_playlist().and_then(|playlist| {
        playlist
            .position_of(&track.id)
            .map(|index| format!("{} | {} of {}", playlist.name, index + 1, playlist.tracks.len()))
    });

    vec![
        Line::from(Span::styled(
            art_glyph(track.album_art.as_deref(), ART_TRACK),
            Style::default().fg(theme.accent_colour),
        )),
        Line::from(""),
        Line::from(Span::styled(
            track.title.as_str(),
            Style::default()
                .fg(theme.heading_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(track.artist.as_str(), Style::default().fg(theme.text_fg))),
        Line::from(Span::styled(track.album.as_str(), Style::default().fg(theme.muted_fg))),
        Line::from(Span::styled(
            position.unwrap_or_default(),
            Style::default().fg(theme.muted_fg),
        )),
    ]
}
