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

//! UI rendering logic for the collections page.
//!
//! Rendering is a pure function of its inputs: the same collections, player
//! snapshot, cursor and area always produce the same buffer and the same
//! [`PlaylistLayout`]. The scroll offset is derived from the cursor so no
//! hidden scroll state exists.

use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    components::{
        audio_controls::{ControlsLayout, ControlsMode, draw_audio_controls},
        playlist::{CursorFocus, PlaylistCursor, PlaylistLayout, RowTarget},
    },
    model::{PlayerState, Playlist, Track},
    render::icons::{ART_COLLECTION, ART_TRACK, ICON_PAUSE, ICON_PLAY, art_glyph},
    theme::Theme,
    util::format::{format_time, format_total},
};

const MINI_BAR_HEIGHT: u16 = 2;
const MINI_CONTROLS_WIDTH: u16 = 13;

/// One line of the scrolling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListLine {
    Header(usize),
    Track {
        playlist: usize,
        track: usize,
        position: usize,
    },
    NoTracks,
    Spacer,
}

/// Draws the collections page and returns its click targets.
pub(crate) fn render_playlists(
    f: &mut Frame,
    area: Rect,
    playlists: &[Arc<Playlist>],
    state: &PlayerState,
    cursor: &PlaylistCursor,
    theme: &Theme,
) -> PlaylistLayout {
    let (list_area, mini_area) = if state.current_track().is_some() {
        let chunks =
            Layout::vertical([Constraint::Min(0), Constraint::Length(MINI_BAR_HEIGHT)]).split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let rows = if playlists.is_empty() {
        draw_no_collections(f, list_area, theme);
        Vec::new()
    } else {
        draw_list(f, list_area, playlists, state, cursor, theme)
    };

    let mini_controls = mini_area.map(|mini_area| draw_mini_bar(f, mini_area, state, theme));

    PlaylistLayout {
        rows,
        mini_controls,
    }
}

fn draw_no_collections(f: &mut Frame, area: Rect, theme: &Theme) {
    let [message_area] = Layout::vertical([Constraint::Length(2)])
        .flex(Flex::Center)
        .areas(area);

    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            "No Collections",
            Style::default()
                .fg(theme.heading_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "No dzikir collections are available",
            Style::default().fg(theme.placeholder_fg),
        )),
    ])
    .alignment(Alignment::Center);

    f.render_widget(message, message_area);
}

fn list_lines(playlists: &[Arc<Playlist>]) -> Vec<ListLine> {
    let mut lines = Vec::new();
    let mut position = 0;

    for (playlist_index, playlist) in playlists.iter().enumerate() {
        if playlist_index > 0 {
            lines.push(ListLine::Spacer);
        }
        lines.push(ListLine::Header(playlist_index));

        if playlist.tracks.is_empty() {
            lines.push(ListLine::NoTracks);
        }
        for track_index in 0..playlist.tracks.len() {
            lines.push(ListLine::Track {
                playlist: playlist_index,
                track: track_index,
                position,
            });
            position += 1;
        }
    }

    lines
}

// First visible line such that the cursor line is on screen.
fn scroll_offset(lines: &[ListLine], cursor: &PlaylistCursor, height: usize) -> usize {
    let cursor_line = lines
        .iter()
        .position(|line| matches!(line, ListLine::Track { position, .. } if *position == cursor.position()))
        .unwrap_or(0);

    if height == 0 || cursor_line < height {
        0
    } else {
        cursor_line + 1 - height
    }
}

fn draw_list(
    f: &mut Frame,
    area: Rect,
    playlists: &[Arc<Playlist>],
    state: &PlayerState,
    cursor: &PlaylistCursor,
    theme: &Theme,
) -> Vec<RowTarget> {
    let area = Block::default().padding(Padding::horizontal(1)).inner(area);
    let lines = list_lines(playlists);
    let height = usize::from(area.height);
    let offset = scroll_offset(&lines, cursor, height);

    let mut rows = Vec::new();

    for (screen_row, line) in lines.iter().skip(offset).take(height).enumerate() {
        // `screen_row` is bounded by `area.height`.
        let line_area = Rect::new(area.x, area.y + screen_row as u16, area.width, 1);

        match *line {
            ListLine::Header(index) => draw_header(f, line_area, &playlists[index], theme),
            ListLine::NoTracks => {
                let placeholder = Paragraph::new("   No dzikir tracks in this collection").style(
                    Style::default()
                        .fg(theme.placeholder_fg)
                        .add_modifier(Modifier::ITALIC),
                );
                f.render_widget(placeholder, line_area);
            }
            ListLine::Spacer => {}
            ListLine::Track {
                playlist,
                track,
                position,
            } => {
                let track = &playlists[playlist].tracks[track];
                let focus = (cursor.position() == position).then(|| cursor.focus());
                let affordance = draw_track_row(f, line_area, track, state, focus, theme);
                rows.push(RowTarget {
                    position,
                    area: line_area,
                    affordance,
                });
            }
        }
    }

    rows
}

fn draw_header(f: &mut Frame, area: Rect, playlist: &Playlist, theme: &Theme) {
    let muted = Style::default().fg(theme.muted_fg);

    let header = Line::from(vec![
        Span::styled(
            art_glyph(playlist.cover_art.as_deref(), ART_COLLECTION),
            Style::default().fg(theme.accent_colour),
        ),
        Span::raw(" "),
        Span::styled(
            playlist.name.as_str(),
            Style::default()
                .fg(theme.heading_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {} tracks", playlist.tracks.len()), muted),
        Span::styled(format!(" | {}", format_total(playlist.total_duration())), muted),
    ]);

    f.render_widget(Paragraph::new(header), area);
}

/// Draws one track row, returning the affordance area on the current row.
///
/// `focus` is set when the cursor is on this row.
fn draw_track_row(
    f: &mut Frame,
    area: Rect,
    track: &Track,
    state: &PlayerState,
    focus: Option<CursorFocus>,
    theme: &Theme,
) -> Option<Rect> {
    let is_current = state.is_current(&track.id);

    let background = match focus {
        Some(CursorFocus::Row) => Some(theme.cursor_row_bg),
        Some(CursorFocus::Affordance) if !is_current => Some(theme.cursor_row_bg),
        _ if is_current => Some(theme.current_row_bg),
        _ => None,
    };
    if let Some(colour) = background {
        f.render_widget(Block::default().style(Style::default().bg(colour)), area);
    }

    let [art_area, affordance_area, title_area, artist_area, duration_area] = Layout::horizontal([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Percentage(30),
        Constraint::Length(6),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(art_glyph(track.album_art.as_deref(), ART_TRACK))
            .style(Style::default().fg(theme.muted_fg)),
        art_area,
    );

    let title_style = if is_current {
        Style::default()
            .fg(theme.accent_colour)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_fg)
    };
    f.render_widget(Paragraph::new(track.title.as_str()).style(title_style), title_area);
    f.render_widget(
        Paragraph::new(track.artist.as_str()).style(Style::default().fg(theme.muted_fg)),
        artist_area,
    );
    f.render_widget(
        Paragraph::new(format_time(track.duration))
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.muted_fg)),
        duration_area,
    );

    if !is_current {
        return None;
    }

    let icon = if state.is_playing() { ICON_PAUSE } else { ICON_PLAY };
    let mut style = Style::default()
        .fg(theme.affordance_fg)
        .bg(theme.affordance_bg)
        .add_modifier(Modifier::BOLD);
    if focus == Some(CursorFocus::Affordance) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    f.render_widget(
        Paragraph::new(icon).alignment(Alignment::Center).style(style),
        affordance_area,
    );

    Some(affordance_area)
}

fn draw_mini_bar(
    f: &mut Frame,
    area: Rect,
    state: &PlayerState,
    theme: &Theme,
) -> ControlsLayout {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [info_area, controls_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(MINI_CONTROLS_WIDTH)])
            .areas(inner);

    if let Some(track) = state.current_track() {
        let info = Line::from(vec![
            Span::styled(
                art_glyph(track.album_art.as_deref(), ART_TRACK),
                Style::default().fg(theme.muted_fg),
            ),
            Span::raw(" "),
            Span::styled(
                track.title.as_str(),
                Style::default()
                    .fg(theme.heading_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", track.artist), Style::default().fg(theme.muted_fg)),
        ]);
        f.render_widget(Paragraph::new(info), info_area);
    }

    draw_audio_controls(f, controls_area, state, ControlsMode::Minimal, theme)
}
