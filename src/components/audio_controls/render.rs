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

//! Rendering of the transport controls.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Gauge, Paragraph},
};

use crate::{
    components::audio_controls::{ControlButton, ControlsLayout, ControlsMode},
    model::PlayerState,
    render::icons::{
        ICON_NEXT, ICON_PAUSE, ICON_PLAY, ICON_PREV, ICON_REPEAT, ICON_SHUFFLE, ICON_VOLUME,
    },
    theme::Theme,
    util::format::format_time,
};

const BUTTON_WIDTH: u16 = 3;

/// Draws the controls into `area` and returns where the click targets are.
///
/// Full mode uses three rows (buttons, seek bar, volume bar); minimal mode
/// uses one.
pub(crate) fn draw_audio_controls(
    f: &mut Frame,
    area: Rect,
    state: &PlayerState,
    mode: ControlsMode,
    theme: &Theme,
) -> ControlsLayout {
    let rows = Layout::vertical(vec![Constraint::Length(1); usize::from(mode.height())]).split(area);

    let mut layout = ControlsLayout {
        buttons: draw_buttons(f, rows[0], state, mode, theme),
        ..ControlsLayout::default()
    };

    if mode == ControlsMode::Full {
        layout.seek_bar = draw_seek_bar(f, rows[1], state, theme);
        layout.volume_bar = Some(draw_volume_bar(f, rows[2], state, theme));
    }

    layout
}

fn draw_buttons(
    f: &mut Frame,
    area: Rect,
    state: &PlayerState,
    mode: ControlsMode,
    theme: &Theme,
) -> Vec<(ControlButton, Rect)> {
    let buttons = mode.buttons();
    let areas = Layout::horizontal(buttons.iter().map(|_| Constraint::Length(BUTTON_WIDTH)))
        .flex(Flex::Center)
        .spacing(1)
        .split(area);

    buttons
        .iter()
        .zip(areas.iter())
        .map(|(button, button_area)| {
            let (icon, style) = match button {
                ControlButton::Shuffle => (ICON_SHUFFLE, toggle_style(state.is_shuffle(), theme)),
                ControlButton::Repeat => (ICON_REPEAT, toggle_style(state.is_repeat(), theme)),
                ControlButton::Previous => (ICON_PREV, Style::default().fg(theme.text_fg)),
                ControlButton::Next => (ICON_NEXT, Style::default().fg(theme.text_fg)),
                ControlButton::PlayPause => {
                    let icon = if state.is_playing() { ICON_PAUSE } else { ICON_PLAY };
                    let style = Style::default()
                        .fg(theme.heading_fg)
                        .add_modifier(Modifier::BOLD);
                    (icon, style)
                }
            };

            f.render_widget(
                Paragraph::new(icon).alignment(Alignment::Center).style(style),
                *button_area,
            );

            (*button, *button_area)
        })
        .collect()
}

fn toggle_style(active: bool, theme: &Theme) -> Style {
    if active {
        Style::default()
            .fg(theme.accent_colour)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted_fg)
    }
}

fn draw_seek_bar(f: &mut Frame, area: Rect, state: &PlayerState, theme: &Theme) -> Option<Rect> {
    let chunks = Layout::horizontal([
        Constraint::Length(5),
        Constraint::Min(0),
        Constraint::Length(5),
    ])
    .spacing(1)
    .split(area);

    let duration = state.duration();
    let ratio = if duration > 0.0 {
        (state.progress() / duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    f.render_widget(
        Paragraph::new(format_time(state.progress()))
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.muted_fg)),
        chunks[0],
    );
    f.render_widget(gauge(ratio, theme), chunks[1]);
    f.render_widget(
        Paragraph::new(format_time(duration)).style(Style::default().fg(theme.muted_fg)),
        chunks[2],
    );

    state.current_track().map(|_| chunks[1])
}

fn draw_volume_bar(f: &mut Frame, area: Rect, state: &PlayerState, theme: &Theme) -> Rect {
    let chunks = Layout::horizontal([
        Constraint::Length(5),
        Constraint::Min(0),
        Constraint::Length(5),
    ])
    .spacing(1)
    .split(area);

    let volume = state.volume();

    f.render_widget(
        Paragraph::new(ICON_VOLUME)
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.muted_fg)),
        chunks[0],
    );
    f.render_widget(gauge(volume, theme), chunks[1]);
    f.render_widget(
        Paragraph::new(format!("{}%", (volume * 100.0).round() as u16))
            .style(Style::default().fg(theme.text_fg)),
        chunks[2],
    );

    chunks[1]
}

fn gauge(ratio: f64, theme: &Theme) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(ratio)
        .label("")
        .use_unicode(true)
}
