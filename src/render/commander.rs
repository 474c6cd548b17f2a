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

//! Render the command-line interface.
//!
//! This module renders the bottom line: the command being typed while the
//! command line is open, otherwise the latest status or error message, or a
//! short key hint.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{StatusMessage, commander::Commander, theme::Theme};

const HINT: &str = ": command  1/2 views  space play  n/p next/prev  z shuffle  r repeat  q quit";

pub(crate) fn draw_commander(
    f: &mut Frame,
    area: Rect,
    commander: &Commander,
    status: Option<&StatusMessage>,
    theme: &Theme,
) {
    let [container] = Layout::horizontal([Constraint::Min(1)])
        .horizontal_margin(1)
        .areas(area);

    if commander.active() {
        f.render_widget(
            Paragraph::new(format!(":{}", commander.input.value())).style(
                Style::default()
                    .fg(theme.status_colour)
                    .bg(theme.gauge_track_colour),
            ),
            container,
        );

        // One column for the leading ':'
        let cursor_x = container.x + 1 + commander.input.cursor() as u16;
        f.set_cursor_position((cursor_x, container.y));
        return;
    }

    let (text, colour) = match status {
        Some(StatusMessage::Info(message)) => (message.as_str(), theme.status_colour),
        Some(StatusMessage::Error(message)) => (message.as_str(), theme.error_colour),
        None => (HINT, theme.placeholder_fg),
    };

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(colour)),
        container,
    );
}
