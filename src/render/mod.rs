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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event to provide a reactive user interface.

mod commander;
pub(crate) mod icons;
mod now_playing;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    App, MainView,
    player::PlaybackEngine,
    render::{commander::draw_commander, now_playing::draw_now_playing},
    theme::Theme,
};

/// Renders the user interface to the terminal frame.
///
/// The screen is split into a one-line header with the view tabs, the
/// current main view, and the command/status line. Views that accept mouse
/// input store their click targets back into the [`App`].
pub(crate) fn draw<E: PlaybackEngine>(f: &mut Frame, app: &mut App<E>) {
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_colour)),
        area,
    );

    let [header_area, main_area, commander_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(f, header_area, app.main_view, &app.theme);

    let state = app.player.state();
    match app.main_view {
        MainView::Collections => {
            app.playlist_view
                .draw(f, main_area, &app.playlists, state, &app.theme)
        }
        MainView::NowPlaying => {
            app.now_playing_controls = draw_now_playing(f, main_area, state, &app.theme)
        }
    }

    draw_commander(f, commander_area, &app.commander, app.status.as_ref(), &app.theme);
}

fn draw_header(f: &mut Frame, area: Rect, main_view: MainView, theme: &Theme) {
    let tab = |key: &'static str, label: &'static str, view: MainView| {
        let style = if main_view == view {
            Style::default()
                .fg(theme.accent_colour)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_fg)
        };
        [
            Span::styled(key, Style::default().fg(theme.muted_fg)),
            Span::styled(label, style),
        ]
    };

    let mut spans = vec![Span::styled(
        " dzikir  ",
        Style::default()
            .fg(theme.heading_fg)
            .add_modifier(Modifier::BOLD),
    )];
    spans.extend(tab("1 ", "Collections  ", MainView::Collections));
    spans.extend(tab("2 ", "Now Playing", MainView::NowPlaying));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::{
        events::{AppEvent, testing::{app, run}},
        model::fixtures::{playlist, track},
        player::testing::RecordingEngine,
    };

    fn render(app: &mut App<RecordingEngine>) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(70, 16)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn collections_page_is_the_default() {
        let (mut app, _tasks) = app();

        let lines = render(&mut app);

        assert!(lines[0].contains("1 Collections"));
        assert!(lines.iter().any(|l| l.contains("No Collections")));
    }

    #[test]
    fn now_playing_page_stores_its_click_targets() {
        let (mut app, _tasks) = app();
        let p = playlist("p", vec![track("a", 30.0)]);
        run(&mut app, AppEvent::CollectionsLoaded(vec![(*p).clone()]));
        let p = Arc::clone(&app.playlists[0]);
        run(&mut app, AppEvent::SelectTrack(p.tracks[0].clone(), p));
        run(&mut app, AppEvent::SetMainView(MainView::NowPlaying));

        let lines = render(&mut app);

        assert!(lines.iter().any(|l| l.contains("Title a")));
        assert_eq!(app.now_playing_controls.buttons.len(), 5);
        assert!(app.now_playing_controls.seek_bar.is_some());
    }

    #[test]
    fn clicking_the_play_button_pauses() {
        let (mut app, _tasks) = app();
        let p = playlist("p", vec![track("a", 30.0)]);
        run(&mut app, AppEvent::CollectionsLoaded(vec![(*p).clone()]));
        let p = Arc::clone(&app.playlists[0]);
        run(&mut app, AppEvent::SelectTrack(p.tracks[0].clone(), p));
        run(&mut app, AppEvent::SetMainView(MainView::NowPlaying));
        render(&mut app);

        let (_, play) = app.now_playing_controls.buttons[2];
        run(
            &mut app,
            AppEvent::Mouse(crossterm::event::MouseEvent {
                kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
                column: play.x + 1,
                row: play.y,
                modifiers: crossterm::event::KeyModifiers::NONE,
            }),
        );

        assert!(!app.player.state().is_playing());
    }
}
