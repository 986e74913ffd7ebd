pub mod chart_widget;
pub mod header;
pub mod help;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let info = header::HeaderInfo {
        active: app.active_metric(),
        paused: app.is_paused(),
        interval_ms: app.scheduler.period().as_millis(),
    };
    header::render(frame, chunks[0], &info, &app.registry, &app.theme);

    chart_widget::render(
        frame,
        chunks[1],
        &app.projection,
        app.show_max_marker,
        chart_widget::marker_from_config(&app.marker),
        &app.theme,
    );

    statusbar::render(
        frame,
        chunks[2],
        app.status_message.as_ref(),
        &app.keybinds,
        app.is_paused(),
        &app.theme,
    );

    // Help overlay last so it sits on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}
