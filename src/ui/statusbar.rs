use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{ResolvedKeybinds, StatusKind, StatusMessage, key_label};
use crate::format::truncate_unicode;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    status_message: Option<&StatusMessage>,
    keybinds: &ResolvedKeybinds,
    paused: bool,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some(status) = status_message {
        let color = match status.kind {
            StatusKind::Info => theme.status_ok,
            StatusKind::Error => theme.status_err,
        };
        let text = truncate_unicode(&status.text, area.width.saturating_sub(1) as usize);
        let line = Line::from(Span::styled(
            format!(" {text}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let labels = [
        (key_label(keybinds.select_cpu), "CPU"),
        (key_label(keybinds.select_ram), "RAM"),
        (key_label(keybinds.clear), "Clear"),
        (
            key_label(keybinds.pause),
            if paused { "Resume" } else { "Pause" },
        ),
        (key_label(keybinds.help), "Help"),
        (key_label(keybinds.quit), "Quit"),
    ];

    let mut spans = Vec::new();
    for (key, desc) in &labels {
        spans.extend(pill_spans(key, desc, theme));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
