use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

const KEY_COLUMN: usize = 8;

/// Centered overlay listing every key and what it does.
pub fn render(frame: &mut Frame, area: Rect, entries: &[(String, &str)], theme: &Theme) {
    let widest = entries
        .iter()
        .map(|(_, desc)| desc.width())
        .max()
        .unwrap_or(0);
    // key pill + gap + description + borders
    let wanted = (KEY_COLUMN + 2 + 2 + widest + 2) as u16;
    let width = wanted.min(area.width.saturating_sub(4));
    let height = (entries.len() as u16 + 2).min(area.height.saturating_sub(2));

    let overlay = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Keys ",
            Style::default()
                .fg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:>width$} ", width = KEY_COLUMN),
                    Style::default()
                        .fg(theme.pill_key_fg)
                        .bg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {desc}"), Style::default().fg(theme.pill_desc_fg)),
            ])
        })
        .collect();

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}
