use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::{format_interval_ms, format_percent};
use crate::metrics::{Metric, MonitoringRegistry};
use crate::ui::theme::Theme;

pub struct HeaderInfo {
    pub active: Metric,
    pub paused: bool,
    pub interval_ms: u128,
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    info: &HeaderInfo,
    registry: &MonitoringRegistry,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_branding(frame, chunks[0], info, theme);
    render_gauge(frame, chunks[1], Metric::Cpu, registry, info.active, theme);
    render_gauge(frame, chunks[2], Metric::Ram, registry, info.active, theme);
}

fn render_branding(frame: &mut Frame, area: Rect, info: &HeaderInfo, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled(
            " loadline ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            info.active.label(),
            Style::default()
                .fg(theme.series_color(info.active))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("every {}", format_interval_ms(info.interval_ms)),
            Style::default().fg(theme.text_secondary),
        ),
    ];

    if info.paused {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            " PAUSED ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.paused_badge)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_gauge(
    frame: &mut Frame,
    area: Rect,
    metric: Metric,
    registry: &MonitoringRegistry,
    active: Metric,
    theme: &Theme,
) {
    let latest = registry.window(metric).latest();
    let ratio = latest.unwrap_or(0.0).clamp(0.0, 1.0);

    let mut title_style = Style::default().fg(theme.text_secondary);
    if metric == active {
        title_style = title_style
            .fg(theme.series_color(metric))
            .add_modifier(Modifier::BOLD);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(format!(" {} ", metric.label()), title_style));

    let label = match latest {
        Some(sample) => format_percent(sample),
        None => "--".to_string(),
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.series_color(metric))
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(label);

    frame.render_widget(gauge, area);
}
