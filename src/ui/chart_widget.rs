use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::chart::ChartProjection;
use crate::format::{format_percent, format_percent_short};
use crate::ui::theme::Theme;

pub fn marker_from_config(s: &str) -> Marker {
    match s.to_lowercase().as_str() {
        "dot" => Marker::Dot,
        "block" => Marker::Block,
        "bar" => Marker::Bar,
        "half" | "halfblock" => Marker::HalfBlock,
        _ => Marker::Braille,
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    projection: &ChartProjection,
    show_max_marker: bool,
    marker: Marker,
    theme: &Theme,
) {
    let metric = projection.metric;
    let series_color = theme.series_color(metric);

    let title = match projection.latest {
        Some(latest) => format!(" {} load {} ", metric.label(), format_percent(latest)),
        None => format!(" {} load ", metric.label()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(series_color)
                .add_modifier(Modifier::BOLD),
        ));

    if projection.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let waiting = Paragraph::new(Span::styled(
            "waiting for samples",
            Style::default().fg(theme.text_secondary),
        ))
        .alignment(Alignment::Center);
        let mid = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1.min(inner.height));
        frame.render_widget(waiting, mid);
        return;
    }

    let mut datasets = vec![
        Dataset::default()
            .name(metric.label())
            .marker(marker)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(series_color))
            .data(&projection.points),
    ];
    if show_max_marker {
        datasets.push(
            Dataset::default()
                .name(format!("max {}", format_percent(projection.max)))
                .marker(marker)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.max_marker))
                .data(&projection.max_line),
        );
    }

    let axis_style = Style::default().fg(theme.axis);
    let x_bounds = projection.x_bounds();
    let x_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{}", x_bounds[1] as usize)),
    ];
    let y_labels = [0.0, 0.5, 1.0]
        .into_iter()
        .map(|v| Span::raw(format_percent_short(v)))
        .collect::<Vec<_>>();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 1.0])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_parsing_defaults_to_braille() {
        assert_eq!(marker_from_config("dot"), Marker::Dot);
        assert_eq!(marker_from_config("HalfBlock"), Marker::HalfBlock);
        assert_eq!(marker_from_config("braille"), Marker::Braille);
        assert_eq!(marker_from_config("sparkles"), Marker::Braille);
    }
}
