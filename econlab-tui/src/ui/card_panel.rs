//! Indicator card: headline figures, forecast note, commentary and chart.

use chrono::{Datelike, NaiveDate};
use econlab_board::card::{ChangeCell, IndicatorCard};
use econlab_core::chart::{ChartPoint, IndicatorChart};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, card: &IndicatorCard) {
    let details = detail_lines(card);
    let height = (details.len() as u16 + 2).min(area.height / 2).max(4);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(3)])
        .split(area);

    f.render_widget(Paragraph::new(details).wrap(Wrap { trim: true }), chunks[0]);

    match &card.chart {
        Some(chart) => render_chart(f, chunks[1], chart),
        None => f.render_widget(
            Paragraph::new(Span::styled("No data to chart.", theme::muted())),
            chunks[1],
        ),
    }
}

fn change_spans<'a>(label: &'a str, cell: &ChangeCell) -> Vec<Span<'a>> {
    vec![
        Span::styled(label, theme::muted()),
        Span::styled(
            format!("{} {}", cell.text, cell.impact.symbol()),
            theme::tone(cell.tone),
        ),
        Span::styled(
            format!(" ({} impact)  ", cell.impact.impact.as_str()),
            theme::impact(cell.impact.impact),
        ),
    ]
}

fn detail_lines(card: &IndicatorCard) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(card.name.as_str(), theme::accent_bold())),
        Line::from(vec![
            Span::styled("Current Value: ", theme::muted()),
            Span::styled(card.current_text.as_str(), theme::text()),
            Span::styled(format!("   Last updated: {}", card.last_updated), theme::muted()),
        ]),
    ];

    let mut changes = change_spans("Monthly: ", &card.monthly);
    changes.extend(change_spans("YoY: ", &card.yoy));
    lines.push(Line::from(changes));

    lines.push(Line::from(vec![
        Span::styled("Trend: ", theme::muted()),
        Span::styled(card.trend.trend.label(), theme::trend(card.trend.trend)),
        Span::styled(format!("  {}", card.trend.description), theme::muted()),
    ]));

    if let Some(note) = &card.forecast_note {
        lines.push(Line::from(Span::styled(note.text(), theme::impact(note.impact))));
    }
    if let Some(warning) = card.sample_warning {
        lines.push(Line::from(Span::styled(warning, theme::warning())));
    }
    if let Some(text) = &card.commentary {
        lines.push(Line::from(Span::styled(text.as_str(), theme::text())));
    }
    lines.push(Line::from(Span::styled(card.description.as_str(), theme::muted())));
    lines
}

fn x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn points(series: &[ChartPoint]) -> Vec<(f64, f64)> {
    series.iter().map(|p| (x(p.date), p.value)).collect()
}

fn line(name: String, style: Style, data: &[(f64, f64)]) -> Dataset<'_> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .style(style)
        .graph_type(GraphType::Line)
        .data(data)
}

fn render_chart(f: &mut Frame, area: Rect, chart: &IndicatorChart) {
    if chart.history.is_empty() {
        return;
    }
    let (first, last) = chart.x_bounds();
    let (x_min, x_max) = (x(first), x(last).max(x(first) + 1.0));
    let (lo, hi) = chart.y_bounds();
    let pad = (hi - lo).abs() * 0.05;
    let (y_min, y_max) = (lo - pad, hi + pad);

    let history = points(&chart.history);
    let forecast = chart.forecast.as_ref().map(|t| points(&t.points));
    let band = chart
        .forecast
        .as_ref()
        .and_then(|t| t.band.as_ref())
        .map(|b| (points(&b.upper), points(&b.lower)));
    let reference = chart
        .reference_line
        .map(|r| (r.label, vec![(x_min, r.value), (x_max, r.value)]));

    let mut datasets = vec![line(
        "Historical".to_string(),
        Style::default().fg(theme::ACCENT),
        &history,
    )];
    if let Some((upper, lower)) = &band {
        datasets.push(line("Upper bound".to_string(), Style::default().fg(theme::BAND), upper));
        datasets.push(line("Lower bound".to_string(), Style::default().fg(theme::BAND), lower));
    }
    if let Some(data) = &forecast {
        datasets.push(line("Forecast".to_string(), Style::default().fg(theme::FORECAST), data));
    }
    if let Some((label, data)) = &reference {
        datasets.push(line(
            label.to_string(),
            Style::default().fg(theme::REFERENCE),
            data,
        ));
    }

    let mid = first + (last - first) / 2;
    let fmt_y = |v: f64| format!("{}{v:.2}", chart.value_prefix);

    let widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::styled(first.format("%b %Y").to_string(), theme::muted()),
                    Span::styled(mid.format("%b %Y").to_string(), theme::muted()),
                    Span::styled(last.format("%b %Y").to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.axis_title, theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(fmt_y(y_min), theme::muted()),
                    Span::styled(fmt_y((y_min + y_max) / 2.0), theme::muted()),
                    Span::styled(fmt_y(y_max), theme::muted()),
                ]),
        );

    f.render_widget(widget, area);
}
