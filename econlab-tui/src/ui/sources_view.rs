//! View 4 — Data sources: where every indicator came from, load failures,
//! and methodology notes.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use econlab_board::dashboard::METHODOLOGY_NOTES;

use crate::app::AppState;
use crate::theme;
use crate::ui::truncate;

const NAME_WIDTH: usize = 56;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = app.dashboard.sources();
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("Data root: {}", app.dashboard.dirs.root.display()),
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{:<w$} {:<12} {}", "Indicator", "Type", "Source", w = NAME_WIDTH),
            theme::accent_bold(),
        )),
    ];

    for r in &rows {
        let kind_style = if r.is_sample {
            theme::warning()
        } else {
            theme::positive()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<w$} ", truncate(&r.name, NAME_WIDTH), w = NAME_WIDTH),
                theme::text(),
            ),
            Span::styled(format!("{:<12} ", r.kind()), kind_style),
            Span::styled(r.source.as_str(), theme::muted()),
        ]));
    }

    if !app.dashboard.failures.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Not loaded", theme::negative())));
        for failure in &app.dashboard.failures {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<24} ", failure.indicator_id), theme::text()),
                Span::styled(failure.reason.as_str(), theme::muted()),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Methodology", theme::accent_bold())));
    for note in METHODOLOGY_NOTES {
        lines.push(Line::from(Span::styled(format!("  - {note}"), theme::muted())));
    }

    f.render_widget(Paragraph::new(lines).scroll((app.scroll as u16, 0)), area);
}
