//! View 3 — Correlation heatmap, explanation and strongest pairs.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use econlab_core::catalog::title_case;

use crate::app::AppState;
use crate::theme;
use crate::ui::truncate;

const LABEL_WIDTH: usize = 28;
const CELL_WIDTH: usize = 7;
const TOP_PAIRS: usize = 5;

const EXPLANATION: [&str; 4] = [
    "Correlation ranges from -1 to +1 over the months every pair has in common.",
    "+1: the indicators move together. -1: they move in opposite directions.",
    "Values near 0 mean no linear relationship.",
    "Press x to save the matrix as CSV.",
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let (Some(heatmap), Some(matrix)) = (&app.heatmap, &app.dashboard.correlation) else {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Not enough indicators with data to compute correlations.",
                theme::warning(),
            )),
            area,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    let mut header = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    for i in 0..heatmap.labels.len() {
        header.push(Span::styled(
            format!("{:>w$}", format!("[{}]", i + 1), w = CELL_WIDTH),
            theme::muted(),
        ));
    }
    lines.push(Line::from(header));

    for (i, (label, row)) in heatmap.labels.iter().zip(&heatmap.cells).enumerate() {
        let mut spans = vec![Span::styled(
            format!(
                "{:<w$}",
                truncate(&format!("[{}] {label}", i + 1), LABEL_WIDTH - 1),
                w = LABEL_WIDTH
            ),
            theme::text(),
        )];
        for cell in row {
            spans.push(Span::styled(
                format!("{:>w$}", cell.text, w = CELL_WIDTH),
                theme::heat_cell(cell.fill, cell.light_text, cell.emphasized),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    for text in EXPLANATION {
        lines.push(Line::from(Span::styled(text, theme::muted())));
    }

    let pairs = matrix.strongest_pairs(TOP_PAIRS);
    if !pairs.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Strongest relationships",
            theme::accent_bold(),
        )));
        for p in &pairs {
            let style = if p.r >= 0.0 {
                theme::warning()
            } else {
                theme::accent()
            };
            lines.push(Line::from(Span::styled(
                format!("  {}", p.describe(&title_case(&p.a), &title_case(&p.b))),
                style,
            )));
        }
    }

    f.render_widget(Paragraph::new(lines).scroll((app.scroll as u16, 0)), area);
}
