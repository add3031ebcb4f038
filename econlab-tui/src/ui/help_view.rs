//! View 5 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-5", "Switch view by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle views forward / back");
    key(&mut lines, "?", "This help");
    key(&mut lines, "p / P", "Cycle time period forward / back");
    key(&mut lines, "f", "Show / hide forecasts");
    key(&mut lines, "r", "Reload data from disk");
    key(&mut lines, "x", "Export the current view");
    key(&mut lines, "q / Esc", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Main Dashboard / Cost Indicators");
    key(&mut lines, "j / k", "Select next / previous indicator");
    key(&mut lines, "PgDn / PgUp", "Jump ten indicators");
    key(&mut lines, "g / Home", "First indicator");
    lines.push(Line::from(""));

    section(&mut lines, "Correlation / Data Sources / Help");
    key(&mut lines, "j / k", "Scroll down / up");
    lines.push(Line::from(""));

    section(&mut lines, "Exports");
    key(&mut lines, "Main", "Every series, forecast, matrix, table and summary");
    key(&mut lines, "Cost Indicators", "cost_adjustments.csv");
    key(&mut lines, "Correlation", "indicator_correlations.csv");
    key(&mut lines, "Data Sources", "data_sources.csv");
    key(&mut lines, "", &format!("Written to {}", app.export_dir.display()));

    f.render_widget(Paragraph::new(lines).scroll((app.scroll as u16, 0)), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
