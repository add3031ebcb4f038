//! Top-level UI layout — view tabs, the active view, and a status bar.

pub mod card_panel;
pub mod correlation_view;
pub mod costs_view;
pub mod help_view;
pub mod main_view;
pub mod sources_view;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, View};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(f, chunks[0], app);
    draw_view(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);
}

fn render_tabs(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();
    for i in 0..View::COUNT {
        let Some(view) = View::from_index(i) else { continue };
        let style = if view == app.view {
            theme::accent_bold().add_modifier(Modifier::REVERSED)
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!(" {}:{} ", i + 1, view.label()), style));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(app.period.label(), theme::accent()));
    spans.push(Span::styled(
        if app.show_forecast {
            " | Forecast on"
        } else {
            " | Forecast off"
        },
        theme::muted(),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_view(f: &mut Frame, area: Rect, app: &AppState) {
    let view = app.view;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", view.label(), view.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match view {
        View::Main => main_view::render(f, inner, app),
        View::Costs => costs_view::render(f, inner, app),
        View::Correlation => correlation_view::render(f, inner, app),
        View::Sources => sources_view::render(f, inner, app),
        View::Help => help_view::render(f, inner, app),
    }
}

/// Shorten `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_app, sample_app_with};
    use econlab_core::Catalog;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buf = terminal.backend().buffer();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("Explosives & Accessories", 10), "Explosive…");
    }

    #[test]
    fn main_view_lists_sections_and_card() {
        let (_tmp, app) = sample_app();
        let screen = render(&app, 160, 50);
        assert!(screen.contains("Main Dashboard [1]"));
        assert!(screen.contains("Key Economic Indicators"));
        assert!(screen.contains("Supply Chain Related Indicators"));
        assert!(screen.contains("Last 12 Months"));
        assert!(screen.contains("Current Value"));
        assert!(screen.contains("Forecast:"));
    }

    #[test]
    fn main_view_warns_on_empty_section() {
        let (_tmp, app) = sample_app_with(Catalog::builtin().select(&["cruspi".to_string()]));
        let screen = render(&app, 160, 50);
        assert!(screen.contains("No data available for this section"));
        assert!(screen.contains("CRU Steel Price Index"));
    }

    #[test]
    fn costs_view_shows_adjustments_and_methodology() {
        let (_tmp, mut app) = sample_app();
        app.set_view(View::Costs);
        let screen = render(&app, 160, 60);
        assert!(screen.contains("Year-Over-Year Adjustments"));
        assert!(screen.contains("Komatsu Heavy Equipment Cost Index"));
        assert!(screen.contains("Effective Period"));
        assert!(screen.contains("Equipment Costs"));
        assert!(screen.contains("Material Costs"));
        assert!(screen.contains("CMU2010000000000D"));
    }

    #[test]
    fn correlation_view_shows_heatmap_and_pairs() {
        let (_tmp, mut app) = sample_app();
        app.set_view(View::Correlation);
        let screen = render(&app, 200, 60);
        assert!(screen.contains("Wti Oil"));
        assert!(screen.contains("1.00"));
        assert!(screen.contains("Strongest relationships"));
    }

    #[test]
    fn correlation_view_without_matrix() {
        let (_tmp, mut app) = sample_app_with(Catalog::builtin().select(&["cruspi".to_string()]));
        app.set_view(View::Correlation);
        let screen = render(&app, 120, 30);
        assert!(screen.contains("Not enough indicators"));
    }

    #[test]
    fn sources_view_marks_sample_rows() {
        let (_tmp, mut app) = sample_app();
        app.set_view(View::Sources);
        let screen = render(&app, 180, 50);
        assert!(screen.contains("Sample Data"));
        assert!(screen.contains("Sample data (CRU Steel Price Index)"));
        assert!(screen.contains("Methodology"));
    }

    #[test]
    fn help_and_status_bar() {
        let (_tmp, mut app) = sample_app();
        app.set_view(View::Help);
        app.set_warning("careful");
        let screen = render(&app, 120, 40);
        assert!(screen.contains("Cycle time period"));
        assert!(screen.contains("careful"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (_tmp, mut app) = sample_app();
        for i in 0..View::COUNT {
            app.set_view(View::from_index(i).unwrap());
            render(&app, 20, 6);
        }
    }
}
