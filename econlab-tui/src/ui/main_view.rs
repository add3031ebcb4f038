//! View 1 — Main dashboard: indicator sections on the left, the selected
//! card on the right.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use econlab_board::dashboard::MAIN_SECTIONS;

use crate::app::AppState;
use crate::theme;
use crate::ui::{card_panel, truncate};

const LIST_WIDTH: u16 = 46;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LIST_WIDTH), Constraint::Min(10)])
        .split(area);

    render_list(f, chunks[0], app);

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(theme::muted());
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    match app.selected_main_card() {
        Some(card) => card_panel::render(f, inner, card),
        None => f.render_widget(
            Paragraph::new(Span::styled(
                "No indicators could be loaded. Run `econlab setup` to create sample files.",
                theme::warning(),
            )),
            inner,
        ),
    }
}

fn render_list(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();
    let name_width = LIST_WIDTH as usize - 22;

    if app.dashboard.any_sample() {
        lines.push(Line::from(Span::styled(
            "⚠ Some indicators use sample data",
            theme::warning(),
        )));
    }
    if !app.dashboard.failures.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{} indicators failed to load", app.dashboard.failures.len()),
            theme::negative(),
        )));
    }

    let mut row = 0;
    let mut cursor_line = 0;
    for section in &MAIN_SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(section.title, theme::accent_bold())));

        let entries = app.dashboard.section_entries(section);
        if entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No data available for this section",
                theme::warning(),
            )));
            continue;
        }

        for entry in entries {
            let Some(card) = app.card(entry.id()) else { continue };
            let selected = row == app.main_cursor;
            if selected {
                cursor_line = lines.len();
            }
            let base = if selected {
                theme::accent().add_modifier(Modifier::REVERSED)
            } else {
                theme::text()
            };
            let change_style = if selected { base } else { theme::tone(card.monthly.tone) };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<w$} ", truncate(&card.name, name_width), w = name_width),
                    base,
                ),
                Span::styled(format!("{:>10} ", truncate(&card.current_text, 10)), base),
                Span::styled(format!("{:>8}", card.monthly.text), change_style),
            ]));
            row += 1;
        }
    }

    let visible = area.height as usize;
    let offset = cursor_line.saturating_sub(visible.saturating_sub(1));
    f.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), area);
}
