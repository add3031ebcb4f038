//! View 2 — Cost indicators: yearly adjustments, equipment and material
//! cards, and the component weights behind the selected index.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use econlab_board::costs::{self, AdjustmentFlag};

use crate::app::AppState;
use crate::theme;
use crate::ui::{card_panel, truncate};

const LIST_WIDTH: u16 = 46;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let table = adjustment_lines(app);
    let table_height = (table.len() as u16).min(area.height / 3);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(table_height), Constraint::Min(3)])
        .split(area);

    f.render_widget(Paragraph::new(table), rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LIST_WIDTH), Constraint::Min(10)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(3)])
        .split(cols[0]);
    render_list(f, left[0], app);
    render_methodology(f, left[1], app);

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(theme::muted());
    let inner = block.inner(cols[1]);
    f.render_widget(block, cols[1]);
    if let Some(card) = app.selected_cost_card() {
        card_panel::render(f, inner, card);
    }
}

fn adjustment_lines(app: &AppState) -> Vec<Line<'_>> {
    let view = &app.costs;
    let mut lines = vec![Line::from(Span::styled(
        "Year-Over-Year Adjustments (Cost Escalation)",
        theme::accent_bold(),
    ))];
    if view.synthesized {
        lines.push(Line::from(Span::styled(
            "⚠ No cost indicator data found, showing generated sample data",
            theme::warning(),
        )));
    }
    if view.adjustments.is_empty() {
        lines.push(Line::from(Span::styled(
            "No year-over-year adjustment data available",
            theme::muted(),
        )));
        return lines;
    }

    lines.push(Line::from(Span::styled(
        format!("{:<45} {:>10}  {}", "Indicator", "Adjustment", "Effective Period"),
        theme::muted(),
    )));
    for a in &view.adjustments {
        let style = match a.flag() {
            AdjustmentFlag::High => theme::warning().add_modifier(Modifier::BOLD),
            AdjustmentFlag::Relief => theme::positive(),
            AdjustmentFlag::Normal => theme::text(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<45} ", truncate(&a.name, 45)), theme::text()),
            Span::styled(format!("{:>10}  ", a.adjustment_text()), style),
            Span::styled(a.effective_period(), theme::muted()),
        ]));
    }
    lines
}

fn render_list(f: &mut Frame, area: Rect, app: &AppState) {
    let equipment = app.costs.equipment.len();
    let name_width = LIST_WIDTH as usize - 14;
    let mut lines: Vec<Line> = Vec::new();

    for (i, card) in app.cost_cards.iter().enumerate() {
        if i == 0 && equipment > 0 {
            lines.push(Line::from(Span::styled("Equipment Costs", theme::accent_bold())));
        }
        if i == equipment {
            lines.push(Line::from(Span::styled("Material Costs", theme::accent_bold())));
        }
        let selected = i == app.cost_cursor;
        let style = if selected {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::text()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "  {:<w$} ",
                    truncate(&costs::strip_name(&card.name), name_width),
                    w = name_width
                ),
                style,
            ),
            Span::styled(format!("{:>10}", card.current_text), style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_methodology(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Methodology", theme::accent_bold()))];

    match app
        .selected_cost_card()
        .and_then(|c| costs::methodology(&c.indicator_id))
    {
        Some(m) => {
            lines.push(Line::from(Span::styled(
                format!("{} Components and Weights", m.title),
                theme::text(),
            )));
            for c in m.components {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:>3}% ", c.weight_pct), theme::accent()),
                    Span::styled(c.name, theme::text()),
                    Span::styled(format!("  {}", c.series_code), theme::muted()),
                ]));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No component weights for this indicator",
            theme::muted(),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(costs::METHODOLOGY_OVERVIEW, theme::muted())));
    lines.push(Line::from(Span::styled(
        format!("Source: {}", costs::METHODOLOGY_SOURCE),
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
