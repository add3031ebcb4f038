//! Color tokens and styles for the EconLab TUI.
//!
//! # Palette
//! - **Accent**: electric cyan (focus, headings)
//! - **Positive**: neon green (favorable changes, positive impact)
//! - **Negative**: hot pink (unfavorable changes, negative impact, errors)
//! - **Warning**: neon orange (sample data, high cost adjustments)
//! - **Neutral**: cool purple (neutral tone, stable trend)
//! - **Muted**: steel blue (secondary text)

use econlab_core::analytics::{ChangeTone, Impact, Trend};
use econlab_core::chart::Rgb;
use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;
pub const TEXT_DARK: Color = Color::Rgb(18, 18, 20);

/// Forecast trace and band.
pub const FORECAST: Color = WARNING;
pub const BAND: Color = Color::Rgb(120, 90, 40);
/// Horizontal reference line.
pub const REFERENCE: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Style for a change figure. Missing changes are muted.
pub fn tone(tone: Option<ChangeTone>) -> Style {
    match tone {
        Some(ChangeTone::Favorable) => positive(),
        Some(ChangeTone::Unfavorable) => negative(),
        Some(ChangeTone::Neutral) => neutral(),
        None => muted(),
    }
}

pub fn impact(impact: Impact) -> Style {
    match impact {
        Impact::Positive => positive(),
        Impact::Negative => negative(),
        Impact::Neutral => neutral(),
    }
}

pub fn trend(trend: Trend) -> Style {
    match trend {
        Trend::Increasing => warning(),
        Trend::Decreasing => accent(),
        Trend::Stable => neutral(),
    }
}

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Heatmap cell style: filled background, light or dark text, bold diagonal.
pub fn heat_cell(fill: Option<Rgb>, light_text: bool, emphasized: bool) -> Style {
    let Some(fill) = fill else {
        return muted();
    };
    let mut style = Style::default()
        .bg(rgb(fill))
        .fg(if light_text { TEXT } else { TEXT_DARK });
    if emphasized {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}
