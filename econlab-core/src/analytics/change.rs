//! Period-over-period changes and their display formatting.

use serde::{Deserialize, Serialize};

use crate::domain::{PreferredDirection, Unit};

/// How an indicator's changes are expressed.
///
/// Near-zero indices such as supply-chain pressure swing through zero, so
/// their changes are shown as point differences instead of percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeMode {
    #[default]
    Percent,
    Absolute,
}

/// Whether a change reads as good or bad for the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTone {
    Favorable,
    Unfavorable,
    Neutral,
}

impl ChangeTone {
    /// Tone of `change` for an indicator with the given preferred direction.
    ///
    /// A zero change counts as favorable for `down` and unfavorable for `up`.
    pub fn of(change: f64, direction: PreferredDirection) -> Self {
        match direction {
            PreferredDirection::Down if change > 0.0 => ChangeTone::Unfavorable,
            PreferredDirection::Down => ChangeTone::Favorable,
            PreferredDirection::Up if change > 0.0 => ChangeTone::Favorable,
            PreferredDirection::Up => ChangeTone::Unfavorable,
            PreferredDirection::Neutral => ChangeTone::Neutral,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ChangeTone::Favorable => "positive-change",
            ChangeTone::Unfavorable => "negative-change",
            ChangeTone::Neutral => "neutral-change",
        }
    }
}

/// Percentage change over `periods` steps: `(x[i] / x[i - periods] - 1) * 100`.
///
/// The first `periods` entries are `None`, as is any entry whose base is zero
/// or whose inputs are not finite.
pub fn pct_change(values: &[f64], periods: usize) -> Vec<Option<f64>> {
    if periods == 0 {
        return vec![Some(0.0); values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i < periods {
                return None;
            }
            let base = values[i - periods];
            let current = values[i];
            if base == 0.0 || !base.is_finite() || !current.is_finite() {
                None
            } else {
                Some((current / base - 1.0) * 100.0)
            }
        })
        .collect()
}

/// Point difference over `periods` steps: `x[i] - x[i - periods]`.
pub fn abs_change(values: &[f64], periods: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if i < periods {
                None
            } else {
                let d = values[i] - values[i - periods];
                d.is_finite().then_some(d)
            }
        })
        .collect()
}

/// Mean of the defined 1-period percentage changes, or `None` when there are none.
pub fn mean_pct_change(values: &[f64]) -> Option<f64> {
    let changes: Vec<f64> = pct_change(values, 1).into_iter().flatten().collect();
    if changes.is_empty() {
        None
    } else {
        Some(changes.iter().sum::<f64>() / changes.len() as f64)
    }
}

/// Format a value for display: `$1234.57`, `12.34%`, `12.34`, or `N/A`.
pub fn format_value(value: Option<f64>, unit: Unit) -> String {
    match value {
        Some(v) if v.is_finite() => match unit {
            Unit::Dollar => format!("${v:.2}"),
            Unit::Percent => format!("{v:.2}%"),
            Unit::Index => format!("{v:.2}"),
        },
        _ => "N/A".to_string(),
    }
}

/// Format a change with an explicit `+` for increases.
///
/// Percent mode appends `%`; absolute mode shows bare points.
pub fn format_change(change: Option<f64>, mode: ChangeMode) -> String {
    match change {
        Some(c) if c.is_finite() => {
            let sign = if c > 0.0 { "+" } else { "" };
            match mode {
                ChangeMode::Percent => format!("{sign}{c:.2}%"),
                ChangeMode::Absolute => format!("{sign}{c:.2}"),
            }
        }
        _ => "N/A".to_string(),
    }
}
