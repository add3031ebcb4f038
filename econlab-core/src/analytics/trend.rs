//! Trend classification from recent history and an optional forecast.

use serde::{Deserialize, Serialize};

use super::change::mean_pct_change;

/// Combined trend above this (percent per step) reads as increasing.
pub const TREND_THRESHOLD: f64 = 0.7;

/// Number of trailing observations used for the recent trend.
pub const RECENT_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Increasing => "↑ Increasing",
            Trend::Decreasing => "↓ Decreasing",
            Trend::Stable => "→ Stable",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Trend::Increasing => "trend-up",
            Trend::Decreasing => "trend-down",
            Trend::Stable => "trend-stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    pub trend: Trend,
    /// Combined trend score; `None` when there was nothing to score.
    pub score: Option<f64>,
    pub description: String,
}

impl TrendReading {
    fn insufficient() -> Self {
        Self {
            trend: Trend::Stable,
            score: None,
            description: "Trend cannot be determined due to insufficient data.".into(),
        }
    }

    fn from_trend(trend: Trend, score: Option<f64>) -> Self {
        let description = match trend {
            Trend::Increasing => "Prices have been trending upward.",
            Trend::Decreasing => "Prices have been trending downward.",
            Trend::Stable => "Prices have been relatively stable.",
        };
        Self {
            trend,
            score,
            description: description.into(),
        }
    }
}

/// Forecast trend: total move from first to last point, in percent.
fn forecast_trend(forecast: &[f64]) -> f64 {
    if forecast.len() < 2 {
        return 0.0;
    }
    let first = forecast[0];
    let last = forecast[forecast.len() - 1];
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first * 100.0
}

/// Classify the trend of `history`, averaging in the forecast trend when a
/// non-empty forecast is supplied.
pub fn classify_trend(history: &[f64], forecast: Option<&[f64]>) -> TrendReading {
    if history.is_empty() {
        return TrendReading::insufficient();
    }
    if history.len() < 2 {
        return TrendReading::from_trend(Trend::Stable, None);
    }

    let recent = &history[history.len().saturating_sub(RECENT_WINDOW)..];
    let Some(recent_trend) = mean_pct_change(recent) else {
        return TrendReading::from_trend(Trend::Stable, None);
    };

    let forecast = forecast.filter(|f| !f.is_empty());
    let combined = match forecast {
        Some(f) => (recent_trend + forecast_trend(f)) / 2.0,
        None => recent_trend,
    };

    let trend = if combined > TREND_THRESHOLD {
        Trend::Increasing
    } else if combined < -TREND_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    };
    TrendReading::from_trend(trend, Some(combined))
}
