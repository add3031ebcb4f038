//! Indicator cards: the per-indicator block shown on every view.

use chrono::NaiveDate;
use econlab_core::analytics::change::{format_change, format_value, ChangeMode, ChangeTone};
use econlab_core::analytics::impact::{classify_for, forecast_impact};
use econlab_core::analytics::{Impact, ImpactReading, TimePeriod, TrendReading};
use econlab_core::chart::IndicatorChart;
use econlab_core::{PreferredDirection, Unit};
use serde::Serialize;

use crate::commentary::{self, CommentaryInputs};
use crate::dashboard::{IndicatorEntry, IndicatorSummary};

pub const SAMPLE_WARNING: &str = "⚠️ Using sample data as actual data could not be loaded.";

/// One change figure with its tone and impact arrow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeCell {
    pub value: Option<f64>,
    /// Formatted change, `N/A` when missing.
    pub text: String,
    /// `None` when the change is missing.
    pub tone: Option<ChangeTone>,
    pub impact: ImpactReading,
}

impl ChangeCell {
    fn new(
        id: &str,
        value: Option<f64>,
        direction: PreferredDirection,
        mode: ChangeMode,
    ) -> Self {
        let value = value.filter(|v| v.is_finite());
        Self {
            value,
            text: format_change(value, mode),
            tone: value.map(|v| ChangeTone::of(v, direction)),
            impact: classify_for(id, value, direction, mode),
        }
    }
}

/// Where the forecast ends relative to the latest observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastNote {
    pub value: f64,
    pub date: NaiveDate,
    /// Last forecast value minus the latest actual value.
    pub change: f64,
    pub change_text: String,
    pub impact: Impact,
    pub value_prefix: &'static str,
}

impl ForecastNote {
    fn build(
        latest: f64,
        forecast_value: f64,
        date: NaiveDate,
        unit: Unit,
        direction: PreferredDirection,
        mode: ChangeMode,
    ) -> Self {
        let change = forecast_value - latest;
        let change_text = match mode {
            ChangeMode::Absolute => format_change(Some(change), ChangeMode::Absolute),
            ChangeMode::Percent if latest != 0.0 => {
                format_change(Some(change / latest * 100.0), ChangeMode::Percent)
            }
            ChangeMode::Percent => "0.00%".to_string(),
        };
        Self {
            value: forecast_value,
            date,
            change,
            change_text,
            impact: forecast_impact(change, direction),
            value_prefix: unit.prefix(),
        }
    }

    pub fn text(&self) -> String {
        format!(
            "Forecast: {}{:.2} by {} ({} change, {} impact)",
            self.value_prefix,
            self.value,
            self.date.format("%b %Y"),
            self.change_text,
            self.impact.as_str()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorCard {
    pub indicator_id: String,
    pub name: String,
    pub current_value: Option<f64>,
    pub current_text: String,
    pub change_mode: ChangeMode,
    pub monthly: ChangeCell,
    pub yoy: ChangeCell,
    pub trend: TrendReading,
    pub chart: Option<IndicatorChart>,
    pub forecast_note: Option<ForecastNote>,
    pub description: String,
    pub sample_warning: Option<&'static str>,
    /// Latest observation date, `%b %d, %Y`.
    pub last_updated: String,
    pub commentary: Option<String>,
}

impl IndicatorCard {
    /// Card for `entry`, with the chart restricted to `period`.
    ///
    /// Changes and the forecast note always use the full history; the period
    /// only narrows what the chart shows.
    pub fn build(entry: &IndicatorEntry, period: TimePeriod, show_forecast: bool) -> Self {
        let series = entry.series();
        let meta = &series.meta;
        let summary = IndicatorSummary::from_entry(entry);
        let mode = entry.spec.change_mode;
        let direction = meta.preferred_direction;

        let forecast = entry
            .forecast
            .as_ref()
            .filter(|_| show_forecast)
            .map(|f| &f.forecast);

        let filtered = period.apply(series);
        let chart = IndicatorChart::build(&entry.spec, &filtered, forecast);

        let forecast_note = match (series.latest(), forecast.and_then(|f| f.last())) {
            (Some(latest), Some(last)) => Some(ForecastNote::build(
                latest.value,
                last.value,
                last.date,
                meta.unit,
                direction,
                mode,
            )),
            _ => None,
        };

        let commentary = summary.current_value.and_then(|latest_value| {
            commentary::generate(
                &entry.spec.id,
                &CommentaryInputs {
                    latest_value,
                    monthly_change: summary.monthly_change,
                    yoy_change: summary.yoy_change,
                    forecast_change: forecast_note.as_ref().map(|n| n.change),
                },
            )
        });

        Self {
            indicator_id: entry.spec.id.clone(),
            name: meta.source_name.clone(),
            current_value: summary.current_value,
            current_text: format_value(summary.current_value, meta.unit),
            change_mode: mode,
            monthly: ChangeCell::new(&entry.spec.id, summary.monthly_change, direction, mode),
            yoy: ChangeCell::new(&entry.spec.id, summary.yoy_change, direction, mode),
            trend: summary.trend,
            chart,
            forecast_note,
            description: meta.description.clone(),
            sample_warning: entry.indicator.using_sample().then_some(SAMPLE_WARNING),
            last_updated: series
                .latest_date()
                .map(|d| d.format("%b %d, %Y").to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            commentary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::{LoadedForecast, LoadedIndicator};
    use econlab_core::domain::{IndicatorMeta, Observation};
    use econlab_core::{Catalog, ForecastPoint, ForecastSeries, IndicatorSeries, Provenance};

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn entry(id: &str, values: &[f64], forecast_last: Option<f64>) -> IndicatorEntry {
        let spec = Catalog::builtin().spec(id);
        let obs: Vec<Observation> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let date = d(2023 + (i as i32) / 12, (i as u32) % 12 + 1);
                Observation::new(date, *v)
            })
            .collect();
        let mut obs = obs;
        let vals: Vec<f64> = values.to_vec();
        let monthly = econlab_core::analytics::change::pct_change(&vals, 1);
        for (o, m) in obs.iter_mut().zip(monthly) {
            o.monthly_change = m;
        }
        let series = IndicatorSeries::new(
            id,
            IndicatorMeta {
                source_name: spec.name.clone(),
                unit: spec.unit,
                preferred_direction: spec.preferred_direction,
                description: spec.description.clone(),
                last_updated: String::new(),
            },
            obs,
        );
        let forecast = forecast_last.map(|v| LoadedForecast {
            forecast: ForecastSeries {
                indicator_id: id.into(),
                source_name: format!("{} - FORECAST", spec.name),
                unit: spec.unit,
                preferred_direction: spec.preferred_direction,
                points: vec![ForecastPoint::new(d(2030, 6), v)],
            },
            provenance: Provenance::forecast_file("f.csv"),
            path: None,
        });
        IndicatorEntry {
            spec,
            indicator: LoadedIndicator {
                series,
                provenance: Provenance::file("x.csv"),
                path: None,
            },
            forecast,
        }
    }

    #[test]
    fn percent_card() {
        let e = entry("wti_oil", &[70.0, 72.0, 75.0], Some(82.5));
        let card = IndicatorCard::build(&e, TimePeriod::Last12Months, true);
        assert_eq!(card.current_text, "$75.00");
        assert_eq!(card.monthly.text, "+4.17%");
        assert_eq!(card.monthly.tone, Some(ChangeTone::Unfavorable));
        assert_eq!(card.monthly.impact.impact, Impact::Negative);
        assert_eq!(card.yoy.text, "N/A");
        assert_eq!(card.yoy.impact, ImpactReading::NONE);
        assert!(card.sample_warning.is_none());
        assert_eq!(card.last_updated, "Mar 01, 2023");
        assert!(card.commentary.is_none());

        let note = card.forecast_note.unwrap();
        assert_eq!(
            note.text(),
            "Forecast: $82.50 by Jun 2030 (+10.00% change, negative impact)"
        );
    }

    #[test]
    fn forecast_hidden_when_toggled_off() {
        let e = entry("wti_oil", &[70.0, 72.0], Some(80.0));
        let card = IndicatorCard::build(&e, TimePeriod::All, false);
        assert!(card.forecast_note.is_none());
        assert!(card.chart.unwrap().forecast.is_none());
    }

    #[test]
    fn zero_latest_gives_zero_percent() {
        let e = entry("cruspi", &[1.0, 0.0], Some(5.0));
        let note = IndicatorCard::build(&e, TimePeriod::All, true).forecast_note.unwrap();
        assert_eq!(note.change_text, "0.00%");
        assert_eq!(note.impact, Impact::Neutral);
    }

    #[test]
    fn supply_chain_card_uses_points() {
        let e = entry("supply_chain", &[0.5, 0.2], Some(0.0));
        let card = IndicatorCard::build(&e, TimePeriod::All, true);
        assert_eq!(card.monthly.text, "-0.30");
        assert_eq!(card.monthly.impact.impact, Impact::Positive);
        let note = card.forecast_note.as_ref().unwrap();
        assert_eq!(note.change_text, "-0.20");
        assert_eq!(note.impact, Impact::Positive);
        let text = card.commentary.unwrap();
        assert!(text.contains("notably decreased by 0.30 points"));
        assert!(text.contains("projected 0.20 point decrease"));
        assert_eq!(card.chart.unwrap().reference_line.unwrap().value, 0.0);
    }

    #[test]
    fn period_narrows_chart_only() {
        let values: Vec<f64> = (0..24).map(|i| 100.0 + i as f64).collect();
        let e = entry("cruspi", &values, None);
        let card = IndicatorCard::build(&e, TimePeriod::Last6Months, true);
        assert_eq!(card.chart.unwrap().history.len(), 7);
        assert_eq!(card.current_value, Some(123.0));
    }

    #[test]
    fn sample_entries_warn() {
        let mut e = entry("cruspi", &[1.0, 2.0], None);
        e.indicator.provenance = Provenance::sample("CRU Steel Price Index");
        let card = IndicatorCard::build(&e, TimePeriod::All, true);
        assert_eq!(card.sample_warning, Some(SAMPLE_WARNING));
    }
}
