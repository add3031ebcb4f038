//! Observations and the indicator series that hold them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PreferredDirection, Unit};

/// One dated observation of an indicator.
///
/// Derived changes are percentages; `None` marks a value that could not be
/// computed (not enough history, zero base) or was missing in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    pub monthly_change: Option<f64>,
    pub yoy_change: Option<f64>,
    /// Year-over-year adjustment published for cost indices.
    pub yearly_adjustment: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value,
            monthly_change: None,
            yoy_change: None,
            yearly_adjustment: None,
        }
    }
}

/// Descriptive metadata attached to a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorMeta {
    /// Display name of the source ("WTI Crude Oil Price").
    pub source_name: String,
    pub unit: Unit,
    pub preferred_direction: PreferredDirection,
    pub description: String,
    /// Label like `Mar-25` describing when the source was last refreshed.
    pub last_updated: String,
}

/// A date-ordered series for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub id: String,
    pub meta: IndicatorMeta,
    pub observations: Vec<Observation>,
}

impl IndicatorSeries {
    pub fn new(id: impl Into<String>, meta: IndicatorMeta, observations: Vec<Observation>) -> Self {
        Self {
            id: id.into(),
            meta,
            observations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Latest non-missing yearly adjustment, scanning backwards.
    pub fn latest_yearly_adjustment(&self) -> Option<(NaiveDate, f64)> {
        self.observations
            .iter()
            .rev()
            .find_map(|o| o.yearly_adjustment.map(|adj| (o.date, adj)))
    }

    /// Copy of this series restricted to the given observations.
    pub fn with_observations(&self, observations: Vec<Observation>) -> Self {
        Self {
            id: self.id.clone(),
            meta: self.meta.clone(),
            observations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meta() -> IndicatorMeta {
        IndicatorMeta {
            source_name: "Test".into(),
            unit: Unit::Index,
            preferred_direction: PreferredDirection::Neutral,
            description: String::new(),
            last_updated: String::new(),
        }
    }

    #[test]
    fn latest_and_dates() {
        let s = IndicatorSeries::new(
            "x",
            meta(),
            vec![
                Observation::new(date(2024, 1, 1), 1.0),
                Observation::new(date(2024, 2, 1), 2.0),
            ],
        );
        assert_eq!(s.len(), 2);
        assert_eq!(s.latest().unwrap().value, 2.0);
        assert_eq!(s.first_date(), Some(date(2024, 1, 1)));
        assert_eq!(s.latest_date(), Some(date(2024, 2, 1)));
        assert_eq!(s.values(), vec![1.0, 2.0]);
    }

    #[test]
    fn latest_yearly_adjustment_skips_missing() {
        let mut a = Observation::new(date(2024, 1, 1), 1.0);
        a.yearly_adjustment = Some(2.5);
        let b = Observation::new(date(2024, 2, 1), 2.0);
        let s = IndicatorSeries::new("x", meta(), vec![a, b]);
        assert_eq!(s.latest_yearly_adjustment(), Some((date(2024, 1, 1), 2.5)));
    }

    #[test]
    fn empty_series_has_no_latest() {
        let s = IndicatorSeries::new("x", meta(), vec![]);
        assert!(s.is_empty());
        assert!(s.latest().is_none());
        assert!(s.latest_yearly_adjustment().is_none());
    }
}
