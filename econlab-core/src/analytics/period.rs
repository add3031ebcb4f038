//! Time-period filter for charts and cards.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{IndicatorSeries, Observation};

/// Lookback window anchored at a series' latest observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "last_6_months")]
    Last6Months,
    #[default]
    #[serde(rename = "last_12_months")]
    Last12Months,
    #[serde(rename = "last_24_months")]
    Last24Months,
    #[serde(rename = "all")]
    All,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Last6Months,
        TimePeriod::Last12Months,
        TimePeriod::Last24Months,
        TimePeriod::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::Last6Months => "Last 6 Months",
            TimePeriod::Last12Months => "Last 12 Months",
            TimePeriod::Last24Months => "Last 24 Months",
            TimePeriod::All => "All Data",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TimePeriod::Last6Months => "last_6_months",
            TimePeriod::Last12Months => "last_12_months",
            TimePeriod::Last24Months => "last_24_months",
            TimePeriod::All => "all",
        }
    }

    pub fn months(self) -> Option<u32> {
        match self {
            TimePeriod::Last6Months => Some(6),
            TimePeriod::Last12Months => Some(12),
            TimePeriod::Last24Months => Some(24),
            TimePeriod::All => None,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(1)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// First date kept when the latest observation is `latest`.
    pub fn start_date(self, latest: NaiveDate) -> Option<NaiveDate> {
        self.months()
            .map(|m| latest.checked_sub_months(Months::new(m)).unwrap_or(NaiveDate::MIN))
    }

    /// Observations within the window ending at the latest date, inclusive.
    ///
    /// Input must be sorted by date. The latest observation is always kept.
    pub fn filter(self, observations: &[Observation]) -> Vec<Observation> {
        let Some(latest) = observations.last().map(|o| o.date) else {
            return Vec::new();
        };
        let Some(start) = self.start_date(latest) else {
            return observations.to_vec();
        };
        let kept: Vec<Observation> = observations
            .iter()
            .filter(|o| o.date >= start && o.date <= latest)
            .cloned()
            .collect();
        tracing::debug!(
            period = self.key(),
            %latest,
            kept = kept.len(),
            "filtered observations"
        );
        kept
    }

    pub fn apply(self, series: &IndicatorSeries) -> IndicatorSeries {
        series.with_observations(self.filter(&series.observations))
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "last_6_months" | "6" | "6m" => Ok(TimePeriod::Last6Months),
            "last_12_months" | "12" | "12m" => Ok(TimePeriod::Last12Months),
            "last_24_months" | "24" | "24m" => Ok(TimePeriod::Last24Months),
            "all" | "all_data" => Ok(TimePeriod::All),
            other => Err(format!(
                "unknown time period '{other}' (expected last_6_months, last_12_months, last_24_months or all)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(n: u32) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        (0..n)
            .map(|i| Observation::new(start + Months::new(i), i as f64))
            .collect()
    }

    #[test]
    fn last_six_months_is_inclusive() {
        let obs = monthly(25);
        let kept = TimePeriod::Last6Months.filter(&obs);
        // Latest is 2024-01-01; window starts 2023-07-01 inclusive.
        assert_eq!(kept.len(), 7);
        assert_eq!(kept[0].date, NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
        assert_eq!(kept.last().unwrap().date, obs.last().unwrap().date);
    }

    #[test]
    fn all_keeps_everything() {
        let obs = monthly(5);
        assert_eq!(TimePeriod::All.filter(&obs).len(), 5);
    }

    #[test]
    fn empty_input() {
        assert!(TimePeriod::Last12Months.filter(&[]).is_empty());
    }

    #[test]
    fn month_end_anchor_clamps() {
        let obs = vec![
            Observation::new(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(), 1.0),
            Observation::new(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), 2.0),
            Observation::new(NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(), 3.0),
        ];
        let kept = TimePeriod::Last6Months.filter(&obs);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn cycling_and_parsing() {
        assert_eq!(TimePeriod::All.next(), TimePeriod::Last6Months);
        assert_eq!(TimePeriod::Last6Months.prev(), TimePeriod::All);
        assert_eq!("Last 24 Months".parse::<TimePeriod>(), Ok(TimePeriod::Last24Months));
        assert_eq!("all".parse::<TimePeriod>(), Ok(TimePeriod::All));
        assert!("forever".parse::<TimePeriod>().is_err());
        assert_eq!(TimePeriod::default(), TimePeriod::Last12Months);
    }

    #[test]
    fn serde_keys() {
        let json = serde_json::to_string(&TimePeriod::Last24Months).unwrap();
        assert_eq!(json, "\"last_24_months\"");
    }
}
