//! Short projected continuations of an indicator series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PreferredDirection, Unit};

/// One forecast point with optional confidence bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub lower_ci: Option<f64>,
    pub upper_ci: Option<f64>,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value,
            lower_ci: None,
            upper_ci: None,
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_ci = Some(lower);
        self.upper_ci = Some(upper);
        self
    }

    /// Both bounds, when present.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.lower_ci, self.upper_ci) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub indicator_id: String,
    pub source_name: String,
    pub unit: Unit,
    pub preferred_direction: PreferredDirection,
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> Option<&ForecastPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// True when any point carries both confidence bounds.
    pub fn has_bounds(&self) -> bool {
        self.points.iter().any(|p| p.bounds().is_some())
    }

    /// Drop points dated before `cutoff`.
    pub fn retain_from(&mut self, cutoff: NaiveDate) {
        self.points.retain(|p| p.date >= cutoff);
    }
}
