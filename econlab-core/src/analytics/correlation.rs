//! Monthly pivot and pairwise Pearson correlation across indicators.
//!
//! Each series is reduced to one value per calendar month (the last
//! observation in that month), then the months are outer-joined: a month any
//! series has becomes a row, and series without data that month get `None`.
//! Correlations use only the months where both sides have values.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::IndicatorSeries;

/// Calendar month key, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: impl Datelike) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Month-aligned values for several indicators.
#[derive(Debug, Clone)]
pub struct MonthlyPivot {
    pub months: Vec<YearMonth>,
    pub ids: Vec<String>,
    /// One column per id, each the same length as `months`.
    pub columns: Vec<Vec<Option<f64>>>,
}

/// Reduce each non-empty series to month-end values and outer-join on month.
pub fn monthly_pivot(series: &[IndicatorSeries]) -> MonthlyPivot {
    let per_series: Vec<(String, BTreeMap<YearMonth, f64>)> = series
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| {
            let mut by_month = BTreeMap::new();
            // Later observations overwrite earlier ones within a month.
            for o in &s.observations {
                by_month.insert(YearMonth::of(o.date), o.value);
            }
            (s.id.clone(), by_month)
        })
        .collect();

    let months: Vec<YearMonth> = per_series
        .iter()
        .flat_map(|(_, m)| m.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let columns = per_series
        .iter()
        .map(|(_, by_month)| months.iter().map(|m| by_month.get(m).copied()).collect())
        .collect();

    MonthlyPivot {
        months,
        ids: per_series.into_iter().map(|(id, _)| id).collect(),
        columns,
    }
}

/// Pearson correlation over positions where both inputs have values.
///
/// `None` when fewer than two pairs remain or either side has zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((*a, *b)),
            _ => None,
        })
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut sq_x = 0.0;
    let mut sq_y = 0.0;
    for (xi, yi) in &pairs {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
        sq_x += xi * xi;
        sq_y += yi * yi;
    }

    // Variance below rounding noise of the values themselves counts as zero.
    if var_x <= f64::EPSILON * sq_x || var_y <= f64::EPSILON * sq_y {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Qualitative strength of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    pub fn of(r: f64) -> Self {
        let a = r.abs();
        if a >= 0.7 {
            Strength::Strong
        } else if a >= 0.4 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Strong => "strong",
            Strength::Moderate => "moderate",
            Strength::Weak => "weak",
        }
    }
}

/// One off-diagonal entry of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub a: String,
    pub b: String,
    pub r: f64,
}

impl CorrelationPair {
    pub fn strength(&self) -> Strength {
        Strength::of(self.r)
    }

    /// Sentence describing the pair, e.g. "wti_oil and cruspi show a strong
    /// positive correlation (0.82)".
    pub fn describe(&self, name_a: &str, name_b: &str) -> String {
        let sign = if self.r >= 0.0 { "positive" } else { "negative" };
        format!(
            "{name_a} and {name_b} show a {} {sign} correlation ({:.2})",
            self.strength().as_str(),
            self.r
        )
    }
}

/// Square symmetric correlation matrix keyed by indicator id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub ids: Vec<String>,
    /// Row-major; `values[i][j]` is the correlation of `ids[i]` with `ids[j]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Build the matrix from loaded series.
    ///
    /// Returns `None` when fewer than two series have observations.
    pub fn from_series(series: &[IndicatorSeries]) -> Option<Self> {
        let pivot = monthly_pivot(series);
        Self::from_pivot(&pivot)
    }

    pub fn from_pivot(pivot: &MonthlyPivot) -> Option<Self> {
        let n = pivot.ids.len();
        if n < 2 {
            tracing::debug!(indicators = n, "not enough indicators for correlation");
            return None;
        }
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&pivot.columns[i], &pivot.columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Some(Self {
            ids: pivot.ids.clone(),
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.ids.iter().position(|id| id == a)?;
        let j = self.ids.iter().position(|id| id == b)?;
        self.values[i][j]
    }

    /// Defined off-diagonal pairs, strongest (by magnitude) first.
    pub fn strongest_pairs(&self, limit: usize) -> Vec<CorrelationPair> {
        let mut pairs: Vec<CorrelationPair> = Vec::new();
        for i in 0..self.ids.len() {
            for j in (i + 1)..self.ids.len() {
                if let Some(r) = self.values[i][j] {
                    pairs.push(CorrelationPair {
                        a: self.ids[i].clone(),
                        b: self.ids[j].clone(),
                        r,
                    });
                }
            }
        }
        pairs.sort_by(|x, y| y.r.abs().total_cmp(&x.r.abs()));
        pairs.truncate(limit);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IndicatorMeta, Observation, PreferredDirection, Unit};
    use chrono::NaiveDate;

    fn series(id: &str, points: &[(i32, u32, u32, f64)]) -> IndicatorSeries {
        let meta = IndicatorMeta {
            source_name: id.into(),
            unit: Unit::Index,
            preferred_direction: PreferredDirection::Neutral,
            description: String::new(),
            last_updated: String::new(),
        };
        let obs = points
            .iter()
            .map(|(y, m, d, v)| Observation::new(NaiveDate::from_ymd_opt(*y, *m, *d).unwrap(), *v))
            .collect();
        IndicatorSeries::new(id, meta, obs)
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let y = [Some(2.0), Some(4.0), Some(6.0)];
        let z = [Some(3.0), Some(2.0), Some(1.0)];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_scale_free() {
        let tiny = [Some(1e-7), Some(2e-7), Some(3e-7), Some(4e-7)];
        assert!((pearson(&tiny, &tiny).unwrap() - 1.0).abs() < 1e-12);
        let flat = [Some(0.1), Some(0.1), Some(0.1)];
        assert_eq!(pearson(&flat, &[Some(1.0), Some(2.0), Some(3.0)]), None);
    }

    #[test]
    fn pearson_undefined_cases() {
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
        assert_eq!(pearson(&[Some(1.0), Some(1.0)], &[Some(2.0), Some(3.0)]), None);
        assert_eq!(
            pearson(&[Some(1.0), None, Some(3.0)], &[None, Some(2.0), Some(5.0)]),
            None
        );
    }

    #[test]
    fn pivot_keeps_last_value_in_month() {
        let a = series("a", &[(2024, 1, 5, 1.0), (2024, 1, 20, 2.0), (2024, 2, 1, 3.0)]);
        let p = monthly_pivot(&[a]);
        assert_eq!(p.months.len(), 2);
        assert_eq!(p.columns[0], vec![Some(2.0), Some(3.0)]);
        assert_eq!(p.months[0].to_string(), "2024-01");
    }

    #[test]
    fn pivot_is_outer_join() {
        let a = series("a", &[(2024, 1, 1, 1.0), (2024, 2, 1, 2.0)]);
        let b = series("b", &[(2024, 2, 1, 5.0), (2024, 3, 1, 6.0)]);
        let p = monthly_pivot(&[a, b]);
        assert_eq!(p.months.len(), 3);
        assert_eq!(p.columns[0], vec![Some(1.0), Some(2.0), None]);
        assert_eq!(p.columns[1], vec![None, Some(5.0), Some(6.0)]);
    }

    #[test]
    fn matrix_requires_two_indicators() {
        let a = series("a", &[(2024, 1, 1, 1.0), (2024, 2, 1, 2.0)]);
        let empty = series("b", &[]);
        assert!(CorrelationMatrix::from_series(&[a, empty]).is_none());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let a = series("a", &[(2024, 1, 1, 1.0), (2024, 2, 1, 2.0), (2024, 3, 1, 4.0)]);
        let b = series("b", &[(2024, 1, 1, 3.0), (2024, 2, 1, 1.0), (2024, 3, 1, 0.5)]);
        let m = CorrelationMatrix::from_series(&[a, b]).unwrap();
        assert_eq!(m.get("a", "b"), m.get("b", "a"));
        assert!((m.get("a", "a").unwrap() - 1.0).abs() < 1e-12);
        assert!(m.get("a", "b").unwrap() < 0.0);
    }

    #[test]
    fn strongest_pairs_sorted_by_magnitude() {
        let a = series("a", &[(2024, 1, 1, 1.0), (2024, 2, 1, 2.0), (2024, 3, 1, 3.0)]);
        let b = series("b", &[(2024, 1, 1, 3.0), (2024, 2, 1, 2.0), (2024, 3, 1, 1.0)]);
        let c = series("c", &[(2024, 1, 1, 1.0), (2024, 2, 1, 3.0), (2024, 3, 1, 2.0)]);
        let m = CorrelationMatrix::from_series(&[a, b, c]).unwrap();
        let pairs = m.strongest_pairs(2);
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].a.as_str(), pairs[0].b.as_str()), ("a", "b"));
        assert_eq!(pairs[0].strength(), Strength::Strong);
        assert!(pairs[0].describe("A", "B").contains("strong negative"));
    }
}
