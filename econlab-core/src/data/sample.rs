//! Deterministic placeholder data for indicators without source files.
//!
//! Each series is a noisy compounding walk whose drift and volatility depend
//! on what kind of index the id looks like. The RNG is seeded from a BLAKE3
//! hash of the id, so the same id always produces the same numbers for a
//! given anchor date.

use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::analytics::change::{mean_pct_change, pct_change};
use crate::catalog::IndicatorSpec;
use crate::domain::{ForecastPoint, ForecastSeries, IndicatorMeta, IndicatorSeries, Observation};

/// Years of sample history before the anchor month.
pub const HISTORY_YEARS: i32 = 2;
/// Number of forecast points generated.
pub const FORECAST_PERIODS: usize = 6;
/// Monthly drift used when history gives no usable trend.
const DEFAULT_DRIFT: f64 = 0.005;
/// Amplitude of the seasonal term, as a fraction per month. Kept two orders
/// of magnitude below a 0.2 swing so the seasonal wave stays smaller than the
/// drift and noise of every profile.
const SEASONAL_AMPLITUDE: f64 = 0.002;

/// Starting level, monthly drift (percent) and volatility (percent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleProfile {
    pub base: f64,
    pub trend: f64,
    pub volatility: f64,
}

/// Pick the profile by id substring.
pub fn profile_for(id: &str) -> SampleProfile {
    let (base, trend, volatility) = if id.contains("equipment") {
        (180.0, 0.30, 1.5)
    } else if id.contains("steel") {
        (200.0, 0.40, 2.0)
    } else if id.contains("cement") {
        (220.0, 0.25, 1.2)
    } else if id.contains("explosives") {
        (175.0, 0.35, 1.8)
    } else {
        (100.0, 0.5, 1.0)
    };
    SampleProfile {
        base,
        trend,
        volatility,
    }
}

/// Cost-type ids carry a yearly adjustment column.
pub fn is_cost_type(id: &str) -> bool {
    ["equipment", "steel", "cement", "explosives"]
        .iter()
        .any(|k| id.contains(k))
}

/// RNG seeded from the id and a stream label.
fn rng_for(id: &str, stream: &str) -> StdRng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(id.as_bytes());
    hasher.update(b"/");
    hasher.update(stream.as_bytes());
    StdRng::from_seed(*hasher.finalize().as_bytes())
}

fn noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    match Normal::new(0.0, std_dev) {
        Ok(n) => n.sample(rng),
        Err(_) => 0.0,
    }
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// `n` consecutive month starts beginning at `start`'s month.
pub fn month_starts(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let start = first_of_month(start);
    (0..n as u32)
        .filter_map(|i| start.checked_add_months(Months::new(i)))
        .collect()
}

/// Confidence bounds widening by half a percent per step.
fn with_bounds(date: NaiveDate, value: f64, i: usize) -> ForecastPoint {
    let half = 0.01 + 0.005 * i as f64;
    ForecastPoint::new(date, value).with_bounds(value * (1.0 - half), value * (1.0 + half))
}

/// Synthesize 25 monthly observations ending at `today`'s month.
pub fn sample_history(spec: &IndicatorSpec, today: NaiveDate) -> IndicatorSeries {
    let id = spec.id.as_str();
    let profile = profile_for(id);
    let cost = is_cost_type(id);
    let mut rng = rng_for(id, "history");

    let start = NaiveDate::from_ymd_opt(today.year() - HISTORY_YEARS, today.month(), 1)
        .unwrap_or_else(|| first_of_month(today));
    let mut dates = Vec::new();
    let mut d = start;
    while d <= today {
        dates.push(d);
        match d.checked_add_months(Months::new(1)) {
            Some(next) => d = next,
            None => break,
        }
    }

    let mut values: Vec<f64> = Vec::with_capacity(dates.len());
    for (i, date) in dates.iter().enumerate() {
        let value = if i == 0 {
            profile.base
        } else {
            let month = date.month() as f64;
            let seasonal = SEASONAL_AMPLITUDE * (2.0 * std::f64::consts::PI * month / 12.0).sin();
            let step = profile.trend / 100.0 + seasonal + noise(&mut rng, profile.volatility / 100.0);
            values[i - 1] * (1.0 + step)
        };
        values.push(value);
    }

    let monthly = pct_change(&values, 1);
    let yoy = pct_change(&values, 12);
    let observations = dates
        .iter()
        .enumerate()
        .map(|(i, date)| Observation {
            date: *date,
            value: values[i],
            monthly_change: monthly[i],
            yoy_change: yoy[i],
            yearly_adjustment: if cost { yoy[i] } else { None },
        })
        .collect::<Vec<_>>();

    let last_updated = dates
        .last()
        .map(|d| d.format("%b-%y").to_string())
        .unwrap_or_default();

    IndicatorSeries::new(
        id,
        IndicatorMeta {
            source_name: format!("{} (Sample Data)", spec.name),
            unit: spec.unit,
            preferred_direction: spec.preferred_direction,
            description: format!("{} (Sample Data)", spec.description),
            last_updated,
        },
        observations,
    )
}

/// Six-month placeholder forecast starting at `today`'s month.
pub fn sample_forecast(spec: &IndicatorSpec, today: NaiveDate) -> ForecastSeries {
    let mut rng = rng_for(&spec.id, "forecast");
    let base = profile_for(&spec.id).base;
    let dates = month_starts(today, FORECAST_PERIODS);

    let mut points: Vec<ForecastPoint> = Vec::with_capacity(dates.len());
    for (i, date) in dates.into_iter().enumerate() {
        let value = match points.last() {
            None => base * (1.0 + noise(&mut rng, 0.01)),
            Some(prev) => prev.value * (1.0 + 0.002 + noise(&mut rng, 0.005 * (i + 1) as f64)),
        };
        points.push(with_bounds(date, value, i));
    }

    ForecastSeries {
        indicator_id: spec.id.clone(),
        source_name: format!("{} - FORECAST (Sample)", spec.name),
        unit: spec.unit,
        preferred_direction: spec.preferred_direction,
        points,
    }
}

/// Project six months forward from the tail of `history`.
///
/// Drift is the mean 1-period change over the last six values. Returns
/// `None` when there are fewer than two values to take a trend from.
pub fn project_forecast(
    spec: &IndicatorSpec,
    history: &[f64],
    today: NaiveDate,
) -> Option<ForecastSeries> {
    if history.len() < 2 {
        return None;
    }
    let last = *history.last()?;
    let recent = &history[history.len().saturating_sub(6)..];
    let drift = mean_pct_change(recent).map_or(DEFAULT_DRIFT, |pct| pct / 100.0);

    let mut rng = rng_for(&spec.id, "projection");
    let dates = month_starts(today, FORECAST_PERIODS);
    let mut points: Vec<ForecastPoint> = Vec::with_capacity(dates.len());
    for (i, date) in dates.into_iter().enumerate() {
        let value = match points.last() {
            None => last * (1.0 + drift + noise(&mut rng, 0.001)),
            Some(prev) => prev.value * (1.0 + drift + noise(&mut rng, 0.002 * i as f64)),
        };
        points.push(with_bounds(date, value, i));
    }

    Some(ForecastSeries {
        indicator_id: spec.id.clone(),
        source_name: format!("{} - FORECAST", spec.name),
        unit: spec.unit,
        preferred_direction: spec.preferred_direction,
        points,
    })
}
