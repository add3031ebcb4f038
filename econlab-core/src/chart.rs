//! Chart assembly: plot-ready traces for indicator charts and the
//! correlation heatmap.
//!
//! Front ends only draw what these structs describe. All smoothing and color
//! decisions happen here so every renderer shows the same picture.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::correlation::CorrelationMatrix;
use crate::catalog::{title_case, IndicatorSpec, ReferenceLine};
use crate::domain::{ForecastSeries, IndicatorSeries, Unit};

/// Weight of the last historical value in the first forecast point.
pub const SEAM_HISTORY_WEIGHT: f64 = 0.7;
/// Share of the first point's bound range kept on each side of the blended value.
pub const SEAM_BAND_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Confidence band as parallel upper and lower traces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub upper: Vec<ChartPoint>,
    pub lower: Vec<ChartPoint>,
}

/// Forecast line anchored at the last historical point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastTrace {
    pub points: Vec<ChartPoint>,
    pub band: Option<Band>,
}

/// Blend the first forecast value toward the last historical value.
pub fn blend_seam(last_hist: f64, first_forecast: f64) -> f64 {
    SEAM_HISTORY_WEIGHT * last_hist + (1.0 - SEAM_HISTORY_WEIGHT) * first_forecast
}

impl ForecastTrace {
    /// Build the trace. `None` for an empty forecast.
    ///
    /// The trace starts at `(last_date, last_value)`. The first forecast
    /// point is blended toward the history and, if bounds exist, its band is
    /// re-centered on the blended value with a narrowed half-width.
    pub fn build(last_date: NaiveDate, last_value: f64, forecast: &ForecastSeries) -> Option<Self> {
        let first = forecast.first()?;
        let blended = blend_seam(last_value, first.value);

        let anchor = ChartPoint {
            date: last_date,
            value: last_value,
        };
        let mut points = Vec::with_capacity(forecast.len() + 1);
        points.push(anchor);
        for (i, p) in forecast.points.iter().enumerate() {
            points.push(ChartPoint {
                date: p.date,
                value: if i == 0 { blended } else { p.value },
            });
        }

        let band = forecast.has_bounds().then(|| {
            let mut upper = vec![anchor];
            let mut lower = vec![anchor];
            for (i, p) in forecast.points.iter().enumerate() {
                let Some((lo, hi)) = p.bounds() else { continue };
                let (lo, hi) = if i == 0 {
                    let half = (hi - lo) * SEAM_BAND_FRACTION;
                    (blended - half, blended + half)
                } else {
                    (lo, hi)
                };
                upper.push(ChartPoint {
                    date: p.date,
                    value: hi,
                });
                lower.push(ChartPoint {
                    date: p.date,
                    value: lo,
                });
            }
            Band { upper, lower }
        });

        Some(Self { points, band })
    }
}

/// Everything needed to draw one indicator's chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorChart {
    pub indicator_id: String,
    pub title: String,
    pub axis_title: &'static str,
    /// `$` for dollar units, else empty.
    pub value_prefix: &'static str,
    pub history: Vec<ChartPoint>,
    pub forecast: Option<ForecastTrace>,
    pub reference_line: Option<ReferenceLine>,
}

impl IndicatorChart {
    /// Assemble a chart. `None` when the series has no observations.
    pub fn build(
        spec: &IndicatorSpec,
        series: &IndicatorSeries,
        forecast: Option<&ForecastSeries>,
    ) -> Option<Self> {
        let last = series.latest()?;
        let history = series
            .observations
            .iter()
            .map(|o| ChartPoint {
                date: o.date,
                value: o.value,
            })
            .collect();

        let forecast = forecast.and_then(|f| ForecastTrace::build(last.date, last.value, f));
        let unit = series.meta.unit;
        let mut axis_spec = spec.clone();
        axis_spec.unit = unit;

        Some(Self {
            indicator_id: spec.id.clone(),
            title: series.meta.source_name.clone(),
            axis_title: axis_spec.axis_title(),
            value_prefix: if unit == Unit::Dollar { "$" } else { "" },
            history,
            forecast,
            reference_line: spec.reference_line,
        })
    }

    /// Date range covered by history and forecast.
    pub fn x_bounds(&self) -> (NaiveDate, NaiveDate) {
        let first = self.history[0].date;
        let last = self
            .forecast
            .as_ref()
            .and_then(|f| f.points.last())
            .map_or(self.history[self.history.len() - 1].date, |p| p.date);
        (first, last)
    }

    /// Value range over every drawn element, including the reference line.
    pub fn y_bounds(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut take = |v: f64| {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        };
        self.history.iter().for_each(|p| take(p.value));
        if let Some(f) = &self.forecast {
            f.points.iter().for_each(|p| take(p.value));
            if let Some(b) = &f.band {
                b.upper.iter().chain(b.lower.iter()).for_each(|p| take(p.value));
            }
        }
        if let Some(r) = self.reference_line {
            take(r.value);
        }
        if lo > hi {
            (0.0, 1.0)
        } else if lo == hi {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo, hi)
        }
    }
}

// ─── Heatmap ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Blue (−1) through white (0) to red (+1), positions on [0, 1].
pub const HEATMAP_SCALE: [(f64, Rgb); 7] = [
    (0.0, Rgb(0x00, 0x00, 0xCC)),
    (0.2, Rgb(0x66, 0x99, 0xFF)),
    (0.4, Rgb(0xCC, 0xDD, 0xFF)),
    (0.5, Rgb(0xFF, 0xFF, 0xFF)),
    (0.6, Rgb(0xFF, 0xDD, 0xCC)),
    (0.8, Rgb(0xFF, 0x66, 0x66)),
    (1.0, Rgb(0xCC, 0x00, 0x00)),
];

/// |r| at or above this gets light text.
pub const LIGHT_TEXT_THRESHOLD: f64 = 0.4;

/// Fill color for a correlation coefficient.
pub fn heatmap_color(r: f64) -> Rgb {
    let t = ((r.clamp(-1.0, 1.0) + 1.0) / 2.0).clamp(0.0, 1.0);
    for pair in HEATMAP_SCALE.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
            return Rgb(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2));
        }
    }
    HEATMAP_SCALE[HEATMAP_SCALE.len() - 1].1
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub value: Option<f64>,
    /// Two-decimal text, empty when undefined.
    pub text: String,
    pub fill: Option<Rgb>,
    pub light_text: bool,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()` squared.
    pub cells: Vec<Vec<HeatmapCell>>,
}

impl Heatmap {
    pub fn build(matrix: &CorrelationMatrix) -> Self {
        let labels = matrix.ids.iter().map(|id| title_case(id)).collect();
        let cells = matrix
            .values
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, v)| HeatmapCell {
                        value: *v,
                        text: v.map(|r| format!("{r:.2}")).unwrap_or_default(),
                        fill: v.map(heatmap_color),
                        light_text: v.is_some_and(|r| r.abs() >= LIGHT_TEXT_THRESHOLD),
                        emphasized: i == j,
                    })
                    .collect()
            })
            .collect();
        Self { labels, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::{ForecastPoint, IndicatorMeta, Observation, PreferredDirection};

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn series(id: &str, unit: Unit, values: &[f64]) -> IndicatorSeries {
        let obs = values
            .iter()
            .enumerate()
            .map(|(i, v)| Observation::new(d(2024, i as u32 + 1), *v))
            .collect();
        IndicatorSeries::new(
            id,
            IndicatorMeta {
                source_name: "Test".into(),
                unit,
                preferred_direction: PreferredDirection::Neutral,
                description: String::new(),
                last_updated: String::new(),
            },
            obs,
        )
    }

    fn forecast(points: Vec<ForecastPoint>) -> ForecastSeries {
        ForecastSeries {
            indicator_id: "x".into(),
            source_name: "x".into(),
            unit: Unit::Index,
            preferred_direction: PreferredDirection::Neutral,
            points,
        }
    }

    #[test]
    fn empty_series_has_no_chart() {
        let spec = Catalog::builtin().spec("cruspi");
        assert!(IndicatorChart::build(&spec, &series("cruspi", Unit::Index, &[]), None).is_none());
    }

    #[test]
    fn seam_is_blended_and_band_narrowed() {
        let spec = Catalog::builtin().spec("cruspi");
        let s = series("cruspi", Unit::Index, &[100.0, 110.0]);
        let f = forecast(vec![
            ForecastPoint::new(d(2024, 3), 120.0).with_bounds(110.0, 130.0),
            ForecastPoint::new(d(2024, 4), 125.0).with_bounds(112.0, 138.0),
        ]);
        let chart = IndicatorChart::build(&spec, &s, Some(&f)).unwrap();
        let trace = chart.forecast.unwrap();

        assert_eq!(trace.points.len(), 3);
        assert_eq!(trace.points[0].value, 110.0);
        assert_eq!(trace.points[0].date, d(2024, 2));
        assert!((trace.points[1].value - 113.0).abs() < 1e-9);
        assert_eq!(trace.points[2].value, 125.0);

        let band = trace.band.unwrap();
        assert_eq!(band.upper[0].value, 110.0);
        assert_eq!(band.lower[0].value, 110.0);
        assert!((band.upper[1].value - 119.0).abs() < 1e-9);
        assert!((band.lower[1].value - 107.0).abs() < 1e-9);
        assert_eq!(band.upper[2].value, 138.0);
    }

    #[test]
    fn band_skips_points_without_bounds() {
        let spec = Catalog::builtin().spec("cruspi");
        let s = series("cruspi", Unit::Index, &[100.0, 110.0]);
        let f = forecast(vec![
            ForecastPoint::new(d(2024, 3), 120.0).with_bounds(110.0, 130.0),
            ForecastPoint::new(d(2024, 4), 125.0),
            ForecastPoint::new(d(2024, 5), 130.0).with_bounds(120.0, 140.0),
        ]);
        let chart = IndicatorChart::build(&spec, &s, Some(&f)).unwrap();
        let trace = chart.forecast.unwrap();
        assert_eq!(trace.points.len(), 4);

        let band = trace.band.unwrap();
        let dates: Vec<_> = band.upper.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2024, 2), d(2024, 3), d(2024, 5)]);
        assert_eq!(band.lower.len(), 3);
        assert_eq!(band.upper[2].value, 140.0);
        assert_eq!(band.lower[2].value, 120.0);
    }

    #[test]
    fn no_band_without_bounds() {
        let spec = Catalog::builtin().spec("cruspi");
        let s = series("cruspi", Unit::Index, &[1.0]);
        let f = forecast(vec![ForecastPoint::new(d(2024, 2), 2.0)]);
        let chart = IndicatorChart::build(&spec, &s, Some(&f)).unwrap();
        assert!(chart.forecast.unwrap().band.is_none());
    }

    #[test]
    fn axis_and_prefix_follow_unit() {
        let cat = Catalog::builtin();
        let oil = IndicatorChart::build(
            &cat.spec("wti_oil"),
            &series("wti_oil", Unit::Dollar, &[70.0]),
            None,
        )
        .unwrap();
        assert_eq!(oil.axis_title, "USD per Barrel");
        assert_eq!(oil.value_prefix, "$");

        let sc = IndicatorChart::build(
            &cat.spec("supply_chain"),
            &series("supply_chain", Unit::Index, &[0.5, -0.2]),
            None,
        )
        .unwrap();
        assert_eq!(sc.axis_title, "Index Value");
        assert_eq!(sc.reference_line.unwrap().label, "Historical Average");
        // Zero line pulls the y range down to include it.
        assert_eq!(sc.y_bounds(), (-0.2, 0.5));
    }

    #[test]
    fn heatmap_colors() {
        assert_eq!(heatmap_color(-1.0), Rgb(0x00, 0x00, 0xCC));
        assert_eq!(heatmap_color(0.0), Rgb(0xFF, 0xFF, 0xFF));
        assert_eq!(heatmap_color(1.0), Rgb(0xCC, 0x00, 0x00));
        assert_eq!(heatmap_color(0.6).hex(), "#FF6666");
        assert_eq!(heatmap_color(5.0), heatmap_color(1.0));
    }

    #[test]
    fn heatmap_cells() {
        let m = CorrelationMatrix {
            ids: vec!["wti_oil".into(), "dollar_index".into()],
            values: vec![vec![Some(1.0), Some(-0.35)], vec![Some(-0.35), None]],
        };
        let h = Heatmap::build(&m);
        assert_eq!(h.labels, vec!["Wti Oil", "Dollar Index"]);
        assert_eq!(h.cells[0][0].text, "1.00");
        assert!(h.cells[0][0].light_text);
        assert!(h.cells[0][0].emphasized);
        assert_eq!(h.cells[0][1].text, "-0.35");
        assert!(!h.cells[0][1].light_text);
        assert_eq!(h.cells[1][1].text, "");
        assert!(h.cells[1][1].fill.is_none());
    }
}
