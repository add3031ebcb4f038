//! Indicator and forecast loading for the dashboard.
//!
//! Given the data root and an indicator spec, loads the series from the first
//! readable candidate file. Implements the fallback policy:
//! 1. If a candidate file parses → use it
//! 2. If a candidate exists but fails to parse → log and try the next one
//! 3. If nothing is readable and sample data is allowed → synthesize (tagged)
//! 4. Otherwise → fail with a clear error
//!
//! Forecasts fall back to a projection from the loaded history, then to a
//! pure sample forecast. Every fallback is tagged through [`Provenance`].

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use econlab_core::data::{ingest, sample, DataDirs};
use econlab_core::{ForecastSeries, IndicatorSeries, IndicatorSpec, Provenance};
use thiserror::Error;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no readable data file for '{id}' and sample data is disabled")]
    NoData { id: String },

    #[error("data directory error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options controlling how series are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Anchor for sample synthesis and the forecast cutoff.
    pub today: NaiveDate,
    /// Synthesize sample series when no file is readable.
    pub allow_sample: bool,
}

impl LoadOptions {
    /// Options anchored at the local date.
    pub fn now(allow_sample: bool) -> Self {
        Self {
            today: Local::now().date_naive(),
            allow_sample,
        }
    }

    /// First day of the current month; earlier forecast rows are dropped.
    pub fn forecast_cutoff(&self) -> NaiveDate {
        self.today.with_day(1).unwrap_or(self.today)
    }
}

/// A loaded indicator plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedIndicator {
    pub series: IndicatorSeries,
    pub provenance: Provenance,
    /// File the series was read from, if any.
    pub path: Option<PathBuf>,
}

impl LoadedIndicator {
    pub fn using_sample(&self) -> bool {
        self.provenance.is_sample()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedForecast {
    pub forecast: ForecastSeries,
    pub provenance: Provenance,
    pub path: Option<PathBuf>,
}

impl LoadedForecast {
    pub fn using_sample(&self) -> bool {
        self.provenance.is_sample()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load one indicator's history.
pub fn load_indicator(
    dirs: &DataDirs,
    spec: &IndicatorSpec,
    opts: &LoadOptions,
) -> Result<LoadedIndicator, LoadError> {
    for path in dirs.indicator_candidates(&spec.id) {
        if !path.is_file() {
            continue;
        }
        tracing::info!(indicator = %spec.id, path = %path.display(), "loading data");
        match ingest::read_file(&path) {
            Ok(table) => {
                if table.dropped > 0 {
                    tracing::debug!(
                        indicator = %spec.id,
                        dropped = table.dropped,
                        "dropped rows without a value"
                    );
                }
                let series = ingest::build_series(table, spec);
                tracing::info!(
                    indicator = %spec.id,
                    latest = ?series.latest_date(),
                    rows = series.len(),
                    "loaded data"
                );
                return Ok(LoadedIndicator {
                    series,
                    provenance: Provenance::file(&file_name(&path)),
                    path: Some(path),
                });
            }
            Err(e) => {
                tracing::error!(
                    indicator = %spec.id,
                    path = %path.display(),
                    error = %e,
                    "error reading data file"
                );
            }
        }
    }

    if !opts.allow_sample {
        return Err(LoadError::NoData {
            id: spec.id.clone(),
        });
    }

    tracing::warn!(indicator = %spec.id, "no data files found, using sample data");
    Ok(LoadedIndicator {
        series: sample::sample_history(spec, opts.today),
        provenance: Provenance::sample(&spec.name),
        path: None,
    })
}

/// Load one indicator's forecast.
///
/// `history` is the already-loaded series, used for the projection fallback.
/// Returns `None` only when no file exists and sample data is disabled.
pub fn load_forecast(
    dirs: &DataDirs,
    spec: &IndicatorSpec,
    history: Option<&IndicatorSeries>,
    opts: &LoadOptions,
) -> Option<LoadedForecast> {
    let cutoff = opts.forecast_cutoff();
    for path in dirs.forecast_candidates(&spec.id) {
        if !path.is_file() {
            continue;
        }
        tracing::info!(indicator = %spec.id, path = %path.display(), "loading forecast");
        match ingest::read_file(&path) {
            Ok(table) => {
                let forecast = ingest::build_forecast(table, spec, cutoff);
                tracing::debug!(
                    indicator = %spec.id,
                    points = forecast.len(),
                    %cutoff,
                    "loaded forecast"
                );
                return Some(LoadedForecast {
                    forecast,
                    provenance: Provenance::forecast_file(&file_name(&path)),
                    path: Some(path),
                });
            }
            Err(e) => {
                tracing::error!(
                    indicator = %spec.id,
                    path = %path.display(),
                    error = %e,
                    "error reading forecast file"
                );
            }
        }
    }

    if !opts.allow_sample {
        tracing::info!(indicator = %spec.id, "no forecast file and sample data disabled");
        return None;
    }

    let projected = history
        .filter(|h| !h.is_empty())
        .and_then(|h| sample::project_forecast(spec, &h.values(), opts.today));
    if let Some(forecast) = projected {
        tracing::warn!(
            indicator = %spec.id,
            "no forecast file found, projecting from loaded data"
        );
        return Some(LoadedForecast {
            forecast,
            provenance: Provenance::projected_forecast(&spec.name),
            path: None,
        });
    }

    tracing::warn!(indicator = %spec.id, "no forecast file found, using sample forecast");
    Some(LoadedForecast {
        forecast: sample::sample_forecast(spec, opts.today),
        provenance: Provenance::sample_forecast(&spec.name),
        path: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use econlab_core::domain::Origin;
    use econlab_core::Catalog;

    fn opts(allow_sample: bool) -> LoadOptions {
        LoadOptions {
            today: NaiveDate::from_ymd_opt(2025, 3, 17).unwrap(),
            allow_sample,
        }
    }

    fn setup() -> (tempfile::TempDir, DataDirs) {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = DataDirs::at(tmp.path());
        dirs.ensure().unwrap();
        (tmp, dirs)
    }

    #[test]
    fn cutoff_is_first_of_month() {
        assert_eq!(
            opts(true).forecast_cutoff(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn reads_first_candidate() {
        let (_tmp, dirs) = setup();
        std::fs::write(
            dirs.processed.join("wti_oil_monthly.csv"),
            "Date,value\n2025-01-01,70\n2025-02-01,72\n",
        )
        .unwrap();
        std::fs::write(dirs.raw.join("wti_oil.csv"), "Date,value\n2025-01-01,1\n").unwrap();

        let spec = Catalog::builtin().spec("wti_oil");
        let loaded = load_indicator(&dirs, &spec, &opts(true)).unwrap();
        assert_eq!(loaded.provenance.label, "Data from file: wti_oil_monthly.csv");
        assert!(!loaded.using_sample());
        assert_eq!(loaded.series.values(), vec![70.0, 72.0]);
    }

    #[test]
    fn broken_candidate_falls_through() {
        let (_tmp, dirs) = setup();
        std::fs::write(dirs.processed.join("cruspi.csv"), "Date,value\nnot-a-date,5\n").unwrap();
        std::fs::write(dirs.root.join("cruspi.csv"), "Date,value\n2025-01-01,200\n").unwrap();

        let spec = Catalog::builtin().spec("cruspi");
        let loaded = load_indicator(&dirs, &spec, &opts(true)).unwrap();
        assert_eq!(loaded.provenance.label, "Data from file: cruspi.csv");
        assert_eq!(loaded.path, Some(dirs.root.join("cruspi.csv")));
    }

    #[test]
    fn missing_file_uses_sample() {
        let (_tmp, dirs) = setup();
        let spec = Catalog::builtin().spec("explosives");
        let loaded = load_indicator(&dirs, &spec, &opts(true)).unwrap();
        assert!(loaded.using_sample());
        assert_eq!(
            loaded.provenance.label,
            "Sample data (Explosives & Accessories Cost Index)"
        );
        assert_eq!(loaded.series.len(), 25);
    }

    #[test]
    fn missing_file_without_sample_fails() {
        let (_tmp, dirs) = setup();
        let spec = Catalog::builtin().spec("explosives");
        let err = load_indicator(&dirs, &spec, &opts(false)).unwrap_err();
        assert!(matches!(err, LoadError::NoData { ref id } if id == "explosives"));
    }

    #[test]
    fn forecast_file_is_cut_at_current_month() {
        let (_tmp, dirs) = setup();
        std::fs::write(
            dirs.forecasts.join("wti_oil_forecast.csv"),
            "Date,value,lower_ci,upper_ci\n2025-02-01,70,69,71\n2025-03-01,71,70,72\n2025-04-01,72,70,74\n",
        )
        .unwrap();
        let spec = Catalog::builtin().spec("wti_oil");
        let f = load_forecast(&dirs, &spec, None, &opts(true)).unwrap();
        assert_eq!(f.provenance.label, "Forecast from file: wti_oil_forecast.csv");
        assert_eq!(f.forecast.len(), 2);
        assert_eq!(f.forecast.points[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn forecast_projects_from_history() {
        let (_tmp, dirs) = setup();
        let spec = Catalog::builtin().spec("cruspi");
        let history = load_indicator(&dirs, &spec, &opts(true)).unwrap().series;
        let f = load_forecast(&dirs, &spec, Some(&history), &opts(true)).unwrap();
        assert_eq!(f.provenance.origin, Origin::Projected);
        assert!(f.using_sample());
        assert!(f.provenance.label.starts_with("Generated forecast based on actual data"));
        assert_eq!(f.forecast.len(), 6);
    }

    #[test]
    fn forecast_without_history_is_pure_sample() {
        let (_tmp, dirs) = setup();
        let spec = Catalog::builtin().spec("cruspi");
        let f = load_forecast(&dirs, &spec, None, &opts(true)).unwrap();
        assert_eq!(f.provenance.label, "Sample forecast data (CRU Steel Price Index)");
        assert_eq!(f.forecast.source_name, "CRU Steel Price Index - FORECAST (Sample)");
    }

    #[test]
    fn forecast_without_sample_is_none() {
        let (_tmp, dirs) = setup();
        let spec = Catalog::builtin().spec("cruspi");
        assert!(load_forecast(&dirs, &spec, None, &opts(false)).is_none());
    }
}
