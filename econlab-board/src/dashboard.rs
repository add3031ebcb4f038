//! Dashboard assembly: load every catalog indicator, its forecast, the
//! headline summaries and the correlation matrix in one pass.
//!
//! A dashboard load never fails as a whole. Indicators that cannot be loaded
//! (no file with sample data disabled, or a file with no usable rows) are
//! recorded in [`Dashboard::failures`] and left out of every view.

use chrono::NaiveDate;
use econlab_core::analytics::change::{abs_change, ChangeMode};
use econlab_core::analytics::trend::classify_trend;
use econlab_core::analytics::{CorrelationMatrix, TrendReading};
use econlab_core::data::DataDirs;
use econlab_core::{Catalog, IndicatorSeries, IndicatorSpec, PreferredDirection, Unit};
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::data_loader::{
    load_forecast, load_indicator, LoadError, LoadOptions, LoadedForecast, LoadedIndicator,
};

/// One indicator as shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorEntry {
    pub spec: IndicatorSpec,
    pub indicator: LoadedIndicator,
    pub forecast: Option<LoadedForecast>,
}

impl IndicatorEntry {
    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn series(&self) -> &IndicatorSeries {
        &self.indicator.series
    }

    /// Latest monthly and year-over-year change.
    ///
    /// Percent mode reads the series' own change columns. Absolute mode
    /// takes point differences over 1 and 12 observations.
    pub fn latest_changes(&self) -> (Option<f64>, Option<f64>) {
        let series = self.series();
        match self.spec.change_mode {
            ChangeMode::Percent => series
                .latest()
                .map_or((None, None), |o| (o.monthly_change, o.yoy_change)),
            ChangeMode::Absolute => {
                let values = series.values();
                let last = |periods| abs_change(&values, periods).last().copied().flatten();
                (last(1), last(12))
            }
        }
    }

    /// Forecast values, when a non-empty forecast was loaded.
    pub fn forecast_values(&self) -> Option<Vec<f64>> {
        self.forecast
            .as_ref()
            .map(|f| f.forecast.values())
            .filter(|v| !v.is_empty())
    }
}

/// Headline numbers for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSummary {
    pub indicator_id: String,
    pub name: String,
    pub current_value: Option<f64>,
    pub monthly_change: Option<f64>,
    pub yoy_change: Option<f64>,
    pub change_mode: ChangeMode,
    pub unit: Unit,
    pub preferred_direction: PreferredDirection,
    pub description: String,
    pub trend: TrendReading,
    /// Latest observation month, `%b %Y`.
    pub last_updated: String,
    pub data_source: String,
    pub using_sample: bool,
    pub yearly_adjustment: Option<f64>,
}

impl IndicatorSummary {
    pub fn from_entry(entry: &IndicatorEntry) -> Self {
        let series = entry.series();
        let latest = series.latest();
        let (monthly_change, yoy_change) = entry.latest_changes();
        let forecast = entry.forecast_values();

        Self {
            indicator_id: entry.spec.id.clone(),
            name: series.meta.source_name.clone(),
            current_value: latest.map(|o| o.value),
            monthly_change,
            yoy_change,
            change_mode: entry.spec.change_mode,
            unit: series.meta.unit,
            preferred_direction: series.meta.preferred_direction,
            description: series.meta.description.clone(),
            trend: classify_trend(&series.values(), forecast.as_deref()),
            last_updated: series
                .latest_date()
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default(),
            data_source: entry.indicator.provenance.label.clone(),
            using_sample: entry.indicator.using_sample(),
            yearly_adjustment: latest.and_then(|o| o.yearly_adjustment),
        }
    }
}

/// Why an indicator is missing from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub indicator_id: String,
    pub reason: String,
}

/// One row of the data sources table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRow {
    pub indicator_id: String,
    pub name: String,
    pub source: String,
    pub is_sample: bool,
}

impl SourceRow {
    pub fn kind(&self) -> &'static str {
        if self.is_sample {
            "Sample Data"
        } else {
            "Actual Data"
        }
    }
}

/// A titled group of indicators on the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub ids: &'static [&'static str],
}

pub const MAIN_SECTIONS: [Section; 4] = [
    Section {
        title: "Key Economic Indicators",
        ids: &["supply_chain", "empire_prices_paid"],
    },
    Section {
        title: "Key Price Indicators",
        ids: &["cruspi", "wti_oil", "baltic_dry_index", "dollar_index"],
    },
    Section {
        title: "Raw Material & Input Costs",
        ids: &["ppi_steel_scrap", "pmi_input_us"],
    },
    Section {
        title: "Supply Chain Related Indicators",
        ids: &["ism_supplier_deliveries"],
    },
];

/// Methodology notes shown under the data sources table.
pub const METHODOLOGY_NOTES: &[&str] = &[
    "Data collection: indicators come from official sources including Bloomberg, NY Fed, BLS and ISM.",
    "Monthly change is the percent change from the previous observation; supply chain pressure uses point changes.",
    "Year-over-year change compares against the observation twelve periods earlier.",
    "Trend combines the average monthly change over the last six observations with the forecast's total move.",
    "Forecasts are simple projections and carry widening confidence bounds of 1% plus 0.5% per month.",
    "Correlations are Pearson coefficients between monthly indicator values.",
    "Cost indicators are composite indices built from weighted BLS PPI components.",
    "Sample data is synthesized deterministically when no source file is available.",
];

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub dirs: DataDirs,
    pub catalog: Catalog,
    pub options: LoadOptions,
    /// Loaded indicators in catalog order.
    pub entries: Vec<IndicatorEntry>,
    pub summaries: Vec<IndicatorSummary>,
    pub correlation: Option<CorrelationMatrix>,
    pub failures: Vec<LoadFailure>,
}

impl Dashboard {
    /// Resolve the data root from `config` and load everything.
    pub fn from_config(config: &DashboardConfig, today: NaiveDate) -> Result<Self, LoadError> {
        let dirs = DataDirs::discover(config.data.root.as_deref(), &config.data.search_paths)?;
        let options = LoadOptions {
            today,
            allow_sample: config.data.allow_sample,
        };
        Ok(Self::load(dirs, config.catalog(), options))
    }

    pub fn load(dirs: DataDirs, catalog: Catalog, options: LoadOptions) -> Self {
        let mut entries = Vec::with_capacity(catalog.len());
        let mut failures = Vec::new();

        for spec in catalog.specs() {
            let indicator = match load_indicator(&dirs, spec, &options) {
                Ok(i) => i,
                Err(e) => {
                    tracing::error!(indicator = %spec.id, error = %e, "error loading indicator");
                    failures.push(LoadFailure {
                        indicator_id: spec.id.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if indicator.series.is_empty() {
                tracing::warn!(indicator = %spec.id, "loaded series has no observations");
                failures.push(LoadFailure {
                    indicator_id: spec.id.clone(),
                    reason: format!("{} has no usable rows", indicator.provenance.label),
                });
                continue;
            }

            let forecast = load_forecast(&dirs, spec, Some(&indicator.series), &options)
                .filter(|f| !f.forecast.is_empty());
            entries.push(IndicatorEntry {
                spec: spec.clone(),
                indicator,
                forecast,
            });
        }

        let summaries = entries.iter().map(IndicatorSummary::from_entry).collect();
        let series: Vec<IndicatorSeries> = entries.iter().map(|e| e.series().clone()).collect();
        let correlation = CorrelationMatrix::from_series(&series);

        tracing::info!(
            loaded = entries.len(),
            failed = failures.len(),
            correlated = correlation.as_ref().map_or(0, |m| m.len()),
            "dashboard loaded"
        );

        Self {
            dirs,
            catalog,
            options,
            entries,
            summaries,
            correlation,
            failures,
        }
    }

    /// Reload with the same root, catalog and options.
    pub fn reload(&self) -> Self {
        Self::load(self.dirs.clone(), self.catalog.clone(), self.options.clone())
    }

    pub fn entry(&self, id: &str) -> Option<&IndicatorEntry> {
        self.entries.iter().find(|e| e.spec.id == id)
    }

    pub fn summary(&self, id: &str) -> Option<&IndicatorSummary> {
        self.summaries.iter().find(|s| s.indicator_id == id)
    }

    /// Loaded entries for a main-view section, in section order.
    pub fn section_entries(&self, section: &Section) -> Vec<&IndicatorEntry> {
        section.ids.iter().filter_map(|id| self.entry(id)).collect()
    }

    /// Loaded equipment and material cost indicators.
    pub fn cost_entries(&self) -> Vec<&IndicatorEntry> {
        self.entries
            .iter()
            .filter(|e| e.spec.category.is_cost())
            .collect()
    }

    /// Data sources table, one row per loaded indicator.
    ///
    /// A row counts as sample data when flagged, or when the provenance label
    /// or the series' own source name mentions "sample".
    pub fn sources(&self) -> Vec<SourceRow> {
        self.entries
            .iter()
            .map(|e| {
                let label = &e.indicator.provenance.label;
                let name = &e.series().meta.source_name;
                let mentions_sample = label.to_lowercase().contains("sample")
                    || name.to_lowercase().contains("sample");
                SourceRow {
                    indicator_id: e.spec.id.clone(),
                    name: name.clone(),
                    source: label.clone(),
                    is_sample: e.indicator.using_sample() || mentions_sample,
                }
            })
            .collect()
    }

    pub fn any_sample(&self) -> bool {
        self.entries.iter().any(|e| e.indicator.using_sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 17).unwrap()
    }

    fn load(catalog: Catalog, allow_sample: bool) -> (tempfile::TempDir, Dashboard) {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = DataDirs::at(tmp.path());
        dirs.ensure().unwrap();
        (tmp, Dashboard::load(dirs, catalog, LoadOptions { today: today(), allow_sample }))
    }

    #[test]
    fn all_sample_dashboard() {
        let (_tmp, d) = load(Catalog::builtin(), true);
        assert_eq!(d.entries.len(), 16);
        assert_eq!(d.summaries.len(), 16);
        assert!(d.failures.is_empty());
        assert!(d.any_sample());
        assert_eq!(d.correlation.as_ref().unwrap().len(), 16);
        assert!(d.entries.iter().all(|e| e.forecast.is_some()));

        let s = d.summary("wti_oil").unwrap();
        assert!(s.using_sample);
        assert_eq!(s.last_updated, "Mar 2025");
        assert!(s.data_source.starts_with("Sample data ("));
    }

    #[test]
    fn without_sample_everything_fails() {
        let (_tmp, d) = load(Catalog::builtin(), false);
        assert!(d.entries.is_empty());
        assert_eq!(d.failures.len(), 16);
        assert!(d.correlation.is_none());
    }

    #[test]
    fn supply_chain_changes_are_points() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = DataDirs::at(tmp.path());
        dirs.ensure().unwrap();
        let mut csv = String::from("Date,value\n");
        for m in 1..=12 {
            csv.push_str(&format!("2024-{m:02}-01,{}\n", -1.0 + 0.1 * m as f64));
        }
        csv.push_str("2025-01-01,0.5\n");
        std::fs::write(dirs.processed.join("supply_chain.csv"), csv).unwrap();

        let catalog = Catalog::builtin().select(&["supply_chain".to_string()]);
        let d = Dashboard::load(dirs, catalog, LoadOptions { today: today(), allow_sample: true });
        let s = d.summary("supply_chain").unwrap();
        assert_eq!(s.change_mode, ChangeMode::Absolute);
        assert!((s.monthly_change.unwrap() - 0.3).abs() < 1e-9);
        assert!((s.yoy_change.unwrap() - 1.4).abs() < 1e-9);
        assert!(!s.using_sample);
    }

    #[test]
    fn empty_file_is_a_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = DataDirs::at(tmp.path());
        dirs.ensure().unwrap();
        std::fs::write(dirs.processed.join("cruspi.csv"), "Date,value\n2025-01-01,\n").unwrap();
        let catalog = Catalog::builtin().select(&["cruspi".to_string(), "wti_oil".to_string()]);
        let d = Dashboard::load(dirs, catalog, LoadOptions { today: today(), allow_sample: true });
        assert_eq!(d.entries.len(), 1);
        assert_eq!(d.failures[0].indicator_id, "cruspi");
        // One usable series is not enough for a matrix.
        assert!(d.correlation.is_none());
    }

    #[test]
    fn sources_detect_sample_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = DataDirs::at(tmp.path());
        dirs.ensure().unwrap();
        std::fs::write(
            dirs.processed.join("cruspi.csv"),
            "Date,value,source\n2025-01-01,200,CRU (SAMPLE DATA)\n",
        )
        .unwrap();
        std::fs::write(dirs.processed.join("wti_oil.csv"), "Date,value\n2025-01-01,70\n").unwrap();
        let catalog = Catalog::builtin().select(&["cruspi".to_string(), "wti_oil".to_string()]);
        let d = Dashboard::load(dirs, catalog, LoadOptions { today: today(), allow_sample: true });

        let rows = d.sources();
        assert_eq!(rows[0].kind(), "Sample Data");
        assert_eq!(rows[0].source, "Data from file: cruspi.csv");
        assert_eq!(rows[1].kind(), "Actual Data");
    }

    #[test]
    fn sections_skip_missing_entries() {
        let catalog = Catalog::builtin().select(&["wti_oil".to_string()]);
        let (_tmp, d) = load(catalog, true);
        assert_eq!(d.section_entries(&MAIN_SECTIONS[1]).len(), 1);
        assert!(d.section_entries(&MAIN_SECTIONS[0]).is_empty());
    }

    #[test]
    fn reload_is_stable() {
        let (_tmp, d) = load(Catalog::builtin().select(&["cruspi".to_string()]), true);
        let again = d.reload();
        assert_eq!(again.entries, d.entries);
    }

    #[test]
    fn methodology_covers_collection_and_correlation() {
        assert!(METHODOLOGY_NOTES.iter().any(|n| n.starts_with("Data collection")));
        assert!(METHODOLOGY_NOTES.iter().any(|n| n.contains("Pearson")));
        assert!(METHODOLOGY_NOTES.iter().any(|n| n.contains("BLS PPI")));
    }
}
