//! Export — CSV and JSON artifacts for analysts.
//!
//! - **Series CSV**: one file per indicator, in the layout ingest reads back
//! - **Correlation CSV**: `indicator_correlations.csv`
//! - **Cost adjustments CSV**: `cost_adjustments.csv`
//! - **Sources CSV**: where every indicator came from
//! - **Summary JSON**: the headline numbers for every indicator

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use econlab_core::analytics::CorrelationMatrix;
use econlab_core::data::{write_forecast_csv, write_series_csv};
use econlab_core::{ForecastSeries, IndicatorSeries};

use crate::costs::{CostAdjustment, CostView};
use crate::dashboard::{Dashboard, IndicatorSummary, SourceRow};

pub const CORRELATION_FILE: &str = "indicator_correlations.csv";
pub const COST_ADJUSTMENTS_FILE: &str = "cost_adjustments.csv";
pub const SOURCES_FILE: &str = "data_sources.csv";
pub const SUMMARY_FILE: &str = "summary.json";

fn into_string(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── CSV export ─────────────────────────────────────────────────────

pub fn export_series_csv(series: &IndicatorSeries) -> Result<String> {
    let mut buf = Vec::new();
    write_series_csv(&mut buf, series)
        .with_context(|| format!("failed to write series {}", series.id))?;
    String::from_utf8(buf).context("CSV output is not valid UTF-8")
}

pub fn export_forecast_csv(forecast: &ForecastSeries) -> Result<String> {
    let mut buf = Vec::new();
    write_forecast_csv(&mut buf, forecast)
        .with_context(|| format!("failed to write forecast {}", forecast.indicator_id))?;
    String::from_utf8(buf).context("CSV output is not valid UTF-8")
}

/// Correlation matrix with an empty corner cell, a header row of ids and one
/// row per id. Undefined entries are empty.
pub fn export_correlation_csv(matrix: &CorrelationMatrix) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec![String::new()];
    header.extend(matrix.ids.iter().cloned());
    wtr.write_record(&header)?;

    for (id, row) in matrix.ids.iter().zip(&matrix.values) {
        let mut record = vec![id.clone()];
        record.extend(row.iter().map(|r| r.map(|v| v.to_string()).unwrap_or_default()));
        wtr.write_record(&record)?;
    }

    into_string(wtr)
}

/// Columns: Indicator, Adjustment, Effective Period.
pub fn export_cost_adjustments_csv(adjustments: &[CostAdjustment]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["Indicator", "Adjustment", "Effective Period"])?;
    for a in adjustments {
        wtr.write_record([a.name.as_str(), &a.adjustment_text(), &a.effective_period()])?;
    }
    into_string(wtr)
}

/// Columns: Indicator, Source, Type.
pub fn export_sources_csv(rows: &[SourceRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["Indicator", "Source", "Type"])?;
    for r in rows {
        wtr.write_record([r.name.as_str(), &r.source, r.kind()])?;
    }
    into_string(wtr)
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_summary_json(summaries: &[IndicatorSummary]) -> Result<String> {
    serde_json::to_string_pretty(summaries).context("failed to serialize summaries to JSON")
}

// ─── Bundle ─────────────────────────────────────────────────────────

/// Write every artifact under `output_dir`:
/// - `{id}.csv` and `{id}_forecast.csv` per indicator
/// - `indicator_correlations.csv` when a matrix exists
/// - `cost_adjustments.csv`, `data_sources.csv`, `summary.json`
///
/// Returns the written paths.
pub fn export_all(dashboard: &Dashboard, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create export dir: {}", output_dir.display()))?;
    let mut written = Vec::new();
    let mut write = |name: String, contents: String| -> Result<()> {
        let path = output_dir.join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
        Ok(())
    };

    for entry in &dashboard.entries {
        write(format!("{}.csv", entry.spec.id), export_series_csv(entry.series())?)?;
        if let Some(f) = &entry.forecast {
            write(
                format!("{}_forecast.csv", entry.spec.id),
                export_forecast_csv(&f.forecast)?,
            )?;
        }
    }

    if let Some(matrix) = &dashboard.correlation {
        write(CORRELATION_FILE.to_string(), export_correlation_csv(matrix)?)?;
    }

    let costs = CostView::build(dashboard);
    write(
        COST_ADJUSTMENTS_FILE.to_string(),
        export_cost_adjustments_csv(&costs.adjustments)?,
    )?;
    write(SOURCES_FILE.to_string(), export_sources_csv(&dashboard.sources())?)?;
    write(SUMMARY_FILE.to_string(), export_summary_json(&dashboard.summaries)?)?;

    tracing::info!(dir = %output_dir.display(), files = written.len(), "export complete");
    Ok(written)
}
