//! EconLab Core — indicator domain types, data ingest, derived metrics, chart assembly.
//!
//! This crate contains everything that is pure data transformation:
//! - Domain types (observations, indicator series, forecasts, provenance)
//! - The built-in indicator catalog with per-indicator defaults
//! - Data-root discovery and CSV ingest with column inference
//! - Deterministic sample-data synthesis for missing feeds
//! - Percentage changes, impact and trend classification, period filtering
//! - Monthly pivot and pairwise Pearson correlation
//! - Chart assembly with forecast-seam smoothing and heatmap cells

pub mod analytics;
pub mod catalog;
pub mod chart;
pub mod data;
pub mod domain;

pub use catalog::{Catalog, IndicatorCategory, IndicatorSpec, ReferenceLine};
pub use domain::{
    ForecastPoint, ForecastSeries, IndicatorMeta, IndicatorSeries, Observation,
    PreferredDirection, Provenance, Unit,
};
