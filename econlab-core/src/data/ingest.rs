//! CSV ingest with column inference.
//!
//! Source files come from several vendors and rarely agree on headers. The
//! date and value columns are located by alias first and by content second;
//! everything else is optional. Parsing produces a [`ParsedTable`] of raw
//! rows plus file-level metadata, which [`build_series`] and
//! [`build_forecast`] turn into domain types using catalog defaults for
//! anything the file leaves out.

use chrono::{NaiveDate, NaiveDateTime};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analytics::change::pct_change;
use crate::catalog::IndicatorSpec;
use crate::domain::{
    ForecastPoint, ForecastSeries, IndicatorMeta, IndicatorSeries, Observation, PreferredDirection,
    Unit,
};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no header row")]
    NoHeader,

    #[error("no date column found (headers: {headers})")]
    NoDateColumn { headers: String },

    #[error("no value column found (headers: {headers})")]
    NoValueColumn { headers: String },

    #[error("unparseable date '{value}' on data row {row}")]
    BadDate { row: usize, value: String },
}

const DATE_ALIASES: &[&str] = &["date", "observation_date", "period", "month", "timestamp"];
const VALUE_ALIASES: &[&str] = &["value", "close", "price", "index", "level"];

/// Columns with a known meaning that are never picked as the value column.
const KNOWN_COLUMNS: &[&str] = &[
    "monthly_change",
    "yoy_change",
    "yearly_adjustment",
    "lower_ci",
    "upper_ci",
    "source",
    "unit",
    "preferred_direction",
    "description",
    "indicator_id",
    "last_updated_date",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One data row after column resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: NaiveDate,
    pub value: f64,
    pub monthly_change: Option<f64>,
    pub yoy_change: Option<f64>,
    pub yearly_adjustment: Option<f64>,
    pub lower_ci: Option<f64>,
    pub upper_ci: Option<f64>,
}

/// Text metadata carried by the file, taken from the latest row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileMetadata {
    pub source: Option<String>,
    pub unit: Option<String>,
    pub preferred_direction: Option<String>,
    pub description: Option<String>,
    pub indicator_id: Option<String>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    /// Rows sorted ascending by date.
    pub rows: Vec<RawRecord>,
    pub meta: FileMetadata,
    pub has_monthly_change: bool,
    pub has_yoy_change: bool,
    /// Rows dropped for having no value.
    pub dropped: usize,
}

/// Lowercase, trim, and map spaces and dashes to underscores.
pub fn normalize_header(h: &str) -> String {
    h.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

fn is_missing(cell: &str) -> bool {
    let c = cell.trim();
    c.is_empty()
        || c.eq_ignore_ascii_case("nan")
        || c.eq_ignore_ascii_case("na")
        || c.eq_ignore_ascii_case("n/a")
        || c.eq_ignore_ascii_case("null")
        || c.eq_ignore_ascii_case("none")
}

/// Parse a numeric cell. Missing markers yield `None`.
pub fn parse_number(cell: &str) -> Option<f64> {
    if is_missing(cell) {
        return None;
    }
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a date in any accepted format. `YYYY-MM` means the first of the month.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // Year-month only.
    let (y, m) = s.split_once('-')?;
    if y.len() == 4 && (1..=2).contains(&m.len()) {
        return NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1);
    }
    None
}

fn find_alias(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
}

fn first_non_empty<'a>(records: &'a [csv::StringRecord], col: usize) -> Option<&'a str> {
    records
        .iter()
        .filter_map(|r| r.get(col))
        .find(|c| !is_missing(c))
}

fn infer_date_column(headers: &[String], records: &[csv::StringRecord]) -> Option<usize> {
    find_alias(headers, DATE_ALIASES).or_else(|| {
        (0..headers.len()).find(|&col| {
            first_non_empty(records, col)
                .and_then(parse_date)
                .is_some()
        })
    })
}

fn infer_value_column(
    headers: &[String],
    records: &[csv::StringRecord],
    date_col: usize,
) -> Option<usize> {
    find_alias(headers, VALUE_ALIASES).or_else(|| {
        (0..headers.len()).find(|&col| {
            if col == date_col || KNOWN_COLUMNS.contains(&headers[col].as_str()) {
                return false;
            }
            let mut cells = records
                .iter()
                .filter_map(|r| r.get(col))
                .filter(|c| !is_missing(c))
                .peekable();
            cells.peek().is_some() && cells.all(|c| parse_number(c).is_some())
        })
    })
}

/// Parse CSV content from any reader.
pub fn parse_reader<R: io::Read>(reader: R) -> Result<ParsedTable, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(normalize_header).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::NoHeader);
    }
    let records: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>()?;

    let joined = || headers.join(",");
    let date_col =
        infer_date_column(&headers, &records).ok_or_else(|| IngestError::NoDateColumn {
            headers: joined(),
        })?;
    let value_col = infer_value_column(&headers, &records, date_col).ok_or_else(|| {
        IngestError::NoValueColumn {
            headers: joined(),
        }
    })?;

    let col = |name: &str| headers.iter().position(|h| h == name);
    let monthly_col = col("monthly_change");
    let yoy_col = col("yoy_change");
    let adj_col = col("yearly_adjustment");
    let lower_col = col("lower_ci");
    let upper_col = col("upper_ci");

    let num = |record: &csv::StringRecord, c: Option<usize>| {
        c.and_then(|c| record.get(c)).and_then(parse_number)
    };

    let mut rows = Vec::with_capacity(records.len());
    let mut dropped = 0;
    let mut meta = FileMetadata::default();

    for (i, record) in records.iter().enumerate() {
        let raw_date = record.get(date_col).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| IngestError::BadDate {
            row: i + 1,
            value: raw_date.to_string(),
        })?;

        let Some(value) = num(record, Some(value_col)) else {
            dropped += 1;
            continue;
        };

        rows.push(RawRecord {
            date,
            value,
            monthly_change: num(record, monthly_col),
            yoy_change: num(record, yoy_col),
            yearly_adjustment: num(record, adj_col),
            lower_ci: num(record, lower_col),
            upper_ci: num(record, upper_col),
        });

        // Later rows win, matching "latest row" metadata semantics.
        let text = |name: &str| {
            col(name)
                .and_then(|c| record.get(c))
                .filter(|s| !is_missing(s))
                .map(str::to_string)
        };
        for (slot, name) in [
            (&mut meta.source, "source"),
            (&mut meta.unit, "unit"),
            (&mut meta.preferred_direction, "preferred_direction"),
            (&mut meta.description, "description"),
            (&mut meta.indicator_id, "indicator_id"),
            (&mut meta.last_updated, "last_updated_date"),
        ] {
            if let Some(v) = text(name) {
                *slot = Some(v);
            }
        }
    }

    // Unit column may hold an empty string meaning "index"; keep it distinct
    // from a missing column.
    if meta.unit.is_none() {
        if let Some(c) = col("unit") {
            if !records.is_empty() && records.iter().all(|r| r.get(c).map_or(true, is_missing)) {
                meta.unit = Some(String::new());
            }
        }
    }

    rows.sort_by_key(|r| r.date);

    Ok(ParsedTable {
        rows,
        meta,
        has_monthly_change: monthly_col.is_some(),
        has_yoy_change: yoy_col.is_some(),
        dropped,
    })
}

/// Read and parse a CSV file.
pub fn read_file(path: &Path) -> Result<ParsedTable, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(io::BufReader::new(file))
}

/// Build an indicator series, deriving missing change columns and filling
/// metadata from `spec` where the file has none.
pub fn build_series(table: ParsedTable, spec: &IndicatorSpec) -> IndicatorSeries {
    let values: Vec<f64> = table.rows.iter().map(|r| r.value).collect();
    let n = values.len();

    let derived_monthly = (!table.has_monthly_change && n >= 2).then(|| pct_change(&values, 1));
    let derived_yoy = (!table.has_yoy_change && n >= 12).then(|| pct_change(&values, 12));

    let observations: Vec<Observation> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| Observation {
            date: r.date,
            value: r.value,
            monthly_change: derived_monthly
                .as_ref()
                .map_or(r.monthly_change, |d| d[i]),
            yoy_change: derived_yoy.as_ref().map_or(r.yoy_change, |d| d[i]),
            yearly_adjustment: r.yearly_adjustment,
        })
        .collect();

    let last_updated = table.meta.last_updated.clone().unwrap_or_else(|| {
        observations
            .last()
            .map(|o| o.date.format("%b-%y").to_string())
            .unwrap_or_default()
    });

    let meta = IndicatorMeta {
        source_name: table.meta.source.clone().unwrap_or_else(|| spec.name.clone()),
        unit: table
            .meta
            .unit
            .as_deref()
            .map_or(spec.unit, Unit::from_symbol),
        preferred_direction: parse_direction(table.meta.preferred_direction.as_deref(), spec),
        description: table
            .meta
            .description
            .clone()
            .unwrap_or_else(|| spec.description.clone()),
        last_updated,
    };

    IndicatorSeries::new(spec.id.clone(), meta, observations)
}

/// Build a forecast series, keeping only points on or after `cutoff`.
pub fn build_forecast(table: ParsedTable, spec: &IndicatorSpec, cutoff: NaiveDate) -> ForecastSeries {
    let points = table
        .rows
        .iter()
        .filter(|r| r.date >= cutoff)
        .map(|r| ForecastPoint {
            date: r.date,
            value: r.value,
            lower_ci: r.lower_ci,
            upper_ci: r.upper_ci,
        })
        .collect();

    ForecastSeries {
        indicator_id: table
            .meta
            .indicator_id
            .clone()
            .unwrap_or_else(|| spec.id.clone()),
        source_name: table
            .meta
            .source
            .clone()
            .unwrap_or_else(|| format!("{} - FORECAST", spec.name)),
        unit: table
            .meta
            .unit
            .as_deref()
            .map_or(spec.unit, Unit::from_symbol),
        preferred_direction: parse_direction(table.meta.preferred_direction.as_deref(), spec),
        points,
    }
}

fn parse_direction(raw: Option<&str>, spec: &IndicatorSpec) -> PreferredDirection {
    match raw {
        Some(s) => s.parse().unwrap_or_else(|e| {
            tracing::warn!(indicator = %spec.id, error = %e, "ignoring preferred_direction");
            spec.preferred_direction
        }),
        None => spec.preferred_direction,
    }
}
