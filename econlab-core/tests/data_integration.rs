//! Integration tests for the on-disk data layout: discovery, candidate
//! files, ingest, and writing series back out.

use chrono::NaiveDate;
use econlab_core::catalog::Catalog;
use econlab_core::data::ingest::{build_forecast, build_series, read_file, IngestError};
use econlab_core::data::{sample, write_forecast_csv, write_series_csv, DataDirs};
use econlab_core::domain::{PreferredDirection, Unit};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

#[test]
fn vendor_export_with_odd_headers() {
    let tmp = tempfile::tempdir().unwrap();
    let dirs = DataDirs::at(tmp.path());
    dirs.ensure().unwrap();

    let path = dirs.raw.join("baltic_dry_index.csv");
    std::fs::write(
        &path,
        "Observation-Date , PX_LAST ,Ticker\n\
         03/01/2025,1500.5,BDIY\n\
         01/01/2025,1400,BDIY\n\
         02/01/2025,NA,BDIY\n",
    )
    .unwrap();

    let table = read_file(&path).unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.dropped, 1);

    let spec = Catalog::builtin().spec("baltic_dry_index");
    let series = build_series(table, &spec);
    assert_eq!(series.meta.source_name, "Baltic Dry Index (BDIY Index)");
    assert_eq!(series.meta.preferred_direction, PreferredDirection::Neutral);
    assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2025, 1, 1));
    assert_eq!(series.latest().unwrap().value, 1500.5);
    assert_eq!(series.meta.last_updated, "Mar-25");
}

#[test]
fn missing_file_reports_path() {
    let err = read_file(std::path::Path::new("/definitely/not/here.csv")).unwrap_err();
    match err {
        IngestError::Io { path, .. } => assert!(path.ends_with("here.csv")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sample_series_round_trip_through_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let dirs = DataDirs::at(tmp.path());
    dirs.ensure().unwrap();
    let catalog = Catalog::builtin();
    let spec = catalog.spec("wti_oil");

    let history = sample::sample_history(&spec, today());
    let forecast = sample::sample_forecast(&spec, today());

    let hist_path = dirs.processed.join("wti_oil.csv");
    write_series_csv(std::fs::File::create(&hist_path).unwrap(), &history).unwrap();
    let fc_path = dirs.forecasts.join("wti_oil_forecast.csv");
    write_forecast_csv(std::fs::File::create(&fc_path).unwrap(), &forecast).unwrap();

    assert!(dirs.indicator_candidates("wti_oil").contains(&hist_path));
    assert!(dirs.forecast_candidates("wti_oil").contains(&fc_path));

    let back = build_series(read_file(&hist_path).unwrap(), &spec);
    assert_eq!(back.len(), 25);
    assert_eq!(back.meta.unit, Unit::Dollar);
    assert_eq!(back.values(), history.values());

    let cutoff = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let fc_back = build_forecast(read_file(&fc_path).unwrap(), &spec, cutoff);
    assert_eq!(fc_back.len(), 6);
    assert!(fc_back.has_bounds());
    assert!(fc_back.source_name.ends_with("FORECAST (Sample)"));
}
