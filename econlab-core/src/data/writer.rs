//! CSV output in the same layout the ingest side reads back.

use std::io;

use crate::domain::{ForecastSeries, IndicatorSeries};

fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Write a series with columns
/// `Date,value,monthly_change,yoy_change,yearly_adjustment,source,indicator_id,unit,preferred_direction,description`.
pub fn write_series_csv<W: io::Write>(out: W, series: &IndicatorSeries) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "Date",
        "value",
        "monthly_change",
        "yoy_change",
        "yearly_adjustment",
        "source",
        "indicator_id",
        "unit",
        "preferred_direction",
        "description",
    ])?;

    let meta = &series.meta;
    for o in &series.observations {
        wtr.write_record([
            o.date.format("%Y-%m-%d").to_string().as_str(),
            &o.value.to_string(),
            &opt(o.monthly_change),
            &opt(o.yoy_change),
            &opt(o.yearly_adjustment),
            &meta.source_name,
            &series.id,
            meta.unit.symbol(),
            meta.preferred_direction.as_str(),
            &meta.description,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a forecast with columns
/// `Date,value,lower_ci,upper_ci,source,indicator_id,unit,preferred_direction`.
pub fn write_forecast_csv<W: io::Write>(out: W, forecast: &ForecastSeries) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "Date",
        "value",
        "lower_ci",
        "upper_ci",
        "source",
        "indicator_id",
        "unit",
        "preferred_direction",
    ])?;
    for p in &forecast.points {
        wtr.write_record([
            p.date.format("%Y-%m-%d").to_string().as_str(),
            &p.value.to_string(),
            &opt(p.lower_ci),
            &opt(p.upper_ci),
            &forecast.source_name,
            &forecast.indicator_id,
            forecast.unit.symbol(),
            forecast.preferred_direction.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
