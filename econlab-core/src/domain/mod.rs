//! Domain types for EconLab

pub mod direction;
pub mod forecast;
pub mod provenance;
pub mod series;

pub use direction::{PreferredDirection, Unit};
pub use forecast::{ForecastPoint, ForecastSeries};
pub use provenance::{Origin, Provenance};
pub use series::{IndicatorMeta, IndicatorSeries, Observation};
