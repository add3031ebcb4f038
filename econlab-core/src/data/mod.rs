//! Data root layout, CSV ingest, CSV output and sample synthesis.

pub mod ingest;
pub mod paths;
pub mod sample;
pub mod writer;

pub use ingest::{IngestError, ParsedTable, RawRecord};
pub use paths::{DataDirs, DirReport};
pub use writer::{write_forecast_csv, write_series_csv};
