//! Where a loaded series came from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of source a series was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Read from a CSV file under the data root.
    File,
    /// Synthesized because no file was found.
    Sample,
    /// Forecast projected from loaded history.
    Projected,
}

/// Human-readable provenance label plus the sample flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub label: String,
    pub origin: Origin,
}

impl Provenance {
    pub fn file(file_name: &str) -> Self {
        Self {
            label: format!("Data from file: {file_name}"),
            origin: Origin::File,
        }
    }

    pub fn forecast_file(file_name: &str) -> Self {
        Self {
            label: format!("Forecast from file: {file_name}"),
            origin: Origin::File,
        }
    }

    pub fn sample(source_name: &str) -> Self {
        Self {
            label: format!("Sample data ({source_name})"),
            origin: Origin::Sample,
        }
    }

    pub fn sample_forecast(source_name: &str) -> Self {
        Self {
            label: format!("Sample forecast data ({source_name})"),
            origin: Origin::Sample,
        }
    }

    pub fn projected_forecast(source_name: &str) -> Self {
        Self {
            label: format!("Generated forecast based on actual data ({source_name})"),
            origin: Origin::Projected,
        }
    }

    /// Anything not read from a file is placeholder data.
    pub fn is_sample(&self) -> bool {
        self.origin != Origin::File
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(Provenance::file("wti_oil.csv").label, "Data from file: wti_oil.csv");
        assert_eq!(
            Provenance::forecast_file("wti_oil_forecast.csv").label,
            "Forecast from file: wti_oil_forecast.csv"
        );
        assert_eq!(Provenance::sample("WTI").label, "Sample data (WTI)");
        assert_eq!(
            Provenance::projected_forecast("WTI").label,
            "Generated forecast based on actual data (WTI)"
        );
        assert_eq!(
            Provenance::sample_forecast("WTI").label,
            "Sample forecast data (WTI)"
        );
    }

    #[test]
    fn only_file_origin_is_actual_data() {
        assert!(!Provenance::file("a.csv").is_sample());
        assert!(Provenance::sample("a").is_sample());
        assert!(Provenance::projected_forecast("a").is_sample());
    }
}
