//! EconLab Board — data resolution and dashboard assembly.
//!
//! This crate builds on `econlab-core` to provide:
//! - Configuration (TOML) and logging setup
//! - Indicator and forecast loading with file/projection/sample fallback
//! - Dashboard assembly: summaries, sections, sources, correlation
//! - Indicator cards with forecast notes and automated commentary
//! - Cost escalation view with yearly adjustments and methodology weights
//! - CSV/JSON export and data-directory setup

pub mod card;
pub mod commentary;
pub mod config;
pub mod costs;
pub mod dashboard;
pub mod data_loader;
pub mod export;
pub mod logging;
pub mod setup;

pub use card::{ChangeCell, ForecastNote, IndicatorCard};
pub use commentary::CommentaryInputs;
pub use config::{ConfigError, ConfigOverrides, DashboardConfig};
pub use costs::{AdjustmentFlag, CostAdjustment, CostView};
pub use dashboard::{
    Dashboard, IndicatorEntry, IndicatorSummary, LoadFailure, Section, SourceRow, MAIN_SECTIONS,
};
pub use data_loader::{load_forecast, load_indicator, LoadError, LoadOptions, LoadedForecast, LoadedIndicator};
pub use export::export_all;
pub use logging::LoggingConfig;
pub use setup::{run_setup, SetupError, SetupReport};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn dashboard_is_send_sync() {
        assert_send::<Dashboard>();
        assert_sync::<Dashboard>();
    }

    #[test]
    fn card_is_send_sync() {
        assert_send::<IndicatorCard>();
        assert_sync::<IndicatorCard>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<DashboardConfig>();
        assert_sync::<DashboardConfig>();
        assert_send::<LoadOptions>();
        assert_sync::<LoadOptions>();
    }

    #[test]
    fn cost_view_is_send_sync() {
        assert_send::<CostView>();
        assert_sync::<CostView>();
    }
}
