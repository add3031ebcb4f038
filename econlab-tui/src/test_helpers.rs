//! Test helpers for building app state over sample data.

use std::path::PathBuf;

use chrono::NaiveDate;
use econlab_board::config::DisplayConfig;
use econlab_board::dashboard::Dashboard;
use econlab_board::data_loader::LoadOptions;
use econlab_core::data::DataDirs;
use econlab_core::Catalog;
use tempfile::TempDir;

use crate::app::AppState;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 17).unwrap()
}

/// Dashboard over an empty data root, so every indicator is sample data.
pub fn sample_dashboard(catalog: Catalog) -> (TempDir, Dashboard) {
    let tmp = tempfile::tempdir().unwrap();
    let dirs = DataDirs::at(tmp.path().join("data"));
    dirs.ensure().unwrap();
    let dashboard = Dashboard::load(
        dirs,
        catalog,
        LoadOptions {
            today: today(),
            allow_sample: true,
        },
    );
    (tmp, dashboard)
}

pub fn sample_app_with(catalog: Catalog) -> (TempDir, AppState) {
    let (tmp, dashboard) = sample_dashboard(catalog);
    let export_dir: PathBuf = tmp.path().join("export");
    let app = AppState::new(dashboard, &DisplayConfig::default(), export_dir);
    (tmp, app)
}

pub fn sample_app() -> (TempDir, AppState) {
    sample_app_with(Catalog::builtin())
}
