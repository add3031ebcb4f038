//! View state persistence — JSON save/load across restarts.

use std::path::Path;

use econlab_core::analytics::TimePeriod;
use serde::{Deserialize, Serialize};

use crate::app::{AppState, View};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub view: View,
    pub time_period: TimePeriod,
    pub show_forecasts: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            view: View::Main,
            time_period: TimePeriod::default(),
            show_forecasts: true,
        }
    }
}

/// Load persisted state from disk. `None` if the file is missing or corrupt.
pub fn load(path: &Path) -> Option<PersistedState> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable UI state");
            None
        }
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        view: app.view,
        time_period: app.period,
        show_forecasts: app.show_forecast,
    }
}

pub fn apply(app: &mut AppState, state: PersistedState) {
    app.view = state.view;
    app.period = state.time_period;
    app.show_forecast = state.show_forecasts;
    app.rebuild_cards();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_app;

    #[test]
    fn roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("econlab/state.json");

        let state = PersistedState {
            view: View::Correlation,
            time_period: TimePeriod::Last24Months,
            show_forecasts: false,
        };
        save(&path, &state).unwrap();
        assert_eq!(load(&path), Some(state));
    }

    #[test]
    fn missing_file_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load(&tmp.path().join("state.json")).is_none());
    }

    #[test]
    fn corrupt_file_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, r#"{"view": "Sources"}"#).unwrap();
        let state = load(&path).unwrap();
        assert_eq!(state.view, View::Sources);
        assert_eq!(state.time_period, TimePeriod::Last12Months);
        assert!(state.show_forecasts);
    }

    #[test]
    fn apply_then_extract() {
        let (_tmp, mut app) = sample_app();
        let state = PersistedState {
            view: View::Costs,
            time_period: TimePeriod::All,
            show_forecasts: false,
        };
        apply(&mut app, state.clone());
        assert_eq!(app.view, View::Costs);
        assert!(app.card("wti_oil").unwrap().forecast_note.is_none());
        assert_eq!(extract(&app), state);
    }
}
