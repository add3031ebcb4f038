//! Application state — single-owner, main-thread only.
//!
//! Cards, the cost view and the heatmap are derived from the loaded
//! dashboard and rebuilt whenever the period, the forecast toggle or the
//! data changes, so drawing never touches the filesystem.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use econlab_board::card::IndicatorCard;
use econlab_board::config::DisplayConfig;
use econlab_board::costs::CostView;
use econlab_board::dashboard::{Dashboard, MAIN_SECTIONS};
use econlab_board::export::{self, CORRELATION_FILE, COST_ADJUSTMENTS_FILE, SOURCES_FILE};
use econlab_core::analytics::TimePeriod;
use econlab_core::chart::Heatmap;

/// Which view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Main,
    Costs,
    Correlation,
    Sources,
    Help,
}

impl View {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            View::Main => 0,
            View::Costs => 1,
            View::Correlation => 2,
            View::Sources => 3,
            View::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(View::Main),
            1 => Some(View::Costs),
            2 => Some(View::Correlation),
            3 => Some(View::Sources),
            4 => Some(View::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Main => "Main Dashboard",
            View::Costs => "Cost Indicators",
            View::Correlation => "Correlation Analysis",
            View::Sources => "Data Sources",
            View::Help => "Help",
        }
    }

    pub fn next(self) -> View {
        Self::from_index((self.index() + 1) % Self::COUNT).unwrap_or(View::Main)
    }

    pub fn prev(self) -> View {
        Self::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(View::Main)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Top-level application state.
pub struct AppState {
    pub view: View,
    pub running: bool,

    pub dashboard: Dashboard,
    pub period: TimePeriod,
    pub show_forecast: bool,

    // Derived
    /// One card per loaded entry, in dashboard order.
    pub cards: Vec<IndicatorCard>,
    pub costs: CostView,
    /// Equipment cards followed by material cards.
    pub cost_cards: Vec<IndicatorCard>,
    pub heatmap: Option<Heatmap>,

    // Cursors
    pub main_cursor: usize,
    pub cost_cursor: usize,
    pub scroll: usize,

    pub status_message: Option<(String, StatusLevel)>,
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(dashboard: Dashboard, display: &DisplayConfig, export_dir: PathBuf) -> Self {
        let costs = CostView::build(&dashboard);
        let mut app = Self {
            view: View::Main,
            running: true,
            dashboard,
            period: display.time_period,
            show_forecast: display.show_forecasts,
            cards: Vec::new(),
            costs,
            cost_cards: Vec::new(),
            heatmap: None,
            main_cursor: 0,
            cost_cursor: 0,
            scroll: 0,
            status_message: None,
            export_dir,
        };
        app.rebuild();
        app
    }

    /// Recompute everything derived from the dashboard.
    pub fn rebuild(&mut self) {
        self.costs = CostView::build(&self.dashboard);
        self.heatmap = self.dashboard.correlation.as_ref().map(Heatmap::build);
        self.rebuild_cards();
    }

    /// Recompute cards after a period or forecast change.
    pub fn rebuild_cards(&mut self) {
        let (period, show) = (self.period, self.show_forecast);
        self.cards = self
            .dashboard
            .entries
            .iter()
            .map(|e| IndicatorCard::build(e, period, show))
            .collect();
        self.cost_cards = self
            .costs
            .equipment
            .iter()
            .chain(&self.costs.materials)
            .map(|e| IndicatorCard::build(e, period, show))
            .collect();

        self.main_cursor = self.main_cursor.min(self.main_ids().len().saturating_sub(1));
        self.cost_cursor = self.cost_cursor.min(self.cost_cards.len().saturating_sub(1));
    }

    /// Loaded main-view indicator ids, in section order.
    pub fn main_ids(&self) -> Vec<&'static str> {
        MAIN_SECTIONS
            .iter()
            .flat_map(|s| s.ids.iter().copied())
            .filter(|id| self.dashboard.entry(id).is_some())
            .collect()
    }

    pub fn card(&self, id: &str) -> Option<&IndicatorCard> {
        self.cards.iter().find(|c| c.indicator_id == id)
    }

    pub fn selected_main_card(&self) -> Option<&IndicatorCard> {
        self.main_ids()
            .get(self.main_cursor)
            .and_then(|id| self.card(id))
    }

    pub fn selected_cost_card(&self) -> Option<&IndicatorCard> {
        self.cost_cards.get(self.cost_cursor)
    }

    /// Move the active view's cursor, or scroll views without one.
    pub fn move_cursor(&mut self, delta: isize) {
        let step = |pos: usize, len: usize| -> usize {
            if len == 0 {
                return 0;
            }
            pos.saturating_add_signed(delta).min(len - 1)
        };
        match self.view {
            View::Main => self.main_cursor = step(self.main_cursor, self.main_ids().len()),
            View::Costs => self.cost_cursor = step(self.cost_cursor, self.cost_cards.len()),
            _ => self.scroll = self.scroll.saturating_add_signed(delta),
        }
    }

    pub fn set_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.scroll = 0;
        }
    }

    pub fn cycle_period(&mut self, forward: bool) {
        self.period = if forward {
            self.period.next()
        } else {
            self.period.prev()
        };
        self.rebuild_cards();
        self.set_status(format!("Time period: {}", self.period.label()));
    }

    pub fn toggle_forecast(&mut self) {
        self.show_forecast = !self.show_forecast;
        self.rebuild_cards();
        let state = if self.show_forecast { "shown" } else { "hidden" };
        self.set_status(format!("Forecasts {state}"));
    }

    /// Reload every indicator from disk.
    pub fn reload(&mut self) {
        tracing::info!(root = %self.dashboard.dirs.root.display(), "reloading dashboard");
        self.dashboard = self.dashboard.reload();
        self.rebuild();
        let loaded = self.dashboard.entries.len();
        match self.dashboard.failures.len() {
            0 => self.set_status(format!("Reloaded {loaded} indicators")),
            failed => self.set_warning(format!("Reloaded {loaded} indicators, {failed} failed")),
        }
    }

    /// Export what the active view shows into `export_dir`.
    pub fn export(&mut self) {
        match self.export_current() {
            Ok(Some(msg)) => self.set_status(msg),
            Ok(None) => self.set_warning("Nothing to export from this view"),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.set_error(format!("Export failed: {e:#}"));
            }
        }
    }

    fn export_current(&self) -> Result<Option<String>> {
        let dir = &self.export_dir;
        let (file, contents) = match self.view {
            View::Main => {
                let written = export::export_all(&self.dashboard, dir)?;
                return Ok(Some(format!(
                    "Exported {} files to {}",
                    written.len(),
                    dir.display()
                )));
            }
            View::Correlation => {
                let Some(matrix) = &self.dashboard.correlation else {
                    return Ok(None);
                };
                (CORRELATION_FILE, export::export_correlation_csv(matrix)?)
            }
            View::Costs => (
                COST_ADJUSTMENTS_FILE,
                export::export_cost_adjustments_csv(&self.costs.adjustments)?,
            ),
            View::Sources => (SOURCES_FILE, export::export_sources_csv(&self.dashboard.sources())?),
            View::Help => return Ok(None),
        };

        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(file);
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "exported view");
        Ok(Some(format!("Saved {}", path.display())))
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
