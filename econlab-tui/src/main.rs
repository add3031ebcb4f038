//! EconLab TUI — terminal dashboard for economic and cost indicators.
//!
//! Views:
//! 1. Main Dashboard — indicator sections with cards and charts
//! 2. Cost Indicators — yearly adjustments, cost cards, component weights
//! 3. Correlation Analysis — heatmap and strongest relationships
//! 4. Data Sources — provenance of every indicator
//! 5. Help — keyboard shortcuts

mod app;
mod input;
mod persistence;
mod theme;
mod ui;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use econlab_board::config::DashboardConfig;
use econlab_board::dashboard::Dashboard;

use crate::app::AppState;

const LOG_FILE: &str = "econlab-tui.log";
const STATE_FILE: &str = "state.json";

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("econlab");
    let state_path = config_dir.join(STATE_FILE);
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config =
        DashboardConfig::load(config_path.as_deref()).context("failed to load configuration")?;
    config
        .logging
        .init_to_file(&config_dir.join(LOG_FILE))
        .context("failed to open log file")?;

    let today = chrono::Local::now().date_naive();
    let dashboard =
        Dashboard::from_config(&config, today).context("failed to resolve data directory")?;

    let mut app = AppState::new(dashboard, &config.display, PathBuf::from("export"));
    if let Some(persisted) = persistence::load(&state_path) {
        persistence::apply(&mut app, persisted);
    }
    if !app.dashboard.failures.is_empty() {
        app.set_warning(format!(
            "{} indicators failed to load, see Data Sources",
            app.dashboard.failures.len()
        ));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    if let Err(e) = persistence::save(&state_path, &persistence::extract(&app)) {
        tracing::warn!(path = %state_path.display(), error = %e, "failed to save UI state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
