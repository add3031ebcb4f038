//! EconLab CLI — indicator summaries, cards, correlation, cost adjustments.
//!
//! Commands:
//! - `summary` — headline numbers for every indicator
//! - `show` — one indicator's card, with recent history
//! - `correlation` — pairwise correlation matrix and strongest pairs
//! - `costs` — yearly cost adjustments and methodology weights
//! - `sources` — where every indicator's data came from
//! - `export` — write CSV/JSON artifacts to a directory
//! - `setup` — create the data directory and seed it
//! - `verify` — report the data directory's contents

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use econlab_board::card::IndicatorCard;
use econlab_board::config::{ConfigOverrides, DashboardConfig};
use econlab_board::costs::{self, AdjustmentFlag, CostView};
use econlab_board::dashboard::{Dashboard, METHODOLOGY_NOTES};
use econlab_board::export::{self, export_all};
use econlab_board::setup::run_setup;
use econlab_core::analytics::change::{format_change, format_value};
use econlab_core::analytics::TimePeriod;
use econlab_core::catalog::title_case;
use econlab_core::data::{DataDirs, DirReport};

#[derive(Parser)]
#[command(
    name = "econlab",
    about = "EconLab CLI — economic and commodity indicator dashboard"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./econlab.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data root. Overrides discovery and the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Fail instead of synthesizing sample data for missing files.
    #[arg(long, global = true, default_value_t = false)]
    no_sample: bool,

    /// Time period: 6m, 12m, 24m or all.
    #[arg(long, global = true)]
    period: Option<TimePeriod>,

    /// Hide forecasts.
    #[arg(long, global = true, default_value_t = false)]
    no_forecast: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline numbers for every indicator.
    Summary {
        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show one indicator's card.
    Show {
        /// Indicator id (e.g., wti_oil, supply_chain).
        id: String,
    },
    /// Correlation matrix and strongest pairs.
    Correlation {
        /// Also write the matrix as CSV to this file.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of strongest pairs to list.
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Yearly cost adjustments and methodology weights.
    Costs {
        /// Also write the adjustments as CSV to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Where every indicator's data came from.
    Sources {
        /// Also write the table as CSV to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write series, forecasts, correlation, costs, sources and summary files.
    Export {
        /// Output directory.
        #[arg(long, default_value = "export")]
        out: PathBuf,
    },
    /// Create the data directory, copy seed files, or write sample files.
    Setup {
        /// Directory searched for `data/` and `indicator_data/` seed folders.
        #[arg(long, default_value = ".")]
        search_root: PathBuf,
    },
    /// Report the data directory's subdirectories and files.
    Verify,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        DashboardConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply(&ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        no_sample: cli.no_sample,
        period: cli.period,
        no_forecast: cli.no_forecast,
    });
    config.logging.init();

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Summary { json } => run_summary(&config, today, json),
        Commands::Show { id } => run_show(&config, today, &id),
        Commands::Correlation { output, top } => run_correlation(&config, today, output, top),
        Commands::Costs { output } => run_costs(&config, today, output),
        Commands::Sources { output } => run_sources(&config, today, output),
        Commands::Export { out } => run_export(&config, today, &out),
        Commands::Setup { search_root } => run_setup_cmd(&config, today, &search_root),
        Commands::Verify => run_verify(&config),
    }
}

fn load_dashboard(config: &DashboardConfig, today: NaiveDate) -> Result<Dashboard> {
    let dashboard =
        Dashboard::from_config(config, today).context("failed to resolve data directory")?;
    tracing::info!(
        root = %dashboard.dirs.root.display(),
        loaded = dashboard.entries.len(),
        failed = dashboard.failures.len(),
        "dashboard loaded"
    );
    for failure in &dashboard.failures {
        eprintln!("WARNING: {}: {}", failure.indicator_id, failure.reason);
    }
    if dashboard.entries.is_empty() {
        bail!(
            "no indicators could be loaded from {} (sample data disabled?)",
            dashboard.dirs.root.display()
        );
    }
    Ok(dashboard)
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Saved to: {}", path.display());
    Ok(())
}

fn run_summary(config: &DashboardConfig, today: NaiveDate, json: bool) -> Result<()> {
    let dashboard = load_dashboard(config, today)?;

    if json {
        println!("{}", export::export_summary_json(&dashboard.summaries)?);
        return Ok(());
    }

    println!("Data root: {}", dashboard.dirs.root.display());
    println!();
    println!(
        "{:<24} {:>12} {:>10} {:>10} {:<14} {:<9} {:<8}",
        "Indicator", "Value", "Monthly", "YoY", "Trend", "Updated", "Data"
    );
    println!("{}", "-".repeat(93));
    for s in &dashboard.summaries {
        println!(
            "{:<24} {:>12} {:>10} {:>10} {:<14} {:<9} {:<8}",
            s.indicator_id,
            format_value(s.current_value, s.unit),
            format_change(s.monthly_change, s.change_mode),
            format_change(s.yoy_change, s.change_mode),
            s.trend.trend.label(),
            s.last_updated,
            if s.using_sample { "sample" } else { "file" },
        );
    }
    if dashboard.any_sample() {
        println!();
        println!("WARNING: some indicators are using sample data");
    }
    Ok(())
}

fn run_show(config: &DashboardConfig, today: NaiveDate, id: &str) -> Result<()> {
    let dashboard = load_dashboard(config, today)?;
    let Some(entry) = dashboard.entry(id) else {
        bail!(
            "unknown or unloaded indicator '{id}'. Loaded: {}",
            dashboard
                .entries
                .iter()
                .map(|e| e.id())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let period = config.display.time_period;
    let card = IndicatorCard::build(entry, period, config.display.show_forecasts);

    println!();
    println!("=== {} ===", card.name);
    println!("Current Value:  {}", card.current_text);
    println!(
        "Monthly Change: {} {}  ({} impact)",
        card.monthly.text,
        card.monthly.impact.symbol(),
        card.monthly.impact.impact.as_str()
    );
    println!(
        "Year-over-Year: {} {}  ({} impact)",
        card.yoy.text,
        card.yoy.impact.symbol(),
        card.yoy.impact.impact.as_str()
    );
    println!("Trend:          {}. {}", card.trend.trend.label(), card.trend.description);
    if let Some(note) = &card.forecast_note {
        println!("{}", note.text());
    }
    println!();
    println!("{}", card.description);
    if let Some(warning) = card.sample_warning {
        println!("{warning}");
    }
    println!("Last updated: {}", card.last_updated);
    if let Some(text) = &card.commentary {
        println!();
        println!("{text}");
    }

    if let Some(chart) = &card.chart {
        println!();
        println!("--- {} ({}) ---", chart.axis_title, period.label());
        for p in &chart.history {
            println!("{}  {}{:.2}", p.date.format("%Y-%m"), chart.value_prefix, p.value);
        }
        if let Some(f) = &chart.forecast {
            for p in f.points.iter().skip(1) {
                println!("{}  {}{:.2}  (forecast)", p.date.format("%Y-%m"), chart.value_prefix, p.value);
            }
        }
        if let Some(line) = &chart.reference_line {
            println!("Reference: {} at {:.2}", line.label, line.value);
        }
    }
    println!();
    Ok(())
}

fn run_correlation(
    config: &DashboardConfig,
    today: NaiveDate,
    output: Option<PathBuf>,
    top: usize,
) -> Result<()> {
    let dashboard = load_dashboard(config, today)?;
    let Some(matrix) = &dashboard.correlation else {
        println!("Not enough indicators with data to compute correlations.");
        return Ok(());
    };

    println!();
    print!("{:<26}", "");
    for i in 0..matrix.len() {
        print!("{:>7}", format!("[{i}]"));
    }
    println!();
    for (i, (id, row)) in matrix.ids.iter().zip(&matrix.values).enumerate() {
        let label = format!("[{i}] {}", title_case(id));
        print!("{:<26}", truncate(&label, 25));
        for r in row {
            match r {
                Some(v) => print!("{v:>7.2}"),
                None => print!("{:>7}", "-"),
            }
        }
        println!();
    }

    println!();
    println!("Correlation ranges from -1 (move in opposite directions) to +1 (move together).");
    println!("Values near 0 mean no linear relationship over the overlapping months.");

    let pairs = matrix.strongest_pairs(top);
    if !pairs.is_empty() {
        println!();
        println!("--- Strongest relationships ---");
        for p in &pairs {
            println!("  {}", p.describe(&title_case(&p.a), &title_case(&p.b)));
        }
    }

    if let Some(path) = output {
        write_output(&path, &export::export_correlation_csv(matrix)?)?;
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).chain(std::iter::once('…')).collect()
    }
}

fn run_costs(config: &DashboardConfig, today: NaiveDate, output: Option<PathBuf>) -> Result<()> {
    let dashboard = load_dashboard(config, today)?;
    let view = CostView::build(&dashboard);

    if view.synthesized {
        println!("WARNING: no cost indicator data found, showing generated sample data");
    }

    println!();
    println!("=== Year-Over-Year Adjustments (Cost Escalation) ===");
    if view.adjustments.is_empty() {
        println!("No year-over-year adjustment data available");
    } else {
        println!("{:<45} {:>10}  {}", "Indicator", "Adjustment", "Effective Period");
        println!("{}", "-".repeat(86));
        for a in &view.adjustments {
            let marker = match a.flag() {
                AdjustmentFlag::High => " (high)",
                AdjustmentFlag::Relief => " (relief)",
                AdjustmentFlag::Normal => "",
            };
            println!(
                "{:<45} {:>10}  {}{marker}",
                a.name,
                a.adjustment_text(),
                a.effective_period()
            );
        }
    }

    println!();
    println!("=== Methodology ===");
    println!("{}", costs::METHODOLOGY_OVERVIEW);
    for m in &costs::METHODOLOGIES {
        println!();
        println!("{} Components and Weights:", m.title);
        for c in m.components {
            println!("  {} - {}% - {}", c.name, c.weight_pct, c.series_code);
        }
    }
    println!();
    println!("Source: {}", costs::METHODOLOGY_SOURCE);

    if let Some(path) = output {
        write_output(&path, &export::export_cost_adjustments_csv(&view.adjustments)?)?;
    }
    Ok(())
}

fn run_sources(config: &DashboardConfig, today: NaiveDate, output: Option<PathBuf>) -> Result<()> {
    let dashboard = load_dashboard(config, today)?;
    let rows = dashboard.sources();

    println!();
    println!("{:<55} {:<12} {}", "Indicator", "Type", "Source");
    println!("{}", "-".repeat(110));
    for r in &rows {
        println!("{:<55} {:<12} {}", r.name, r.kind(), r.source);
    }
    println!();
    println!("--- Methodology ---");
    for note in METHODOLOGY_NOTES {
        println!("  - {note}");
    }

    if let Some(path) = output {
        write_output(&path, &export::export_sources_csv(&rows)?)?;
    }
    Ok(())
}

fn run_export(config: &DashboardConfig, today: NaiveDate, out: &Path) -> Result<()> {
    let dashboard = load_dashboard(config, today)?;
    let written = export_all(&dashboard, out)?;
    println!("Wrote {} files to {}", written.len(), out.display());
    Ok(())
}

fn run_setup_cmd(config: &DashboardConfig, today: NaiveDate, search_root: &Path) -> Result<()> {
    let root = config
        .data
        .root
        .clone()
        .unwrap_or_else(|| PathBuf::from("data"));
    let report = run_setup(&root, search_root, today).context("data directory setup failed")?;

    println!("Data directory: {}", report.dirs.root.display());
    println!("Seed files found: {}", report.found);
    println!("Copied: {}", report.copied.len());
    if !report.created.is_empty() {
        println!("Created {} sample files", report.created.len());
    }
    println!();
    print_tree(&report.tree);
    Ok(())
}

fn run_verify(config: &DashboardConfig) -> Result<()> {
    let dirs = DataDirs::discover(config.data.root.as_deref(), &config.data.search_paths)
        .context("failed to resolve data directory")?;
    let reports = dirs
        .verify()
        .with_context(|| format!("failed to verify {}", dirs.root.display()))?;

    println!("Data root: {}", dirs.root.display());
    println!();
    print_tree(&reports);
    Ok(())
}

fn print_tree(reports: &[DirReport]) {
    for r in reports {
        let status = if r.existed { "" } else { " (created)" };
        println!("{}/{status}: {} files", r.name, r.file_count);
        for f in &r.sample_files {
            println!("  {f}");
        }
        if r.file_count > r.sample_files.len() {
            println!("  ... and {} more", r.file_count - r.sample_files.len());
        }
    }
}
