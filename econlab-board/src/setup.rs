//! Data-directory setup: create the layout, pull in seed CSVs found under a
//! search root, and fall back to writing sample files.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use econlab_core::data::paths::SUBDIRS;
use econlab_core::data::{sample, write_forecast_csv, write_series_csv, DataDirs, DirReport};
use econlab_core::Catalog;
use thiserror::Error;

/// Indicators written as sample files when no seed data is found.
pub const SEED_INDICATORS: [&str; 5] = [
    "cruspi",
    "wti_oil",
    "supply_chain",
    "ppi_steel_scrap",
    "komatsu_equipment",
];

/// Directory names whose `raw/`, `processed/` and `forecasts/` children hold seed files.
const SEED_PARENTS: [&str; 2] = ["indicator_data", "data"];

/// Directories never descended into while searching.
const SKIP_DIRS: [&str; 2] = ["target", "node_modules"];

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SetupError {
    let path = path.to_path_buf();
    move |source| SetupError::Io { path, source }
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).map_or(true, |mut entries| entries.next().is_none())
}

/// A CSV found under a seed directory, with the subdirectory it belongs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFile {
    pub path: PathBuf,
    pub subdir: &'static str,
}

#[derive(Debug, Clone)]
pub struct SetupReport {
    pub dirs: DataDirs,
    pub found: usize,
    pub copied: Vec<PathBuf>,
    /// Sample files written because nothing was copied.
    pub created: Vec<PathBuf>,
    pub tree: Vec<DirReport>,
}

/// Find `**/{indicator_data,data}/{raw,processed,forecasts}/*.csv` under
/// `search_root`, skipping anything inside `exclude`.
pub fn find_seed_files(search_root: &Path, exclude: &Path) -> Vec<SeedFile> {
    let exclude = exclude.canonicalize().unwrap_or_else(|_| exclude.to_path_buf());
    let mut found = Vec::new();
    let mut stack = vec![search_root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let canonical = dir.canonicalize().unwrap_or_else(|_| dir.clone());
        if canonical.starts_with(&exclude) {
            continue;
        }
        let Ok(read) = std::fs::read_dir(&dir) else {
            tracing::debug!(dir = %dir.display(), "skipping unreadable directory");
            continue;
        };
        for entry in read.filter_map(|e| e.ok()) {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if path.is_dir() {
                if !name.starts_with('.') && !SKIP_DIRS.contains(&name.as_str()) {
                    stack.push(path);
                }
            } else if name.ends_with(".csv") {
                if let Some(subdir) = seed_subdir(&path) {
                    found.push(SeedFile { path, subdir });
                }
            }
        }
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::info!(count = found.len(), "found seed data files");
    found
}

fn seed_subdir(path: &Path) -> Option<&'static str> {
    let parent = path.parent()?;
    let grandparent = parent.parent()?.file_name()?.to_str()?;
    if !SEED_PARENTS.contains(&grandparent) {
        return None;
    }
    let name = parent.file_name()?.to_str()?;
    SUBDIRS.iter().copied().find(|s| *s == name)
}

fn is_newer(src: &Path, dest: &Path) -> bool {
    let modified = |p: &Path| std::fs::metadata(p).and_then(|m| m.modified()).ok();
    match (modified(src), modified(dest)) {
        (Some(s), Some(d)) => s > d,
        _ => true,
    }
}

/// Copy seed files into the matching subdirectory when the destination is
/// missing or older. Individual copy failures are logged and skipped.
pub fn copy_seed_files(files: &[SeedFile], dirs: &DataDirs) -> Vec<PathBuf> {
    let mut copied = Vec::new();
    for seed in files {
        let Some(dest_dir) = dirs.subdir(seed.subdir) else {
            continue;
        };
        let Some(file_name) = seed.path.file_name() else {
            continue;
        };
        let dest = dest_dir.join(file_name);
        if dest.exists() && !is_newer(&seed.path, &dest) {
            continue;
        }
        match std::fs::copy(&seed.path, &dest) {
            Ok(_) => {
                tracing::info!(from = %seed.path.display(), to = %dest.display(), "copied seed file");
                copied.push(dest);
            }
            Err(e) => {
                tracing::error!(from = %seed.path.display(), error = %e, "failed to copy seed file");
            }
        }
    }
    tracing::info!(count = copied.len(), "copied files to data directory");
    copied
}

/// Write sample history to `processed/{id}.csv` and a sample forecast to
/// `forecasts/{id}_forecast.csv` for each seed indicator.
pub fn write_sample_files(dirs: &DataDirs, today: NaiveDate) -> Result<Vec<PathBuf>, SetupError> {
    let catalog = Catalog::builtin();
    let mut created = Vec::with_capacity(SEED_INDICATORS.len() * 2);

    for id in SEED_INDICATORS {
        let spec = catalog.spec(id);

        let path = dirs.processed.join(format!("{id}.csv"));
        let file = File::create(&path).map_err(io_err(&path))?;
        write_series_csv(BufWriter::new(file), &sample::sample_history(&spec, today))?;
        tracing::info!(path = %path.display(), "created sample data file");
        created.push(path);

        let path = dirs.forecasts.join(format!("{id}_forecast.csv"));
        let file = File::create(&path).map_err(io_err(&path))?;
        write_forecast_csv(BufWriter::new(file), &sample::sample_forecast(&spec, today))?;
        tracing::info!(path = %path.display(), "created sample forecast file");
        created.push(path);
    }

    Ok(created)
}

/// Full setup: layout, seed copy, sample fallback, tree listing.
///
/// Sample files are only written when nothing was copied and `processed/`
/// is still empty, so a re-run never overwrites earlier data.
pub fn run_setup(
    data_root: &Path,
    search_root: &Path,
    today: NaiveDate,
) -> Result<SetupReport, SetupError> {
    let dirs = DataDirs::at(data_root);
    tracing::info!(root = %dirs.root.display(), "creating data directory structure");
    dirs.ensure().map_err(io_err(&dirs.root))?;

    let seeds = find_seed_files(search_root, &dirs.root);
    let copied = copy_seed_files(&seeds, &dirs);

    let created = if copied.is_empty() && is_empty_dir(&dirs.processed) {
        tracing::info!("no seed data copied, creating sample data files");
        write_sample_files(&dirs, today)?
    } else {
        Vec::new()
    };

    let tree = dirs.verify().map_err(io_err(&dirs.root))?;
    Ok(SetupReport {
        found: seeds.len(),
        dirs,
        copied,
        created,
        tree,
    })
}
