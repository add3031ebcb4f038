//! Data root discovery and the candidate file layout under it.
//!
//! A data root holds three subdirectories:
//!
//! ```text
//! {root}/
//!   raw/          vendor drops, untouched
//!   processed/    cleaned monthly series
//!   forecasts/    projected series
//! ```
//!
//! Series files may also sit directly in the root.

use std::io;
use std::path::{Path, PathBuf};

/// Subdirectory names under the data root.
pub const SUBDIRS: [&str; 3] = ["raw", "processed", "forecasts"];

/// Resolved data root and its subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDirs {
    pub root: PathBuf,
    pub raw: PathBuf,
    pub processed: PathBuf,
    pub forecasts: PathBuf,
}

/// State of one subdirectory as found by [`DataDirs::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirReport {
    pub name: &'static str,
    pub path: PathBuf,
    /// False when the directory had to be created.
    pub existed: bool,
    pub file_count: usize,
    /// Up to five file names, sorted.
    pub sample_files: Vec<String>,
}

impl DataDirs {
    /// Layout rooted at `root`. Nothing is created.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            raw: root.join("raw"),
            processed: root.join("processed"),
            forecasts: root.join("forecasts"),
            root,
        }
    }

    /// Find the data root using the process working directory and home
    /// directory, then create any missing subdirectories.
    pub fn discover(explicit: Option<&Path>, extra: &[PathBuf]) -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let home = dirs::home_dir();
        let dirs = Self::discover_in(explicit, &cwd, home.as_deref(), extra)?;
        dirs.ensure()?;
        Ok(dirs)
    }

    /// Resolve the root without touching process globals.
    ///
    /// An explicit root always wins (and is created). Otherwise the first
    /// existing candidate is used, falling back to creating `{cwd}/data`.
    pub fn discover_in(
        explicit: Option<&Path>,
        cwd: &Path,
        home: Option<&Path>,
        extra: &[PathBuf],
    ) -> io::Result<Self> {
        if let Some(root) = explicit {
            std::fs::create_dir_all(root)?;
            tracing::info!(root = %root.display(), "using configured data directory");
            return Ok(Self::at(root));
        }

        for candidate in root_candidates(cwd, home, extra) {
            if candidate.is_dir() {
                tracing::info!(root = %candidate.display(), "found data directory");
                return Ok(Self::at(candidate));
            }
        }

        let default = cwd.join("data");
        tracing::info!(
            root = %default.display(),
            "no existing data directory found, creating one"
        );
        std::fs::create_dir_all(&default)?;
        Ok(Self::at(default))
    }

    /// Create the root and its subdirectories if missing.
    pub fn ensure(&self) -> io::Result<()> {
        for dir in [&self.root, &self.raw, &self.processed, &self.forecasts] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn subdir(&self, name: &str) -> Option<&Path> {
        match name {
            "raw" => Some(&self.raw),
            "processed" => Some(&self.processed),
            "forecasts" => Some(&self.forecasts),
            _ => None,
        }
    }

    /// Files tried, in order, when loading an indicator's history.
    pub fn indicator_candidates(&self, id: &str) -> Vec<PathBuf> {
        vec![
            self.processed.join(format!("{id}_monthly.csv")),
            self.processed.join(format!("{id}.csv")),
            self.raw.join(format!("{id}.csv")),
            self.raw.join(format!("{id}_sample.csv")),
            self.root.join(format!("{id}.csv")),
        ]
    }

    /// Files tried, in order, when loading an indicator's forecast.
    pub fn forecast_candidates(&self, id: &str) -> Vec<PathBuf> {
        vec![
            self.forecasts.join(format!("{id}_forecast.csv")),
            self.forecasts.join(format!("{id}.csv")),
            self.root.join(format!("{id}_forecast.csv")),
        ]
    }

    /// Report each subdirectory's contents, creating any that are missing.
    pub fn verify(&self) -> io::Result<Vec<DirReport>> {
        let mut reports = Vec::with_capacity(SUBDIRS.len());
        for name in SUBDIRS {
            let path = self.root.join(name);
            let existed = path.is_dir();
            if !existed {
                tracing::error!(dir = %path.display(), "directory not found, creating it");
                std::fs::create_dir_all(&path)?;
            }

            let mut files: Vec<String> = std::fs::read_dir(&path)?
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            files.sort();

            if files.is_empty() {
                tracing::warn!(dir = name, "no files found");
            } else {
                tracing::info!(dir = name, count = files.len(), "found files");
            }

            reports.push(DirReport {
                name,
                path,
                existed,
                file_count: files.len(),
                sample_files: files.into_iter().take(5).collect(),
            });
        }
        Ok(reports)
    }
}

/// Candidate roots, in search order.
pub fn root_candidates(cwd: &Path, home: Option<&Path>, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = vec![cwd.join("data")];
    if let Some(parent) = cwd.parent() {
        out.push(parent.join("data"));
    }
    if let Some(home) = home {
        out.push(
            home.join("Commercial and Market Research")
                .join("indicator_data"),
        );
    }
    out.extend(extra.iter().cloned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("custom");
        let dirs = DataDirs::discover_in(Some(&root), tmp.path(), None, &[]).unwrap();
        assert_eq!(dirs.root, root);
        assert!(root.is_dir());
    }

    #[test]
    fn cwd_data_wins_over_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let cwd = tmp.path().join("project");
        std::fs::create_dir_all(cwd.join("data")).unwrap();
        std::fs::create_dir_all(tmp.path().join("data")).unwrap();
        let dirs = DataDirs::discover_in(None, &cwd, None, &[]).unwrap();
        assert_eq!(dirs.root, cwd.join("data"));
    }

    #[test]
    fn parent_then_home_then_extra() {
        let tmp = tempfile::tempdir().unwrap();
        let cwd = tmp.path().join("a/b");
        std::fs::create_dir_all(&cwd).unwrap();
        let home = tmp.path().join("home");
        let home_data = home.join("Commercial and Market Research/indicator_data");
        std::fs::create_dir_all(&home_data).unwrap();
        let dirs = DataDirs::discover_in(None, &cwd, Some(&home), &[]).unwrap();
        assert_eq!(dirs.root, home_data);

        let extra = tmp.path().join("elsewhere");
        std::fs::create_dir_all(&extra).unwrap();
        let dirs = DataDirs::discover_in(None, &cwd, None, &[extra.clone()]).unwrap();
        assert_eq!(dirs.root, extra);
    }

    #[test]
    fn falls_back_to_creating_data() {
        let tmp = tempfile::tempdir().unwrap();
        let cwd = tmp.path().join("x/y");
        std::fs::create_dir_all(&cwd).unwrap();
        let dirs = DataDirs::discover_in(None, &cwd, None, &[]).unwrap();
        assert_eq!(dirs.root, cwd.join("data"));
        assert!(dirs.root.is_dir());
    }

    #[test]
    fn candidate_order() {
        let dirs = DataDirs::at("/d");
        let c = dirs.indicator_candidates("wti_oil");
        assert_eq!(c[0], PathBuf::from("/d/processed/wti_oil_monthly.csv"));
        assert_eq!(c[3], PathBuf::from("/d/raw/wti_oil_sample.csv"));
        assert_eq!(c[4], PathBuf::from("/d/wti_oil.csv"));
        let f = dirs.forecast_candidates("wti_oil");
        assert_eq!(f.len(), 3);
        assert_eq!(f[2], PathBuf::from("/d/wti_oil_forecast.csv"));
    }

    #[test]
    fn verify_creates_and_reports() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = DataDirs::at(tmp.path());
        std::fs::create_dir_all(&dirs.processed).unwrap();
        for i in 0..7 {
            std::fs::write(dirs.processed.join(format!("f{i}.csv")), "x").unwrap();
        }
        let reports = dirs.verify().unwrap();
        assert_eq!(reports.len(), 3);
        let raw = &reports[0];
        assert!(!raw.existed);
        assert!(raw.path.is_dir());
        let processed = &reports[1];
        assert!(processed.existed);
        assert_eq!(processed.file_count, 7);
        assert_eq!(processed.sample_files.len(), 5);
        assert_eq!(processed.sample_files[0], "f0.csv");
    }
}
