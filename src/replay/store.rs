//! Iteration-ordered snapshot sequence and its on-disk discovery.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::replay::error::{LoadError, StoreError};
use crate::replay::grid::Grid;
use crate::replay::params::{SNAPSHOT_EXTENSION, SNAPSHOT_PREFIX};

/// One saved simulation state.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub iteration: u64,
    pub grid: Grid,
}

/// Non-empty sequence of snapshots sorted by ascending iteration.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    snapshots: Vec<Snapshot>,
}

impl SnapshotStore {
    /// Orders snapshots by iteration.
    ///
    /// # Errors
    ///
    /// Fails on an empty input or when two snapshots share an iteration number.
    pub fn new(mut snapshots: Vec<Snapshot>) -> Result<Self, LoadError> {
        if snapshots.is_empty() {
            return Err(LoadError::EmptySequence);
        }

        snapshots.sort_by_key(|s| s.iteration);
        if let Some(pair) = snapshots
            .windows(2)
            .find(|pair| pair[0].iteration == pair[1].iteration)
        {
            return Err(LoadError::DuplicateIteration {
                iteration: pair[0].iteration,
            });
        }

        Ok(Self { snapshots })
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns the snapshot at `index`.
    ///
    /// # Errors
    ///
    /// An out-of-range index is a caller defect and is reported, never wrapped.
    pub fn get(&self, index: usize) -> Result<&Snapshot, StoreError> {
        self.snapshots.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.snapshots.len(),
        })
    }

    pub fn iterations(&self) -> impl Iterator<Item = u64> + '_ {
        self.snapshots.iter().map(|s| s.iteration)
    }
}

/// How snapshot files are located and oriented.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub prefix: String,
    pub extension: String,
    /// The engine writes one line per x column; transposing puts y on the rows.
    pub transpose: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            prefix: SNAPSHOT_PREFIX.to_owned(),
            extension: SNAPSHOT_EXTENSION.to_owned(),
            transpose: true,
        }
    }
}

fn snapshot_pattern(options: &LoadOptions) -> String {
    format!("{}*.{}", options.prefix, options.extension)
}

/// Extracts the iteration number from the last `_`-separated token of the file stem.
///
/// `iter_050.csv` yields `50`.
#[must_use]
pub fn iteration_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let token = stem.rsplit('_').next()?;
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Lists snapshot files in `dir` paired with their iteration numbers, unsorted.
///
/// # Errors
///
/// Missing directory, read failures, and files without a trailing iteration number.
pub fn discover(dir: &Path, options: &LoadOptions) -> Result<Vec<(u64, PathBuf)>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || !matches_pattern(&path, options) {
            continue;
        }
        let iteration =
            iteration_number(&path).ok_or_else(|| LoadError::BadIterationToken(path.clone()))?;
        found.push((iteration, path));
    }

    if found.is_empty() {
        return Err(LoadError::NoSnapshots {
            dir: dir.to_path_buf(),
            pattern: snapshot_pattern(options),
        });
    }

    debug!(dir = %dir.display(), files = found.len(), "Discovered snapshot files");
    Ok(found)
}

fn matches_pattern(path: &Path, options: &LoadOptions) -> bool {
    let name_ok = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(&options.prefix));
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(&options.extension));
    name_ok && ext_ok
}

/// Reads and parses a single snapshot file.
///
/// # Errors
///
/// I/O failures and malformed grids, both naming the file.
pub fn load_file(path: &Path, iteration: u64, options: &LoadOptions) -> Result<Snapshot, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = Grid::parse_csv(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = if options.transpose { grid.transposed() } else { grid };
    Ok(Snapshot { iteration, grid })
}

/// Discovers, parses and orders every snapshot in `dir`.
///
/// # Errors
///
/// Any discovery or parse failure; no partial store is returned.
pub fn load_dir(dir: &Path, options: &LoadOptions) -> Result<SnapshotStore, LoadError> {
    let files = discover(dir, options)?;

    let snapshots = files
        .iter()
        .map(|(iteration, path)| load_file(path, *iteration, options))
        .collect::<Result<Vec<_>, _>>()?;

    let store = SnapshotStore::new(snapshots)?;
    if let Ok(first) = store.get(0) {
        info!(
            dir = %dir.display(),
            snapshots = store.count(),
            width = first.grid.width(),
            height = first.grid.height(),
            "Loaded snapshots",
        );
    }
    Ok(store)
}
