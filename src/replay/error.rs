//! Error types for loading, indexing and presenting snapshots.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A snapshot file could not be turned into a rectangular grid of known cells.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column {col}: `{text}` is not a number")]
    InvalidNumber { row: usize, col: usize, text: String },
    #[error("row {row}, column {col}: {value} is neither a terrain code nor a non-negative intensity")]
    InvalidValue { row: usize, col: usize, value: f64 },
}

/// Fatal startup errors. Nothing is displayed when one of these occurs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "snapshot directory `{}` does not exist; run the simulation engine first so it writes its iteration files there",
        .0.display()
    )]
    MissingDirectory(PathBuf),
    #[error(
        "no `{pattern}` files found in `{}`; run the simulation engine first so it writes its iteration files there",
        .dir.display()
    )]
    NoSnapshots { dir: PathBuf, pattern: String },
    #[error("snapshot sequence is empty")]
    EmptySequence,
    #[error("`{}` has no trailing iteration number in its name", .0.display())]
    BadIterationToken(PathBuf),
    #[error("iteration {iteration} appears more than once")]
    DuplicateIteration { iteration: u64 },
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: GridError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("snapshot index {index} out of range for {len} snapshots")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failure while drawing the current frame.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("display error: {0}")]
    Display(#[from] io::Error),
}

/// Rejected color-mapping configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("minimum intensity must be finite and positive, got {0}")]
    MinIntensity(f64),
    #[error("maximum intensity must be finite and above the minimum {min}, got {max}")]
    MaxIntensity { min: f64, max: f64 },
    #[error("alpha exponent must be finite and positive, got {0}")]
    AlphaExponent(f64),
    #[error("color ramp needs at least one stop")]
    EmptyRamp,
}
