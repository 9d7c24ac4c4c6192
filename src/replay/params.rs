//! Replay defaults.

/// Pheromone floor of the producing engine; lower values are invisible.
pub const MIN_INTENSITY: f64 = 0.01;
/// Intensity at which the color ramp saturates.
pub const MAX_INTENSITY: f64 = 5.0;
/// Exponent of the alpha curve applied to the normalized intensity.
pub const ALPHA_EXPONENT: f64 = 0.75;

pub const DEFAULT_DATA_DIR: &str = "visualizacao";
pub const SNAPSHOT_PREFIX: &str = "iter_";
pub const SNAPSHOT_EXTENSION: &str = "csv";
