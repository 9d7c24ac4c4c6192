pub mod controller;
pub mod error;
pub mod grid;
pub mod params;
pub mod store;

pub use controller::{Command, PlaybackController};
pub use error::{ConfigError, GridError, LoadError, PlaybackError, StoreError};
pub use grid::{Cell, Grid, Terrain};
pub use store::{load_dir, LoadOptions, Snapshot, SnapshotStore};
