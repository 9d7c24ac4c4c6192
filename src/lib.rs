#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Interactive replay of pheromone-trail simulation snapshots.

pub mod replay;
pub mod ui;
