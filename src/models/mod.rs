//! Core data models for the stats engine.

mod player;
mod ranking;
mod stats;

pub use player::*;
pub use ranking::*;
pub use stats::*;
