//! Schema module - Configuration types for the generational step.

mod config;
mod params;

pub use config::*;
pub use params::*;
