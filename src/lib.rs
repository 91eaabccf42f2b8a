//! Scores binding curves extracted from presentation charts against two
//! standard curves (kinetic and steady-state) using an endpoint-offset
//! corrected mean squared error, and emits the derived tables as CSV.

pub mod align;
pub mod data;
pub mod error;
pub mod runner;

pub use error::{PipelineError, Result};
pub use runner::{RunConfig, RunEvent, Runner};
