//! CPU core state shared with the surrounding simulator.
//!
//! The core currently exposes the pipeline occupancy tracker; the execution
//! units, hazard logic and control loop that drive it live with the caller.

/// Pipeline stages, stage occupants and the occupancy tracker.
pub mod pipeline;

pub use pipeline::{InstrId, Pipeline, Slot, Stage};
