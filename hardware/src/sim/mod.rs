//! Trace-driven simulation harness.
//!
//! Loads trace scripts describing what the control loop places in each
//! stage and replays them against the occupancy tracker.

/// Trace script parsing and validation.
pub mod loader;

/// Cycle-by-cycle replay of a trace script.
pub mod replay;

pub use loader::{CycleSpec, SlotSpec, TraceScript};
pub use replay::{CycleReport, Replayer};
