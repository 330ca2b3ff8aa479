//! Pipeline Occupancy Tracker Library.
//!
//! This crate records the occupancy of a classic 5-stage in-order pipeline
//! (Fetch, Decode, Execute, Memory, Writeback) for a cycle-accurate CPU
//! simulator: which instruction sits in each stage, whether a stage holds a
//! bubble, and how many stages are in use.
//!
//! # Modules
//!
//! * `common`: Error handling shared by the loaders.
//! * `config`: Configuration loading and parsing.
//! * `core`: Pipeline stages, stage occupants and the tracker itself.
//! * `sim`: Trace script loading and replay.
//! * `stats`: Occupancy statistics collection.

/// Shared error type and result alias.
pub mod common;

/// Configuration for tracing, logging and display.
///
/// Loaded from TOML files; every field has a default.
pub mod config;

/// Pipeline stages, stage occupants and the occupancy tracker.
pub mod core;

/// Trace script loading and cycle-by-cycle replay.
pub mod sim;

/// Per-stage occupancy statistics.
pub mod stats;

pub use crate::core::pipeline::{InstrId, Pipeline, Slot, Stage};
