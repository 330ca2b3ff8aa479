//! Test module organization.
//!
//! This module organizes all integration tests for the pipeline tracker.

/// Configuration loading tests.
mod config_tests;




/// Pipeline occupancy tracker tests.
mod tracker_tests;
