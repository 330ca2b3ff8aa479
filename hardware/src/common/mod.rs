//! Common types shared across the tracker, its configuration and the
//! trace replay tooling.

/// Error types for configuration and trace loading.
pub mod error;

pub use error::{Error, Result};
