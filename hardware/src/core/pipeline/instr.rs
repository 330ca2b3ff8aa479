//! Instruction Handles.
//!
//! The tracker never owns instructions. Fetch/decode keeps the instruction
//! objects in a pool and hands the pipeline a small `Copy` index instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of an in-flight instruction in its owner's pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrId(pub u32);

impl InstrId {
    /// Creates a handle for pool slot `idx`.
    pub const fn new(idx: u32) -> Self {
        Self(idx)
    }

    /// Returns the pool index as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Resolves the handle against a pool, if it is in range.
    pub fn resolve<T>(self, pool: &[T]) -> Option<&T> {
        pool.get(self.index())
    }
}

impl fmt::Display for InstrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
