//! Pipeline Stages.
//!
//! This module defines the five stages of the classic in-order pipeline
//! and helpers for walking them in flow order. The order is informational
//! only: the tracker never enforces that instructions move forward.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::Error;

/// Number of pipeline stages.
pub const STAGE_COUNT: usize = 5;

/// One stage of the five-stage pipeline.
///
/// Variants are declared in flow order, so the derived `Ord` matches the
/// direction instructions travel (IF before ID before EX, and so on).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Instruction fetch.
    #[serde(rename = "IF")]
    If = 0,

    /// Instruction decode and register read.
    #[serde(rename = "ID")]
    Id = 1,

    /// Execute / address calculation.
    #[serde(rename = "EX")]
    Ex = 2,

    /// Memory access.
    #[serde(rename = "MEM")]
    Mem = 3,

    /// Register writeback.
    #[serde(rename = "WB")]
    Wb = 4,
}

impl Stage {
    /// All stages in flow order.
    pub const ALL: [Stage; STAGE_COUNT] = [Stage::If, Stage::Id, Stage::Ex, Stage::Mem, Stage::Wb];

    /// Ordinal of the stage, usable as an index into the slot array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts an ordinal back into a stage.
    ///
    /// # Returns
    ///
    /// `None` if `idx` is not below [`STAGE_COUNT`].
    pub fn from_index(idx: usize) -> Option<Stage> {
        Stage::ALL.get(idx).copied()
    }

    /// The stage an instruction moves into after this one, if any.
    pub fn next(self) -> Option<Stage> {
        Stage::from_index(self.index() + 1)
    }

    /// The stage an instruction came from before this one, if any.
    pub fn prev(self) -> Option<Stage> {
        self.index().checked_sub(1).and_then(Stage::from_index)
    }

    /// Returns the conventional mnemonic of the stage.
    pub fn name(self) -> &'static str {
        match self {
            Stage::If => "IF",
            Stage::Id => "ID",
            Stage::Ex => "EX",
            Stage::Mem => "MEM",
            Stage::Wb => "WB",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = Error;

    /// Parses a stage mnemonic, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownStage(s.to_string()))
    }
}
