//! Instruction pipeline occupancy.
//!
//! This module contains the five pipeline stages, the occupant a stage can
//! hold (empty, bubble or an instruction handle), and the tracker that
//! records the occupant of every stage from cycle to cycle.

/// Non-owning instruction handles.
pub mod instr;

/// Stage occupants (empty, bubble, instruction).
pub mod slot;

/// The five pipeline stages (IF, ID, EX, MEM, WB).
pub mod stage;

/// Per-stage occupancy tracker.
pub mod tracker;

pub use instr::InstrId;
pub use slot::Slot;
pub use stage::{Stage, STAGE_COUNT};
pub use tracker::Pipeline;
