//! Stage Occupants.
//!
//! A stage is either empty, holds a bubble inserted by stall/flush logic,
//! or holds a reference to a genuine in-flight instruction. The three cases
//! are kept apart by the type so a real instruction can never be mistaken
//! for a bubble because of its name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name the legacy display layer used for bubbles.
pub const LEGACY_BUBBLE_NAME: &str = " ";

/// Occupant of a single pipeline stage.
///
/// `I` is a non-owning handle to an instruction owned elsewhere, typically
/// an [`InstrId`](crate::core::pipeline::InstrId).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "instr", rename_all = "lowercase")]
pub enum Slot<I> {
    /// Nothing is in the stage.
    Empty,

    /// A placeholder that does no useful work.
    Bubble,

    /// A genuine in-flight instruction.
    Occupied(I),
}

impl<I> Slot<I> {
    /// Returns `true` if the stage holds nothing at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Returns `true` if the stage holds a bubble.
    #[inline]
    pub fn is_bubble(&self) -> bool {
        matches!(self, Slot::Bubble)
    }

    /// Returns `true` if the stage holds a genuine instruction.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    /// Returns `true` unless the slot is empty. Bubbles count as present.
    #[inline]
    pub fn is_present(&self) -> bool {
        !self.is_empty()
    }

    /// The instruction handle, if the slot holds a genuine instruction.
    pub fn instruction(&self) -> Option<&I> {
        match self {
            Slot::Occupied(instr) => Some(instr),
            _ => None,
        }
    }

    /// Consumes the slot, returning the instruction handle if any.
    pub fn into_instruction(self) -> Option<I> {
        match self {
            Slot::Occupied(instr) => Some(instr),
            _ => None,
        }
    }

    /// Converts `&Slot<I>` into `Slot<&I>`.
    pub fn as_ref(&self) -> Slot<&I> {
        match self {
            Slot::Empty => Slot::Empty,
            Slot::Bubble => Slot::Bubble,
            Slot::Occupied(instr) => Slot::Occupied(instr),
        }
    }

    /// Maps the instruction handle, preserving empty and bubble slots.
    pub fn map<U, F: FnOnce(I) -> U>(self, f: F) -> Slot<U> {
        match self {
            Slot::Empty => Slot::Empty,
            Slot::Bubble => Slot::Bubble,
            Slot::Occupied(instr) => Slot::Occupied(f(instr)),
        }
    }

    /// Takes the occupant out, leaving the slot empty.
    pub fn take(&mut self) -> Slot<I> {
        std::mem::replace(self, Slot::Empty)
    }
}

impl<I: fmt::Display> Slot<I> {
    /// Name under the legacy naming scheme, where a bubble is an
    /// instruction named `" "` and an empty stage has no name.
    pub fn legacy_name(&self) -> Option<String> {
        match self {
            Slot::Empty => None,
            Slot::Bubble => Some(LEGACY_BUBBLE_NAME.to_string()),
            Slot::Occupied(instr) => Some(instr.to_string()),
        }
    }
}

impl<I> Default for Slot<I> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<I> From<Option<I>> for Slot<I> {
    /// `None` becomes an empty slot, `Some` an occupied one.
    fn from(instr: Option<I>) -> Self {
        match instr {
            Some(instr) => Slot::Occupied(instr),
            None => Slot::Empty,
        }
    }
}

impl<I: fmt::Display> fmt::Display for Slot<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => f.write_str("-"),
            Slot::Bubble => f.write_str("bubble"),
            Slot::Occupied(instr) => write!(f, "{}", instr),
        }
    }
}
