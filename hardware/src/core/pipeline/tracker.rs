//! Pipeline Stage Tracker.
//!
//! Records which instruction sits in each of the five pipeline stages. The
//! control loop advances instructions through it once per cycle, hazard and
//! forwarding logic query it for emptiness and bubbles, and retirement logic
//! reads the writeback occupant.
//!
//! The tracker is a passive record. It never validates that an instruction
//! belongs in a stage, never reorders anything and never fails.

use std::fmt;
use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::pipeline::slot::Slot;
use crate::core::pipeline::stage::{Stage, STAGE_COUNT};

/// Occupancy state of the five-stage pipeline.
///
/// Slots are stored in a fixed array indexed by [`Stage::index`], so every
/// stage always has exactly one slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pipeline<I> {
    slots: [Slot<I>; STAGE_COUNT],
}

impl<I> Default for Pipeline<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Pipeline<I> {
    /// Creates a tracker with every stage empty.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::Empty),
        }
    }

    /// Empties every stage. Used on simulator reset.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
    }

    /// Returns the occupant of `stage`.
    #[inline]
    pub fn get(&self, stage: Stage) -> &Slot<I> {
        &self.slots[stage.index()]
    }

    /// Returns the instruction in `stage`, ignoring bubbles.
    pub fn instruction(&self, stage: Stage) -> Option<&I> {
        self.get(stage).instruction()
    }

    /// Replaces the occupant of `stage` and returns what was there before.
    ///
    /// The returned slot lets callers see what was displaced (for example an
    /// instruction leaving WB) without a separate read.
    #[inline]
    pub fn set(&mut self, stage: Stage, slot: Slot<I>) -> Slot<I> {
        std::mem::replace(&mut self.slots[stage.index()], slot)
    }

    /// Occupant of IF.
    pub fn fetch(&self) -> &Slot<I> {
        self.get(Stage::If)
    }

    /// Occupant of ID.
    pub fn decode(&self) -> &Slot<I> {
        self.get(Stage::Id)
    }

    /// Occupant of EX.
    pub fn execute(&self) -> &Slot<I> {
        self.get(Stage::Ex)
    }

    /// Occupant of MEM.
    pub fn memory(&self) -> &Slot<I> {
        self.get(Stage::Mem)
    }

    /// Occupant of WB.
    pub fn writeback(&self) -> &Slot<I> {
        self.get(Stage::Wb)
    }

    /// Replaces the occupant of IF, returning the displaced one.
    pub fn set_fetch(&mut self, slot: Slot<I>) -> Slot<I> {
        self.set(Stage::If, slot)
    }

    /// Replaces the occupant of ID, returning the displaced one.
    pub fn set_decode(&mut self, slot: Slot<I>) -> Slot<I> {
        self.set(Stage::Id, slot)
    }

    /// Replaces the occupant of EX, returning the displaced one.
    pub fn set_execute(&mut self, slot: Slot<I>) -> Slot<I> {
        self.set(Stage::Ex, slot)
    }

    /// Replaces the occupant of MEM, returning the displaced one.
    pub fn set_memory(&mut self, slot: Slot<I>) -> Slot<I> {
        self.set(Stage::Mem, slot)
    }

    /// Replaces the occupant of WB, returning the displaced one.
    pub fn set_writeback(&mut self, slot: Slot<I>) -> Slot<I> {
        self.set(Stage::Wb, slot)
    }

    /// Returns `true` if nothing, not even a bubble, is in `stage`.
    pub fn is_empty(&self, stage: Stage) -> bool {
        self.get(stage).is_empty()
    }

    /// Returns `true` if `stage` holds a bubble.
    pub fn is_bubble(&self, stage: Stage) -> bool {
        self.get(stage).is_bubble()
    }

    /// Returns `true` if `stage` does no useful work this cycle.
    ///
    /// This is the predicate hazard logic usually wants.
    pub fn is_empty_or_bubble(&self, stage: Stage) -> bool {
        !self.get(stage).is_occupied()
    }

    /// Number of stages that are not empty. Bubbles count.
    pub fn size(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_present()).count()
    }

    /// Direct view of the slot array, indexed by [`Stage::index`].
    pub fn raw(&self) -> &[Slot<I>; STAGE_COUNT] {
        &self.slots
    }

    /// Mutable alias of the slot array.
    ///
    /// Writes through this reference go straight to the tracker's state and
    /// bypass [`Pipeline::set`].
    pub fn raw_mut(&mut self) -> &mut [Slot<I>; STAGE_COUNT] {
        &mut self.slots
    }

    /// Iterates over `(stage, occupant)` pairs in flow order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &Slot<I>)> + '_ {
        Stage::ALL.into_iter().zip(self.slots.iter())
    }

    /// Builds a new tracker by mapping every instruction handle.
    ///
    /// Typically used to resolve pool indices into names for display.
    pub fn map<U, F>(&self, mut f: F) -> Pipeline<U>
    where
        F: FnMut(&I) -> U,
    {
        Pipeline {
            slots: std::array::from_fn(|i| self.slots[i].as_ref().map(&mut f)),
        }
    }
}

impl<I> Index<Stage> for Pipeline<I> {
    type Output = Slot<I>;

    fn index(&self, stage: Stage) -> &Slot<I> {
        self.get(stage)
    }
}

impl<I: fmt::Display> fmt::Display for Pipeline<I> {
    /// Renders a one-line diagram, e.g. `IF:#3 | ID:bubble | EX:- | MEM:- | WB:#1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (stage, slot)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}:{}", stage, slot)?;
        }
        Ok(())
    }
}

impl<I: Serialize> Serialize for Pipeline<I> {
    /// Serializes as a map from stage mnemonic to occupant, in flow order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STAGE_COUNT))?;
        for (stage, slot) in self.iter() {
            map.serialize_entry(&stage, slot)?;
        }
        map.end()
    }
}
