//! Trace Script Loader.
//!
//! A trace script is a TOML file that lists a program of instruction names
//! and, cycle by cycle, what the control loop placed in each stage:
//!
//! ```toml
//! instructions = ["DADDI R1,R0,4", "LD R2,0(R1)"]
//!
//! [[cycle]]
//! set = { IF = 0 }
//!
//! [[cycle]]
//! set = { IF = 1, ID = 0 }
//!
//! [[cycle]]
//! clear = true
//! ```
//!
//! Integers refer to entries of `instructions`; the strings `"bubble"` and
//! `"empty"` insert a bubble or empty the stage. Stages not named in a cycle
//! keep their occupant.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::common::{Error, Result};
use crate::core::pipeline::{InstrId, Pipeline, Slot, Stage, STAGE_COUNT};

/// A single stage assignment as written in the script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SlotSpec {
    /// Index into the script's instruction list.
    Index(u32),
    /// `"bubble"` or `"empty"`.
    Marker(String),
}

/// What happens to the pipeline during one cycle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CycleSpec {
    /// Empty every stage before applying `set`.
    #[serde(default)]
    pub clear: bool,

    /// Stage mnemonic to new occupant.
    #[serde(default)]
    pub set: BTreeMap<String, SlotSpec>,
}

/// A parsed trace script.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceScript {
    /// Instruction pool. The pipeline only ever holds indices into it.
    #[serde(default)]
    pub instructions: Vec<String>,

    #[serde(default, rename = "cycle")]
    pub cycles: Vec<CycleSpec>,
}

impl TraceScript {
    /// Loads a trace script from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script: TraceScript = toml::from_str(&content).map_err(|e| Error::parse(path, e))?;
        debug!(
            "Loaded trace {}: {} instructions, {} cycles",
            path.display(),
            script.instructions.len(),
            script.cycles.len()
        );
        Ok(script)
    }

    /// Parses a trace script from an in-memory TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse("<inline>", e))
    }

    /// Name of the instruction behind `id`, if it belongs to this script.
    pub fn name_of(&self, id: InstrId) -> Option<&str> {
        id.resolve(&self.instructions).map(String::as_str)
    }

    /// Resolves every handle in `pipeline` to its instruction name.
    pub fn resolve_names<'a>(&'a self, pipeline: &Pipeline<InstrId>) -> Pipeline<&'a str> {
        pipeline.map(|id| self.name_of(*id).unwrap_or("?"))
    }

    /// Validates cycle `cycle` and turns it into ordered stage assignments.
    ///
    /// Nothing is applied if any assignment is invalid, including a stage
    /// named more than once.
    pub fn assignments(&self, cycle: usize) -> Result<Vec<(Stage, Slot<InstrId>)>> {
        let Some(spec) = self.cycles.get(cycle) else {
            return Ok(Vec::new());
        };

        let mut seen = [false; STAGE_COUNT];
        let mut out = Vec::with_capacity(spec.set.len());
        for (name, slot) in &spec.set {
            let stage: Stage = name.parse()?;
            // Keys match case-insensitively, so `WB` and `wb` collide.
            if std::mem::replace(&mut seen[stage.index()], true) {
                return Err(Error::DuplicateStage { cycle, stage });
            }
            out.push((stage, self.resolve_slot(cycle, slot)?));
        }
        out.sort_by_key(|(stage, _)| *stage);
        Ok(out)
    }

    fn resolve_slot(&self, cycle: usize, spec: &SlotSpec) -> Result<Slot<InstrId>> {
        match spec {
            SlotSpec::Index(index) => {
                let id = InstrId::new(*index);
                if self.name_of(id).is_none() {
                    return Err(Error::UnknownInstruction {
                        cycle,
                        index: *index,
                    });
                }
                Ok(Slot::Occupied(id))
            }
            SlotSpec::Marker(marker) => match marker.trim().to_ascii_lowercase().as_str() {
                "bubble" => Ok(Slot::Bubble),
                "empty" | "-" => Ok(Slot::Empty),
                _ => Err(Error::UnknownMarker {
                    cycle,
                    marker: marker.clone(),
                }),
            },
        }
    }
}
