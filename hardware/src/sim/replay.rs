//! Trace Replay.
//!
//! Drives a [`Pipeline`] from a [`TraceScript`] one cycle at a time, the way
//! the simulator's control loop would, and collects occupancy statistics.
//! Instructions displaced out of WB are counted as retired.

use log::{debug, trace};

use crate::common::Result;
use crate::core::pipeline::{InstrId, Pipeline, Stage};
use crate::sim::loader::TraceScript;
use crate::stats::OccupancyStats;

/// Outcome of a single replayed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Zero-based cycle number.
    pub cycle: usize,
    /// Whether the pipeline was cleared at the start of the cycle.
    pub cleared: bool,
    /// Instruction that left WB during this cycle, if any.
    pub retired: Option<InstrId>,
}

/// Replays a trace script against a fresh tracker.
pub struct Replayer<'a> {
    script: &'a TraceScript,
    pipeline: Pipeline<InstrId>,
    stats: OccupancyStats,
    cycle: usize,
}

impl<'a> Replayer<'a> {
    pub fn new(script: &'a TraceScript) -> Self {
        Self {
            script,
            pipeline: Pipeline::new(),
            stats: OccupancyStats::default(),
            cycle: 0,
        }
    }

    /// Current pipeline state.
    pub fn pipeline(&self) -> &Pipeline<InstrId> {
        &self.pipeline
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &OccupancyStats {
        &self.stats
    }

    /// Number of cycles replayed so far.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Returns `true` once every cycle of the script has been applied.
    pub fn finished(&self) -> bool {
        self.cycle >= self.script.cycles.len()
    }

    /// Applies the next cycle of the script.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the script is exhausted. On error the pipeline is
    /// left as it was before the failing cycle.
    pub fn step(&mut self) -> Result<Option<CycleReport>> {
        let script = self.script;
        let Some(spec) = script.cycles.get(self.cycle) else {
            return Ok(None);
        };
        let cycle = self.cycle;
        let assignments = script.assignments(cycle)?;

        if spec.clear {
            debug!("cycle {}: pipeline cleared", cycle);
            self.pipeline.clear();
            self.stats.resets += 1;
        }

        let mut retired = None;
        for (stage, slot) in assignments {
            let incoming = slot.instruction().copied();
            let displaced = self.pipeline.set(stage, slot);
            trace!("cycle {}: {} <- {} (was {})", cycle, stage, self.pipeline[stage], displaced);

            if stage == Stage::Wb {
                if let Some(id) = displaced.into_instruction() {
                    if incoming != Some(id) {
                        retired = Some(id);
                    }
                }
            }
        }

        if let Some(id) = retired {
            self.stats.retired += 1;
            debug!(
                "cycle {}: retired {}",
                cycle,
                script.name_of(id).unwrap_or("?")
            );
        }

        self.stats.record(&self.pipeline);
        self.cycle += 1;

        Ok(Some(CycleReport {
            cycle,
            cleared: spec.clear,
            retired,
        }))
    }

    /// Replays every remaining cycle, calling `on_cycle` after each one.
    pub fn run<F>(&mut self, mut on_cycle: F) -> Result<()>
    where
        F: FnMut(&CycleReport, &Pipeline<InstrId>),
    {
        while let Some(report) = self.step()? {
            on_cycle(&report, &self.pipeline);
        }
        Ok(())
    }

    /// Consumes the replayer, returning the final pipeline and statistics.
    pub fn into_parts(self) -> (Pipeline<InstrId>, OccupancyStats) {
        (self.pipeline, self.stats)
    }
}
