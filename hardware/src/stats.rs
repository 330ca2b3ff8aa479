//! Pipeline occupancy statistics.
//!
//! Samples the tracker once per cycle and counts, for each stage, how many
//! cycles it spent empty, holding a bubble, or holding a real instruction.

use std::time::Instant;

use crate::core::pipeline::{Pipeline, Slot, Stage, STAGE_COUNT};

/// Per-stage cycle counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub empty: u64,
    pub bubble: u64,
    pub occupied: u64,
}

impl StageCounts {
    /// Total number of samples for this stage.
    pub fn total(&self) -> u64 {
        self.empty + self.bubble + self.occupied
    }
}

/// Occupancy statistics collected over a run.
pub struct OccupancyStats {
    start_time: Instant,
    pub cycles: u64,
    pub retired: u64,
    pub resets: u64,
    pub stages: [StageCounts; STAGE_COUNT],
}

impl Default for OccupancyStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            retired: 0,
            resets: 0,
            stages: [StageCounts::default(); STAGE_COUNT],
        }
    }
}

impl OccupancyStats {
    /// Samples the tracker at the end of a cycle.
    pub fn record<I>(&mut self, pipeline: &Pipeline<I>) {
        self.cycles += 1;
        for (stage, slot) in pipeline.iter() {
            let counts = &mut self.stages[stage.index()];
            match slot {
                Slot::Empty => counts.empty += 1,
                Slot::Bubble => counts.bubble += 1,
                Slot::Occupied(_) => counts.occupied += 1,
            }
        }
    }

    /// Counters for a single stage.
    pub fn stage(&self, stage: Stage) -> &StageCounts {
        &self.stages[stage.index()]
    }

    /// Fraction of sampled cycles in which `stage` held a real instruction.
    pub fn utilization(&self, stage: Stage) -> f64 {
        let counts = self.stage(stage);
        ratio(counts.occupied, counts.total())
    }

    /// Fraction of sampled cycles in which `stage` held a bubble.
    pub fn bubble_ratio(&self, stage: Stage) -> f64 {
        let counts = self.stage(stage);
        ratio(counts.bubble, counts.total())
    }

    /// Average number of non-empty stages per cycle.
    pub fn average_size(&self) -> f64 {
        let present: u64 = self.stages.iter().map(|c| c.bubble + c.occupied).sum();
        ratio(present, self.cycles)
    }

    /// Prints a formatted summary of the collected statistics.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };

        println!("\n==========================================================");
        println!("PIPELINE OCCUPANCY STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_retired              {}", self.retired);
        println!("sim_ipc                  {:.4}", self.retired as f64 / cyc as f64);
        println!("sim_resets               {}", self.resets);
        println!("avg_occupancy            {:.2} / {}", self.average_size(), STAGE_COUNT);
        println!("----------------------------------------------------------");
        println!("STAGE BREAKDOWN");
        for stage in Stage::ALL {
            let counts = self.stage(stage);
            println!(
                "  {:<4} busy: {:<8} | bubble: {:<8} | empty: {:<8} | util: {:.2}%",
                stage.name(),
                counts.occupied,
                counts.bubble,
                counts.empty,
                self.utilization(stage) * 100.0
            );
        }
        println!("==========================================================");
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
