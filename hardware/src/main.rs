//! Pipeline Trace Viewer CLI.
//!
//! Replays a trace script against the pipeline occupancy tracker, printing
//! the stage diagram every cycle and a statistics summary at the end.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use pipeline_tracker::config::Config;
use pipeline_tracker::core::pipeline::{InstrId, Pipeline, Stage};
use pipeline_tracker::sim::{Replayer, TraceScript};

/// Command-line arguments for the trace viewer.
#[derive(Parser, Debug)]
#[command(author, version, about = "Five-stage pipeline occupancy viewer")]
struct Args {
    /// Trace script to replay.
    trace: PathBuf,

    /// Configuration file. Defaults to `hardware/configs/default.toml` when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the final pipeline state as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Suppress the per-cycle diagram even if the config enables it.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;

    let _logger = flexi_logger::Logger::try_with_str(&config.general.log_level)?.start()?;
    info!("Replaying {}", args.trace.display());

    let script = TraceScript::from_file(&args.trace)?;
    let trace = config.general.trace_enabled() && !args.quiet;
    let legacy = config.display.legacy_bubble_name;

    let mut replayer = Replayer::new(&script);
    replayer
        .run(|report, pipeline| {
            if !trace {
                return;
            }
            println!("{:>5}  {}", report.cycle, render(&script, pipeline, legacy));
            if let Some(id) = report.retired {
                println!("       retired {}", script.name_of(id).unwrap_or("?"));
            }
        })
        .with_context(|| format!("replay of {} failed", args.trace.display()))?;

    let (pipeline, stats) = replayer.into_parts();
    info!(
        "Replay finished after {} cycles, {} stages occupied",
        stats.cycles,
        pipeline.size()
    );

    if let Some(path) = args.json {
        let named = script.resolve_names(&pipeline);
        let json = serde_json::to_string_pretty(&named)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote final pipeline state to {}", path.display());
    }

    if config.display.show_stats {
        stats.print();
    }

    Ok(())
}

/// Formats one cycle of the diagram with instruction names resolved.
fn render(script: &TraceScript, pipeline: &Pipeline<InstrId>, legacy: bool) -> String {
    let named = script.resolve_names(pipeline);
    if !legacy {
        return named.to_string();
    }
    Stage::ALL
        .into_iter()
        .map(|stage| {
            let name = named[stage].legacy_name().unwrap_or_default();
            format!("{}:[{}]", stage, name)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
