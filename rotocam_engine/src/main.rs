use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod demo;
mod host;

use demo::{run_demo, DemoOptions, DemoPlan};
use rotocam_core::{
    COMPASS_POINTS, DEFAULT_CADENCE_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_TRANSITION_MS, STEP_COUNT,
};

/// Scripted host prototype that drives the 8-step rotating camera core.
#[derive(Parser, Debug)]
#[command(
    about = "Scripted host that drives the 8-step rotating camera core",
    version
)]
struct Args {
    /// Transition duration in milliseconds (0 rotates instantly)
    #[arg(long, default_value_t = DEFAULT_TRANSITION_MS)]
    transition_ms: u64,

    /// Debounce window between accepted rotations in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Cadence of the held-movement continuation loop in milliseconds
    #[arg(long, default_value_t = DEFAULT_CADENCE_MS)]
    cadence_ms: u64,

    /// Milliseconds advanced per simulated frame
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Path to write the rotation event trace as JSON
    #[arg(long)]
    rotation_log_json: Option<PathBuf>,

    /// Path to write the issued-movement trace as JSON
    #[arg(long)]
    movement_log_json: Option<PathBuf>,

    /// Print every trace sample instead of the summary only
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = DemoOptions {
        transition_ms: args.transition_ms,
        debounce_ms: args.debounce_ms,
        cadence_ms: args.cadence_ms,
        frame_ms: args.frame_ms,
    };
    let report = run_demo(&DemoPlan::scripted(), &options)?;

    if let Some(path) = args.rotation_log_json.as_ref() {
        let json = serde_json::to_string_pretty(&report.rotations)
            .context("serializing rotation trace to JSON")?;
        fs::write(path, json)
            .with_context(|| format!("writing rotation trace to {}", path.display()))?;
        println!("Saved rotation trace to {}", path.display());
    }

    if let Some(path) = args.movement_log_json.as_ref() {
        let json = serde_json::to_string_pretty(&report.moves)
            .context("serializing movement trace to JSON")?;
        fs::write(path, json)
            .with_context(|| format!("writing movement trace to {}", path.display()))?;
        println!("Saved movement trace to {}", path.display());
    }

    if args.verbose {
        for sample in &report.rotations {
            println!(
                "rotation.frame {:>3} {:<9} angle {:>7.2} step {}",
                sample.frame,
                sample.phase.label(),
                sample.angle_deg,
                sample.step
            );
        }
        for sample in &report.moves {
            println!(
                "movement.frame {:>3} {:+.0},{:+.0}",
                sample.frame, sample.dx, sample.dy
            );
        }
    }

    println!(
        "Rotations accepted: {} | settles: {} | movement steps issued: {}",
        report.accepted,
        report.settle_count(),
        report.moves.len()
    );
    // The world direction now under the top of the screen: north remapped by
    // the final step.
    let screen_up = COMPASS_POINTS[usize::from((STEP_COUNT - report.final_step) % STEP_COUNT)];
    println!(
        "Final orientation: step {} at {:.1} deg (screen-up faces {})",
        report.final_step, report.final_angle_deg, screen_up
    );

    Ok(())
}
