use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use serde::Deserialize;
use tempfile::tempdir;

#[derive(Debug, Deserialize)]
struct RotationSample {
    frame: u32,
    phase: String,
    angle_deg: f64,
    step: u8,
    center_world: Option<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct MovementSample {
    frame: u32,
    dx: f64,
    dy: f64,
}

#[test]
fn scripted_demo_traces_match_the_plan() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for traces")?;
    let rotation_path = temp_dir.path().join("rotation_trace.json");
    let movement_path = temp_dir.path().join("movement_trace.json");

    let status = Command::new(env!("CARGO_BIN_EXE_rotocam_engine"))
        .args([
            "--rotation-log-json",
            rotation_path.to_str().context("rotation path utf-8")?,
            "--movement-log-json",
            movement_path.to_str().context("movement path utf-8")?,
        ])
        .status()
        .context("executing rotocam_engine demo")?;
    assert!(status.success(), "rotocam_engine exited with {status:?}");

    let rotations: Vec<RotationSample> = read_json(&rotation_path)?;
    let movements: Vec<MovementSample> = read_json(&movement_path)?;

    let settled: Vec<&RotationSample> = rotations
        .iter()
        .filter(|sample| sample.phase == "settled")
        .collect();
    let settle_states: Vec<(f64, u8)> = settled
        .iter()
        .map(|sample| (sample.angle_deg, sample.step))
        .collect();
    assert_eq!(
        settle_states,
        vec![(0.0, 0), (45.0, 1), (90.0, 2), (45.0, 1)],
        "settled trace diverged from the scripted plan"
    );
    assert!(
        settled.iter().all(|sample| sample.center_world.is_some()),
        "every settle must carry a screen-centre world point"
    );

    assert!(
        rotations.iter().any(|sample| {
            sample.phase == "animating" && sample.angle_deg > 0.0 && sample.angle_deg < 45.0
        }),
        "expected an animating frame strictly inside the first turn"
    );

    let moves: Vec<(f64, f64)> = movements
        .iter()
        .map(|sample| (sample.dx, sample.dy))
        .collect();
    assert_eq!(
        moves,
        vec![
            (-1.0, -1.0),
            (-1.0, -1.0),
            (-1.0, 0.0),
            (-1.0, 0.0),
            (-1.0, 0.0),
        ],
        "held movement must follow the live orientation"
    );

    let first_rotation_settle = settled
        .iter()
        .find(|sample| sample.angle_deg == 45.0)
        .map(|sample| sample.frame)
        .context("first rotation settle missing")?;
    assert!(
        movements
            .iter()
            .all(|sample| sample.frame >= first_rotation_settle),
        "no movement may be issued before the first rotation settles"
    );

    Ok(())
}

fn read_json<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading trace from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("decoding trace from {}", path.display()))
}
