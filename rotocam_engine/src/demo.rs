//! Deterministic scripted demo that drives the rotation core frame by frame.
//!
//! The demo owns a manual clock, advances it by a fixed amount per simulated
//! frame, and replays a command script (hold keys, rotate, release) against
//! the engine, recording the rotation events and every movement request the
//! engine forwards to the host. The same script always produces the same
//! traces, which is what the regression test relies on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use serde::Serialize;

use rotocam_core::{
    EngineConfig, GridVector, HostBindings, ManualClock, RotatingCamera, RotationFrame,
    RotationObserver, RotationOutcome, StageTransform,
};

use crate::host::{RecordingIssuer, ScriptedInput, ScriptedSelection, ScriptedViewport};

/// Screen the demo pretends to render into.
const SCREEN_W: f64 = 800.0;
const SCREEN_H: f64 = 600.0;

#[derive(Debug, Clone, Copy)]
pub enum DemoAction {
    /// Press-and-hold the given canonical movement vector.
    Hold(GridVector),
    /// Release all held movement keys.
    Release,
    /// Request a rotation from a named key source.
    Rotate {
        delta_steps: i32,
        source: &'static str,
    },
    /// Signal that a rotation key was released.
    ReleaseGuard { source: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct DemoCommand {
    pub at_frame: u32,
    pub action: DemoAction,
}

#[derive(Debug, Clone)]
pub struct DemoPlan {
    pub commands: Vec<DemoCommand>,
    pub total_frames: u32,
}

impl DemoPlan {
    /// Fixed script: walk north, rotate clockwise twice mid-walk, stop
    /// moving, then rotate back once.
    pub fn scripted() -> Self {
        let commands = vec![
            DemoCommand {
                at_frame: 0,
                action: DemoAction::Hold(GridVector::new(0, -1)),
            },
            DemoCommand {
                at_frame: 2,
                action: DemoAction::Rotate {
                    delta_steps: 1,
                    source: "KeyQ",
                },
            },
            DemoCommand {
                at_frame: 20,
                action: DemoAction::ReleaseGuard { source: "KeyQ" },
            },
            DemoCommand {
                at_frame: 22,
                action: DemoAction::Rotate {
                    delta_steps: 1,
                    source: "KeyQ",
                },
            },
            DemoCommand {
                at_frame: 40,
                action: DemoAction::Release,
            },
            DemoCommand {
                at_frame: 48,
                action: DemoAction::Rotate {
                    delta_steps: -1,
                    source: "KeyE",
                },
            },
            DemoCommand {
                at_frame: 50,
                action: DemoAction::ReleaseGuard { source: "KeyE" },
            },
        ];
        Self {
            commands,
            total_frames: 70,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DemoOptions {
    pub transition_ms: u64,
    pub debounce_ms: u64,
    pub cadence_ms: u64,
    pub frame_ms: u64,
}

impl Default for DemoOptions {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            transition_ms: config.transition_ms,
            debounce_ms: config.debounce_ms,
            cadence_ms: config.cadence_ms,
            frame_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPhase {
    Animating,
    Settled,
}

impl RotationPhase {
    pub fn label(self) -> &'static str {
        match self {
            RotationPhase::Animating => "animating",
            RotationPhase::Settled => "settled",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RotationSample {
    pub frame: u32,
    pub phase: RotationPhase,
    pub angle_deg: f64,
    pub step: u8,
    /// World point under the screen centre, recorded at settle only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_world: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovementSample {
    pub frame: u32,
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Clone)]
pub struct DemoReport {
    pub rotations: Vec<RotationSample>,
    pub moves: Vec<MovementSample>,
    pub accepted: u32,
    pub final_step: u8,
    pub final_angle_deg: f64,
}

impl DemoReport {
    pub fn settle_count(&self) -> usize {
        self.rotations
            .iter()
            .filter(|sample| sample.phase == RotationPhase::Settled)
            .count()
    }
}

struct TraceObserver {
    current_frame: Rc<Cell<u32>>,
    samples: Rc<RefCell<Vec<RotationSample>>>,
}

impl RotationObserver for TraceObserver {
    fn rotation_animating(&self, frame: RotationFrame) {
        self.samples.borrow_mut().push(RotationSample {
            frame: self.current_frame.get(),
            phase: RotationPhase::Animating,
            angle_deg: frame.angle_deg,
            step: frame.step,
            center_world: None,
        });
    }

    fn rotation_settled(&self, frame: RotationFrame) {
        let center_world = StageTransform::from_rotation_deg(frame.angle_deg, 0.0, 0.0)
            .center_world(SCREEN_W, SCREEN_H)
            .map(|(x, y)| [x, y]);
        self.samples.borrow_mut().push(RotationSample {
            frame: self.current_frame.get(),
            phase: RotationPhase::Settled,
            angle_deg: frame.angle_deg,
            step: frame.step,
            center_world,
        });
    }
}

pub fn run_demo(plan: &DemoPlan, options: &DemoOptions) -> Result<DemoReport> {
    let clock = ManualClock::new();
    let frame_counter = Rc::new(Cell::new(0u32));
    let input = Rc::new(ScriptedInput::new());
    let selection = Rc::new(ScriptedSelection::new(true));
    let viewport = Rc::new(ScriptedViewport::new(true));
    let issuer = Rc::new(RecordingIssuer::new(frame_counter.clone()));
    let samples: Rc<RefCell<Vec<RotationSample>>> = Rc::new(RefCell::new(Vec::new()));

    let mut camera = RotatingCamera::new(
        EngineConfig {
            debounce_ms: options.debounce_ms,
            cadence_ms: options.cadence_ms,
            transition_ms: options.transition_ms,
        },
        Rc::new(clock.clone()),
        HostBindings {
            movement_source: input.clone(),
            movement_issuer: issuer.clone(),
            subject: selection.clone(),
            viewport: viewport.clone(),
        },
    );
    camera.add_observer(Rc::new(TraceObserver {
        current_frame: frame_counter.clone(),
        samples: samples.clone(),
    }));

    // Matches the real host's startup: pin the display to the logical angle
    // before the first frame runs.
    camera.sync_viewport();

    let mut accepted = 0u32;
    for frame in 0..=plan.total_frames {
        frame_counter.set(frame);
        for command in plan.commands.iter().filter(|c| c.at_frame == frame) {
            match command.action {
                DemoAction::Hold(vector) => input.set_held(vector),
                DemoAction::Release => input.release(),
                DemoAction::Rotate {
                    delta_steps,
                    source,
                } => {
                    let outcome = camera.rotate(delta_steps, Some(source))?;
                    if outcome == RotationOutcome::Accepted {
                        accepted += 1;
                    }
                    log::debug!("frame {frame}: rotate {delta_steps} ({source}) -> {outcome:?}");
                }
                DemoAction::ReleaseGuard { source } => camera.release_guard(source),
            }
        }
        camera.tick();
        clock.advance(options.frame_ms);
    }
    camera.cancel_continuation();

    let rotations = samples.borrow().clone();
    let moves = issuer
        .moves()
        .into_iter()
        .map(|(frame, dx, dy)| MovementSample { frame, dx, dy })
        .collect();
    Ok(DemoReport {
        rotations,
        moves,
        accepted,
        final_step: camera.step(),
        final_angle_deg: camera.angle_deg(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> DemoReport {
        run_demo(&DemoPlan::scripted(), &DemoOptions::default()).expect("demo run")
    }

    #[test]
    fn scripted_demo_lands_back_on_step_one() {
        let report = report();
        assert_eq!(report.accepted, 3);
        assert_eq!(report.final_step, 1);
        assert_eq!(report.final_angle_deg, 45.0);
    }

    #[test]
    fn settles_follow_the_script() {
        let report = report();
        let settled: Vec<(f64, u8)> = report
            .rotations
            .iter()
            .filter(|sample| sample.phase == RotationPhase::Settled)
            .map(|sample| (sample.angle_deg, sample.step))
            .collect();
        // Startup sync first, then the three scripted rotations.
        assert_eq!(settled, vec![(0.0, 0), (45.0, 1), (90.0, 2), (45.0, 1)]);
        assert_eq!(report.settle_count(), 4);
    }

    #[test]
    fn nudges_track_the_live_orientation() {
        let report = report();
        let moves: Vec<(f64, f64)> = report
            .moves
            .iter()
            .map(|sample| (sample.dx, sample.dy))
            .collect();
        // North while on step 1 resolves to northwest; on step 2, to west.
        assert_eq!(
            moves,
            vec![
                (-1.0, -1.0),
                (-1.0, -1.0),
                (-1.0, 0.0),
                (-1.0, 0.0),
                (-1.0, 0.0),
            ]
        );
    }

    #[test]
    fn movement_resumes_only_after_the_first_settle() {
        let report = report();
        let first_settle_frame = report
            .rotations
            .iter()
            .find(|sample| sample.phase == RotationPhase::Settled && sample.angle_deg == 45.0)
            .map(|sample| sample.frame)
            .expect("first rotation settle");
        assert!(report
            .moves
            .iter()
            .all(|sample| sample.frame >= first_settle_frame));
    }

    #[test]
    fn only_settled_samples_carry_a_center_point() {
        let report = report();
        for sample in &report.rotations {
            match sample.phase {
                RotationPhase::Settled => assert!(sample.center_world.is_some()),
                RotationPhase::Animating => assert!(sample.center_world.is_none()),
            }
        }
        let initial = &report.rotations[0];
        assert_eq!(initial.phase, RotationPhase::Settled);
        assert_eq!(initial.center_world, Some([400.0, 300.0]));
    }
}
