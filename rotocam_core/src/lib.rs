//! Core engine for camera-relative movement under 8-step viewport rotation.
//!
//! The viewport rotates in fixed 45-degree increments while directional input
//! keeps meaning "toward the top of the screen". The crate owns the discrete
//! orientation state, the animated transition between steps, the remapping of
//! unit-step movement vectors into the current orientation, and the loop that
//! keeps held movement flowing after a rotation settles. Everything the host
//! renders or moves stays behind the collaborator traits in [`host`].

pub mod animator;
pub mod clock;
pub mod continuation;
pub mod direction;
pub mod engine;
pub mod events;
pub mod gate;
pub mod host;
pub mod interceptor;
pub mod orientation;
pub mod stage;

pub use animator::{AnimatorTick, RotationAnimator, RotationTransition, DEFAULT_TRANSITION_MS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use continuation::{ContinuationLoop, StopToken, DEFAULT_CADENCE_MS};
pub use direction::{direction_index, reorient, GridVector, COMPASS_POINTS, DIRECTIONS, STEP_COUNT};
pub use engine::{EngineConfig, HostBindings, RotatingCamera, RotationOutcome};
pub use events::{RotationFrame, RotationObserver};
pub use gate::{GateDecision, RotationGate, DEFAULT_DEBOUNCE_MS};
pub use host::{MovementError, MovementIssuer, MovementSource, SubjectQuery, ViewportQuery};
pub use interceptor::MovementInterceptor;
pub use orientation::{OrientationHandle, OrientationState, RotationError};
pub use stage::StageTransform;
