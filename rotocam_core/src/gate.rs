//! Debounce and per-source re-entrancy bookkeeping for rotation requests.

use std::collections::BTreeSet;

/// Minimum interval between two accepted rotations.
pub const DEFAULT_DEBOUNCE_MS: u64 = 140;

/// How the gate resolved a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Accepted,
    /// Arrived inside the debounce window since the last accepted request.
    Debounced,
    /// The request's source is still held from an earlier accepted request.
    HeldSource,
}

/// Decides whether a rotation request proceeds.
///
/// Pure bookkeeping: the gate knows nothing about why a rotation might be
/// disallowed by policy (permissions, per-area locks). Those checks belong
/// upstream, before the request reaches the engine.
#[derive(Debug, Clone)]
pub struct RotationGate {
    debounce_ms: u64,
    last_accepted_ms: Option<u64>,
    guards: BTreeSet<String>,
}

impl RotationGate {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            last_accepted_ms: None,
            guards: BTreeSet::new(),
        }
    }

    /// Resolve a request arriving at `now_ms` from an optional held source.
    /// On accept the timestamp is recorded and the source joins the guard set
    /// until [`RotationGate::release`] is called for it.
    pub fn accept(&mut self, now_ms: u64, source: Option<&str>) -> GateDecision {
        if let Some(source) = source {
            if self.guards.contains(source) {
                return GateDecision::HeldSource;
            }
        }
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < self.debounce_ms {
                return GateDecision::Debounced;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        if let Some(source) = source {
            self.guards.insert(source.to_string());
        }
        GateDecision::Accepted
    }

    /// Drop a source from the guard set. Must be called exactly once per hold
    /// release; a release that never fires would permanently block the source.
    pub fn release(&mut self, source: &str) {
        self.guards.remove(source);
    }

    pub fn is_guarded(&self, source: &str) -> bool {
        self.guards.contains(source)
    }
}
