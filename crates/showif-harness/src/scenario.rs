#![forbid(unsafe_code)]

//! Scripted toggle scenarios over an [`AccessGate`].
//!
//! A [`ToggleScenario`] wires a gate to two recording surfaces, runs a
//! number of toggles, and snapshots the observable state after each one.

use serde::Serialize;
use showif_core::FragmentId;
use showif_runtime::{AccessGate, GateConfig};

use crate::recording::{RecordingSurface, SurfaceLog};

pub const GRANTED_SURFACE: &str = "granted";
pub const DENIED_SURFACE: &str = "denied";

/// Observable state after one step of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSnapshot {
    /// 0 is the state right after construction.
    pub step: u64,
    pub granted: bool,
    pub visible: Option<FragmentId>,
    pub granted_attaches: usize,
    pub granted_detaches: usize,
    pub denied_attaches: usize,
    pub denied_detaches: usize,
}

/// A gate on recording surfaces plus the snapshots taken so far.
#[derive(Debug)]
pub struct ToggleScenario {
    gate: AccessGate<RecordingSurface>,
    log: SurfaceLog,
    snapshots: Vec<StepSnapshot>,
}

impl ToggleScenario {
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        let log = SurfaceLog::new();
        let gate = AccessGate::new(
            config,
            log.surface(GRANTED_SURFACE),
            log.surface(DENIED_SURFACE),
        );
        let mut scenario = Self {
            gate,
            log,
            snapshots: Vec::new(),
        };
        scenario.snapshot();
        scenario
    }

    fn snapshot(&mut self) {
        let snap = StepSnapshot {
            step: self.gate.toggle_count(),
            granted: self.gate.is_granted(),
            visible: self.gate.visible_fragment(),
            granted_attaches: self.log.attach_count(GRANTED_SURFACE),
            granted_detaches: self.log.detach_count(GRANTED_SURFACE),
            denied_attaches: self.log.attach_count(DENIED_SURFACE),
            denied_detaches: self.log.detach_count(DENIED_SURFACE),
        };
        self.snapshots.push(snap);
    }

    /// Toggle once and snapshot.
    pub fn step(&mut self) -> &StepSnapshot {
        self.gate.toggle();
        self.snapshot();
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Toggle `n` times, snapshotting after each.
    pub fn run(&mut self, n: usize) -> &[StepSnapshot] {
        for _ in 0..n {
            self.step();
        }
        &self.snapshots
    }

    #[must_use]
    pub fn gate(&self) -> &AccessGate<RecordingSurface> {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut AccessGate<RecordingSurface> {
        &mut self.gate
    }

    #[must_use]
    pub fn log(&self) -> &SurfaceLog {
        &self.log
    }

    #[must_use]
    pub fn snapshots(&self) -> &[StepSnapshot] {
        &self.snapshots
    }

    /// Snapshots as JSONL, for postmortem dumps from failing tests.
    #[must_use]
    pub fn snapshots_jsonl(&self) -> String {
        self.snapshots
            .iter()
            .filter_map(|s| serde_json::to_string(s).ok())
            .map(|line| line + "\n")
            .collect()
    }
}
