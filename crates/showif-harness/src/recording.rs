#![forbid(unsafe_code)]

//! Recording render surfaces.
//!
//! Every [`RecordingSurface`] created from one [`SurfaceLog`] appends to the
//! same ordered event list, so tests can assert on the interleaving of calls
//! across surfaces, not just per-surface counts.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use showif_core::{Fragment, FragmentId, RenderSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    Attach { fragment: FragmentId },
    Detach,
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceEvent {
    pub seq: u64,
    pub surface: String,
    #[serde(flatten)]
    pub op: SurfaceOp,
}

/// Shared, ordered log of surface calls.
#[derive(Debug, Clone, Default)]
pub struct SurfaceLog {
    events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl SurfaceLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A new empty surface writing into this log.
    #[must_use]
    pub fn surface(&self, name: impl Into<String>) -> RecordingSurface {
        RecordingSurface {
            name: name.into(),
            log: self.clone(),
            attached: Vec::new(),
        }
    }

    fn push(&self, surface: &str, op: SurfaceOp) {
        let mut events = self.events.borrow_mut();
        let seq = events.len() as u64;
        tracing::trace!(seq, surface, ?op, "surface call");
        events.push(SurfaceEvent {
            seq,
            surface: surface.to_string(),
            op,
        });
    }

    #[must_use]
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    #[must_use]
    pub fn attach_count(&self, surface: &str) -> usize {
        self.count(surface, |op| matches!(op, SurfaceOp::Attach { .. }))
    }

    #[must_use]
    pub fn detach_count(&self, surface: &str) -> usize {
        self.count(surface, |op| matches!(op, SurfaceOp::Detach))
    }

    fn count(&self, surface: &str, pred: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.surface == surface && pred(&e.op))
            .count()
    }

    /// Highest number of non-empty surfaces at any point in the log.
    ///
    /// Replays the calls in order, treating attach as "surface non-empty"
    /// and detach as "surface empty".
    #[must_use]
    pub fn max_concurrently_visible(&self) -> usize {
        let events = self.events.borrow();
        let mut visible: Vec<&str> = Vec::new();
        let mut max = 0;
        for event in events.iter() {
            match event.op {
                SurfaceOp::Attach { .. } => {
                    if !visible.contains(&event.surface.as_str()) {
                        visible.push(&event.surface);
                    }
                }
                SurfaceOp::Detach => visible.retain(|name| *name != event.surface),
            }
            max = max.max(visible.len());
        }
        max
    }

    /// One JSON object per line, in call order.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| serde_json::to_string(e).ok())
            .map(|line| line + "\n")
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// A render surface that logs every call and tracks what it holds.
#[derive(Debug)]
pub struct RecordingSurface {
    name: String,
    log: SurfaceLog,
    attached: Vec<FragmentId>,
}

impl RecordingSurface {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of fragments currently attached here.
    #[must_use]
    pub fn attached(&self) -> &[FragmentId] {
        &self.attached
    }
}

impl RenderSurface for RecordingSurface {
    fn attach(&mut self, fragment: &Fragment) {
        self.attached.push(fragment.id());
        self.log.push(
            &self.name,
            SurfaceOp::Attach {
                fragment: fragment.id(),
            },
        );
    }

    fn detach(&mut self) {
        self.attached.clear();
        self.log.push(&self.name, SurfaceOp::Detach);
    }

    fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
