#![forbid(unsafe_code)]

//! Test harness for showif: surfaces that record every call, and scripted
//! toggle scenarios with JSONL evidence.

pub mod recording;
pub mod scenario;

pub use recording::{RecordingSurface, SurfaceEvent, SurfaceLog, SurfaceOp};
pub use scenario::{StepSnapshot, ToggleScenario};
