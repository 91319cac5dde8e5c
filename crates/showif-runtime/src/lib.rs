#![forbid(unsafe_code)]

//! Runtime: reactive state, conditional views, binding groups, and the
//! access-gate host component.

pub mod binding;
pub mod component;
pub mod directive;
pub mod reactive;
pub mod screen;

pub use binding::{BindingGroup, SettleReport};
pub use component::{AccessGate, EventOutcome, GateConfig};
pub use directive::{ConditionalView, Transition, ViewState};
pub use reactive::{Computed, Observable, Subscription};
pub use screen::{Screen, SlotSurface};
