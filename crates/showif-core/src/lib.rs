#![forbid(unsafe_code)]

//! Core: template fragments, render surfaces, and input events.

pub mod event;
pub mod fragment;
pub mod surface;

pub use event::{CommandId, Event};
pub use fragment::{Fragment, FragmentId};
pub use surface::RenderSurface;
