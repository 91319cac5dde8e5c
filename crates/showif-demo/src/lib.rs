#![forbid(unsafe_code)]

//! Demo front-end for the showif access gate.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;

pub use cli::{run, run_from_env};
pub use error::{DemoError, Result};
