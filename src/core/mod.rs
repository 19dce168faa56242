//! Core library components.
//!
//! Settings, the secret accessor, pipeline extraction, subprocess execution and
//! the step plan that ties them together.

pub mod cleanup;
pub mod constants;
pub mod pipeline;
pub mod plan;
pub mod process;
pub mod secrets;
pub mod settings;
