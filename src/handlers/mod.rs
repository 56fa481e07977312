//! Non-interactive entry points.

pub mod run;
pub mod samples;
