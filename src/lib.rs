//! pyrun: a terminal playground that sends Python snippets to a remote `/run` service.

pub mod config;
pub mod editor;
pub mod execution;
pub mod export;
pub mod handlers;
pub mod logging;
pub mod printer;
pub mod samples;
pub mod session;
pub mod theme;
pub mod tui;
