//! Tracing setup. Headless runs log to stderr; the TUI logs to a file so the alternate screen
//! stays clean.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const QUIET_DEPS: &str = "hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn";

pub fn filter(debug: bool, verbose: bool) -> EnvFilter {
    if debug {
        EnvFilter::new(format!("debug,{QUIET_DEPS}"))
    } else if verbose {
        EnvFilter::new(format!("info,{QUIET_DEPS}"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

pub fn init_stderr(filter: EnvFilter) {
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    tracing_subscriber::registry().with(filter).with(layer).init();
}

pub fn init_file(filter: EnvFilter, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join("pyrun.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let layer = fmt::layer().with_target(false).with_ansi(false).with_writer(std::sync::Mutex::new(file));
    tracing_subscriber::registry().with(filter).with(layer).init();
    Ok(())
}
