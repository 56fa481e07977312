use anyhow::{anyhow, Result};

use crate::{
    printer::TextPrinter,
    samples::{self, Sample},
};

/// Like [`samples::get`], with an error listing the valid keys.
pub fn find(key: &str) -> Result<&'static Sample> {
    samples::get(key).ok_or_else(|| {
        anyhow!(
            "unknown sample {:?}; available: {}",
            key,
            samples::keys().collect::<Vec<_>>().join(", ")
        )
    })
}

pub fn list(printer: &TextPrinter) {
    for sample in samples::SAMPLES {
        printer.print_heading(sample.key);
        println!("  {}", sample.title);
    }
}

pub fn show(key: &str) -> Result<()> {
    println!("{}", find(key)?.code);
    Ok(())
}
