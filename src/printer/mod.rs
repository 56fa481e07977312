//! Plain terminal printing for headless runs (owo-colors).

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::session::{OutputStyle, OutputView};

pub struct TextPrinter {
    pub color: bool,
}

impl TextPrinter {
    /// Output text as-is (no extra newline unless missing), then the duration label on its own
    /// line. Error-styled output goes to stderr in red.
    pub fn print_output(&self, view: &OutputView) -> io::Result<()> {
        let mut text = view.text.clone();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        match view.style {
            OutputStyle::Normal => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()?;
            }
            OutputStyle::Error => {
                let mut err = io::stderr().lock();
                if self.color {
                    write!(err, "{}", text.red())?;
                } else {
                    err.write_all(text.as_bytes())?;
                }
                err.flush()?;
            }
        }
        if let Some(label) = &view.duration {
            let mut err = io::stderr().lock();
            if self.color {
                writeln!(err, "{}", label.dimmed())?;
            } else {
                writeln!(err, "{label}")?;
            }
        }
        Ok(())
    }

    pub fn print_heading(&self, text: &str) {
        if self.color {
            println!("{}", text.cyan().bold());
        } else {
            println!("{text}");
        }
    }
}
