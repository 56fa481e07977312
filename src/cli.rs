use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "pyrun", about = "Python playground backed by a remote execution service", version)]
#[command(group(ArgGroup::new("mode").args(["run", "list_samples", "show_sample", "toggle_theme"]).multiple(false)))]
#[command(group(ArgGroup::new("stdin_source").args(["input", "input_file"]).multiple(false)))]
#[command(group(ArgGroup::new("log_level").args(["debug", "verbose"]).multiple(false)))]
pub struct Cli {
    /// Execution service base URL (overrides PYRUN_SERVER_URL).
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Run a file once without the interactive UI and print the result.
    ///
    /// Exits non-zero when the run fails. Code piped on stdin is run the same way.
    #[arg(long, value_name = "FILE")]
    pub run: Option<PathBuf>,

    /// Text passed to the program's standard input.
    #[arg(long, value_name = "TEXT")]
    pub input: Option<String>,

    /// Read the program's standard input from a file.
    #[arg(long = "input-file", value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Preload a sample into the editor (see --list-samples).
    #[arg(long, value_name = "KEY")]
    pub sample: Option<String>,

    /// List built-in samples.
    #[arg(short = 'l', long = "list-samples")]
    pub list_samples: bool,

    /// Print a built-in sample.
    #[arg(long = "show-sample", value_name = "KEY")]
    pub show_sample: Option<String>,

    /// Directory Ctrl+S saves the code into (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Flip the stored light/dark preference and exit.
    #[arg(long = "toggle-theme")]
    pub toggle_theme: bool,

    /// Disable colored output in headless mode.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,

    /// Enable info logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
