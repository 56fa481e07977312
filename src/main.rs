mod cli;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use pyrun::{
    config::Config,
    editor::BufferEditor,
    handlers,
    logging,
    printer::TextPrinter,
    theme::{toggle_theme, FileThemeStore, ThemePersistence},
    tui,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let mut cfg = Config::load();
    if let Some(url) = args.server.as_deref() {
        cfg.set("PYRUN_SERVER_URL", url);
    }

    let filter = logging::filter(args.debug, args.verbose);
    let stdin_is_tty = io::stdin().is_terminal();
    let headless = args.run.is_some() || !stdin_is_tty;
    let printer = TextPrinter { color: !args.no_color && io::stdout().is_terminal() };

    // Shortcuts that never touch the network
    if args.list_samples {
        handlers::samples::list(&printer);
        return Ok(());
    }
    if let Some(key) = &args.show_sample {
        return handlers::samples::show(key);
    }
    if args.toggle_theme {
        logging::init_stderr(filter);
        let store = FileThemeStore::from_config(&cfg);
        let next = toggle_theme(store.load(), &store, &mut BufferEditor::default());
        println!("Theme: {next} ({})", store.path().display());
        return Ok(());
    }

    let program_input = match (&args.input, &args.input_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?,
        (None, None) => String::new(),
    };

    if headless {
        if args.sample.is_some() {
            bail!("--sample only applies to the interactive playground");
        }
        logging::init_stderr(filter);
        let code = match &args.run {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        let succeeded = handlers::run::run(&cfg, &code, &program_input, &printer).await?;
        if !succeeded {
            std::process::exit(1);
        }
        return Ok(());
    }

    logging::init_file(filter, &cfg.log_path())?;

    let initial_code = match args.sample.as_deref() {
        Some(key) => Some(handlers::samples::find(key)?.code.to_string()),
        None => None,
    };
    let export_dir = args.export.clone().unwrap_or_else(|| PathBuf::from("."));

    tui::run_tui(&cfg, initial_code, &program_input, export_dir).await
}
