//! Async event loop for the interactive playground.

use std::io;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    config::Config,
    editor::{BufferEditor, EditorSession, DEFAULT_SNIPPET},
    execution::HttpExecutionClient,
    samples,
    session::{SessionController, SessionEvent},
    theme::FileThemeStore,
};
use super::{
    app::{default_status, App, Focus, PopupState},
    events::{spawn_input_reader, TuiEvent},
    ui::render_ui,
};

const INDENT: &str = "    ";
const OUTPUT_PAGE: u16 = 5;

/// Run the interactive playground until the user quits.
pub async fn run_tui(
    cfg: &Config,
    initial_code: Option<String>,
    initial_stdin: &str,
    export_dir: PathBuf,
) -> Result<()> {
    if !is_terminal::IsTerminal::is_terminal(&io::stdout()) {
        anyhow::bail!("interactive mode requires a terminal; use --run for headless execution");
    }

    let client = HttpExecutionClient::from_config(cfg)?;
    let themes = FileThemeStore::from_config(cfg);
    let code = initial_code.unwrap_or_else(|| DEFAULT_SNIPPET.to_string());
    let (session, session_rx) =
        SessionController::new(BufferEditor::new(&code), Arc::new(client), Box::new(themes));
    let mut app = App::new(session, cfg.server_url(), export_dir, cfg.export_file_name());
    app.stdin.set_text(initial_stdin);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    // Needed for the terminal to report Ctrl+Enter distinctly from Enter
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(server = %app.server_url, keyboard_enhancement = enhanced, "playground started");

    let result = run_app(&mut terminal, &mut app, session_rx).await;

    // Restore terminal
    if enhanced {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    terminal.backend_mut().execute(DisableBracketedPaste)?;
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut session_rx: mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<()> {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<TuiEvent>();
    let stop = Arc::new(AtomicBool::new(false));
    spawn_input_reader(input_tx, stop.clone());

    let result = loop {
        if let Err(e) = terminal.draw(|frame| render_ui(frame, app)) {
            break Err(e).context("failed to draw");
        }

        tokio::select! {
            ev = input_rx.recv() => match ev {
                Some(TuiEvent::Key(key)) => {
                    if handle_key_event(app, key) {
                        break Ok(());
                    }
                }
                Some(TuiEvent::Paste(text)) => handle_paste(app, &text),
                Some(TuiEvent::Resize) => {}
                None => break Ok(()),
            },
            Some(ev) = session_rx.recv() => app.session.handle(ev),
        }
    };

    stop.store(true, Ordering::Relaxed);
    result
}

/// Pasted text goes to the focused pane unless an overlay covers it.
pub fn handle_paste(app: &mut App, text: &str) {
    if !app.is_popup_shown() && !app.show_help {
        app.focused_editor().insert_str(text);
    }
}

/// Apply one key press. Returns true when the user asked to quit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    // AltGr arrives as Ctrl+Alt on Windows terminals
    let alt_gr = key.modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT);

    if let PopupState::SamplePicker { selected } = app.popup_state {
        match key.code {
            KeyCode::Up => app.picker_move(-1),
            KeyCode::Down => app.picker_move(1),
            KeyCode::Enter => app.pick_sample(selected),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let n = c.to_digit(10).unwrap_or(0) as usize;
                if (1..=samples::SAMPLES.len()).contains(&n) {
                    app.pick_sample(n - 1);
                }
            }
            _ => app.hide_popup(),
        }
        return false;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
            app.toggle_help();
        }
        return false;
    }

    match key.code {
        KeyCode::Char('c') if ctrl => return app.handle_ctrl_c(),
        KeyCode::Char('q') if ctrl => return true,
        KeyCode::Enter | KeyCode::Char('r') if ctrl => app.request_run(),
        KeyCode::F(5) => app.request_run(),
        KeyCode::Char('l') if ctrl => app.clear_output(),
        KeyCode::Char('t') if ctrl => app.toggle_theme(),
        KeyCode::Char('s') if ctrl => {
            // Failure is reported in the status bar
            let _ = app.export();
        }
        KeyCode::PageUp => app.scroll_output_up(OUTPUT_PAGE),
        KeyCode::PageDown => app.scroll_output_down(OUTPUT_PAGE),
        KeyCode::F(1) => app.toggle_help(),
        KeyCode::F(2) => app.open_sample_picker(),
        KeyCode::F(6) | KeyCode::BackTab => {
            app.toggle_focus();
            app.status_message = match app.focus {
                Focus::Code => default_status().to_string(),
                Focus::Stdin => "Editing program input (F6 to go back)".to_string(),
            };
        }
        KeyCode::Tab => app.focused_editor().insert_str(INDENT),
        KeyCode::Enter => app.focused_editor().newline(),
        KeyCode::Backspace => app.focused_editor().backspace(),
        KeyCode::Delete => app.focused_editor().delete(),
        KeyCode::Left => app.focused_editor().move_left(),
        KeyCode::Right => app.focused_editor().move_right(),
        KeyCode::Up => app.focused_editor().move_up(),
        KeyCode::Down => app.focused_editor().move_down(),
        KeyCode::Home => app.focused_editor().move_home(),
        KeyCode::End => app.focused_editor().move_end(),
        KeyCode::Char(c) if !ctrl || alt_gr => app.focused_editor().insert_char(c),
        _ => {}
    }

    false
}
