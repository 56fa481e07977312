//! UI layout and rendering logic for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Focus, PopupState};
use crate::{
    editor::BufferEditor,
    samples,
    session::{OutputStyle, RunState},
    theme::ThemePreference,
};

struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
    error: Color,
}

fn palette(theme: ThemePreference) -> Palette {
    match theme {
        ThemePreference::Dark => Palette {
            fg: Color::White,
            bg: Color::Black,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            error: Color::LightRed,
        },
        ThemePreference::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            muted: Color::Gray,
            error: Color::Red,
        },
    }
}

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let pal = palette(app.session.editor().theme());
    let base = Style::default().fg(pal.fg).bg(pal.bg);
    frame.render_widget(Block::default().style(base), frame.area());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(columns[1]);

    render_buffer(
        frame,
        app.session.editor(),
        columns[0],
        "Code (main.py)",
        app.focus == Focus::Code && !app.is_popup_shown() && !app.show_help,
        &pal,
    );
    render_buffer(
        frame,
        &app.stdin,
        right[0],
        "Input (stdin)",
        app.focus == Focus::Stdin && !app.is_popup_shown() && !app.show_help,
        &pal,
    );
    render_output(frame, app, right[1], &pal);
    render_status_bar(frame, app, main_layout[1], &pal);

    if app.show_help {
        render_help_overlay(frame, &pal);
    }

    if let PopupState::SamplePicker { selected } = app.popup_state {
        render_sample_picker(frame, selected, &pal);
    }
}

/// Editable pane with the cursor kept in view
fn render_buffer(
    frame: &mut Frame,
    editor: &BufferEditor,
    area: Rect,
    title: &str,
    focused: bool,
    pal: &Palette,
) {
    let border = if focused { Style::default().fg(pal.accent) } else { Style::default().fg(pal.muted) };
    let inner_h = area.height.saturating_sub(2) as usize;
    let inner_w = area.width.saturating_sub(2) as usize;
    let (row, _) = editor.cursor();
    let col = editor.cursor_display_col();

    let scroll_y = (row + 1).saturating_sub(inner_h);
    let scroll_x = (col + 1).saturating_sub(inner_w);

    let lines: Vec<Line> = editor.lines().iter().map(|l| Line::from(l.as_str())).collect();
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border))
        .scroll((scroll_y as u16, scroll_x as u16));
    frame.render_widget(paragraph, area);

    if focused && inner_h > 0 && inner_w > 0 {
        let x = area.x + 1 + (col - scroll_x) as u16;
        let y = area.y + 1 + (row - scroll_y) as u16;
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Render the output pane
fn render_output(frame: &mut Frame, app: &App, area: Rect, pal: &Palette) {
    let view = app.session.output();
    let text_style = match view.style {
        OutputStyle::Normal => Style::default().fg(pal.fg),
        OutputStyle::Error => Style::default().fg(pal.error),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title("Output")
        .border_style(Style::default().fg(pal.muted));
    if let Some(label) = &view.duration {
        block = block.title(Line::from(label.as_str()).right_aligned());
    }

    let inner_h = area.height.saturating_sub(2) as usize;
    let inner_w = area.width.saturating_sub(2);
    let paragraph = Paragraph::new(view.text.as_str()).style(text_style).wrap(Wrap { trim: false });

    // Follow the tail of the wrapped rows unless the user scrolled back
    let rows = paragraph.line_count(inner_w);
    let max_scroll = rows.saturating_sub(inner_h);
    let scroll_y = max_scroll.saturating_sub(app.output_scroll as usize) as u16;

    let paragraph = paragraph.block(block).scroll((scroll_y, 0));
    frame.render_widget(paragraph, area);
}

/// Render the status bar with the run control
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect, pal: &Palette) {
    let controls = app.session.controls();
    let (label, style) = if controls.pending {
        (" Running... ", Style::default().bg(Color::Yellow).fg(Color::Black))
    } else if controls.success_flash {
        (" ✓ Run ", Style::default().bg(Color::Green).fg(Color::Black).add_modifier(Modifier::BOLD))
    } else if controls.run_enabled {
        (" ▶ Run ", Style::default().bg(pal.accent).fg(pal.bg).add_modifier(Modifier::BOLD))
    } else {
        (" ▶ Run ", Style::default().bg(pal.muted).fg(pal.bg))
    };

    let state_style = match app.session.state() {
        RunState::Failed => Style::default().fg(pal.error),
        RunState::Succeeded => Style::default().fg(Color::Green),
        _ => Style::default().fg(pal.fg),
    };

    let line = Line::from(vec![
        Span::styled(label, style),
        Span::raw(" "),
        Span::styled(app.session.state().label(), state_style),
        Span::raw(format!(" | {} | {}", app.server_url, app.status_message)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(pal.muted).fg(pal.fg)), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, pal: &Palette) {
    let popup_area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("Running:"),
        Line::from("  Ctrl+Enter / F5 / Ctrl+R - Run code"),
        Line::from("  Ctrl+L                   - Clear output"),
        Line::from("  PageUp / PageDown        - Scroll output"),
        Line::from(""),
        Line::from("Editing:"),
        Line::from("  F6 / Shift+Tab           - Switch between code and input"),
        Line::from("  Tab                      - Indent (4 spaces)"),
        Line::from("  F2                       - Load a sample"),
        Line::from(""),
        Line::from("Other:"),
        Line::from("  Ctrl+S                   - Save code to file"),
        Line::from("  Ctrl+T                   - Toggle light/dark theme"),
        Line::from("  F1 / Esc                 - Close this help"),
        Line::from("  Ctrl+Q, Ctrl+C twice     - Quit"),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .style(Style::default().fg(pal.fg).bg(pal.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, popup_area);
}

fn render_sample_picker(frame: &mut Frame, selected: usize, pal: &Palette) {
    let popup_area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = samples::SAMPLES
        .iter()
        .enumerate()
        .map(|(i, s)| ListItem::new(format!("{}. {}", i + 1, s.title)))
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(pal.fg).bg(pal.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Samples (Enter to load, Esc to cancel)")
                .title_style(Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
