//! Editing surface: the capability the session reads code from, plus a line buffer
//! implementation used by the terminal UI.

use unicode_width::UnicodeWidthStr;

use crate::theme::ThemePreference;

pub const DEFAULT_SNIPPET: &str = "# Write your Python code here\nprint(\"Hello, World!\")";

/// What the session controller needs from an editor. Any widget providing these is
/// substitutable.
pub trait EditorSession: Send {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn apply_theme(&mut self, theme: ThemePreference);
}

/// Multi-line text buffer with a (row, column) cursor. Columns count chars, not bytes.
#[derive(Debug, Clone)]
pub struct BufferEditor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    theme: ThemePreference,
}

impl Default for BufferEditor {
    fn default() -> Self {
        Self::new("")
    }
}

impl BufferEditor {
    pub fn new(text: &str) -> Self {
        let mut editor = Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            theme: ThemePreference::default(),
        };
        editor.set_text(text);
        editor
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Terminal column of the cursor, accounting for wide characters.
    pub fn cursor_display_col(&self) -> usize {
        let line = &self.lines[self.row];
        let byte = char_to_byte(line, self.col);
        UnicodeWidthStr::width(&line[..byte])
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        let line = &mut self.lines[self.row];
        let byte = char_to_byte(line, self.col);
        line.insert(byte, c);
        self.col += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '\r' => {}
                c => self.insert_char(c),
            }
        }
    }

    pub fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let byte = char_to_byte(line, self.col);
        let rest = line.split_off(byte);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let byte = char_to_byte(line, self.col - 1);
            line.remove(byte);
            self.col -= 1;
        } else if self.row > 0 {
            // Join with the previous line
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let byte = char_to_byte(line, self.col);
            line.remove(byte);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_len(self.row);
    }
}

impl EditorSession for BufferEditor {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect();
        self.row = self.lines.len() - 1;
        self.col = self.line_len(self.row);
    }

    fn apply_theme(&mut self, theme: ThemePreference) {
        self.theme = theme;
    }
}

fn char_to_byte(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(i, _)| i).unwrap_or(s.len())
}
