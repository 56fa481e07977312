//! Light/dark preference and its persistence.

use std::{fmt, fs, path::PathBuf, str::FromStr, sync::Mutex};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{config::Config, editor::EditorSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    pub fn inverse(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => anyhow::bail!("unknown theme: {other}"),
        }
    }
}

pub trait ThemePersistence: Send {
    /// Stored preference, `Dark` when nothing usable is stored.
    fn load(&self) -> ThemePreference;
    fn save(&self, pref: ThemePreference) -> Result<()>;
}

/// One-line state file holding `light` or `dark`.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.theme_state_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ThemePersistence for FileThemeStore {
    fn load(&self) -> ThemePreference {
        match fs::read_to_string(&self.path) {
            Ok(text) => text.parse().unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "ignoring stored theme");
                ThemePreference::default()
            }),
            Err(_) => ThemePreference::default(),
        }
    }

    fn save(&self, pref: ThemePreference) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, pref.as_str())
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    stored: Mutex<Option<ThemePreference>>,
}

impl MemoryThemeStore {
    pub fn with(pref: ThemePreference) -> Self {
        Self { stored: Mutex::new(Some(pref)) }
    }
}

impl ThemePersistence for MemoryThemeStore {
    fn load(&self) -> ThemePreference {
        self.stored
            .lock()
            .map(|g| g.unwrap_or_default())
            .unwrap_or_default()
    }

    fn save(&self, pref: ThemePreference) -> Result<()> {
        let mut guard = self
            .stored
            .lock()
            .map_err(|_| anyhow::anyhow!("theme store poisoned"))?;
        *guard = Some(pref);
        Ok(())
    }
}

/// Flip `current`, persist the result and push it to the editor. A failed save is logged;
/// the editor still switches.
pub fn toggle_theme(
    current: ThemePreference,
    store: &dyn ThemePersistence,
    editor: &mut dyn EditorSession,
) -> ThemePreference {
    let next = current.inverse();
    if let Err(e) = store.save(next) {
        warn!(error = %e, "failed to persist theme preference");
    }
    editor.apply_theme(next);
    debug!(theme = %next, "theme toggled");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::BufferEditor;

    #[test]
    fn missing_file_defaults_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileThemeStore::new(dir.path().join("nested").join("theme"));
        assert_eq!(store.load(), ThemePreference::Dark);
    }

    #[test]
    fn file_store_round_trips_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileThemeStore::new(dir.path().join("nested").join("theme"));
        store.save(ThemePreference::Light).unwrap();
        assert_eq!(store.load(), ThemePreference::Light);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "light");
    }

    #[test]
    fn garbage_falls_back_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        fs::write(&path, "solarized").unwrap();
        assert_eq!(FileThemeStore::new(path).load(), ThemePreference::Dark);
    }

    #[test]
    fn toggle_twice_restores_preference() {
        let store = MemoryThemeStore::with(ThemePreference::Light);
        let mut editor = BufferEditor::default();
        let start = store.load();

        let once = toggle_theme(start, &store, &mut editor);
        assert_eq!(once, ThemePreference::Dark);
        assert_eq!(store.load(), ThemePreference::Dark);
        assert_eq!(editor.theme(), ThemePreference::Dark);

        let twice = toggle_theme(once, &store, &mut editor);
        assert_eq!(twice, start);
        assert_eq!(store.load(), start);
        assert_eq!(editor.theme(), start);
    }
}
