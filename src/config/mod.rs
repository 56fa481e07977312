use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "code.py";

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    /// Defaults, then the rc file at `config_path`, then the environment.
    pub fn load_from(config_path: &Path) -> Self {
        let mut map = default_map();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    if let Some((k, v)) = parse_line(&line) {
                        map.insert(k, v);
                    }
                }
            }
        }

        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    /// Command line overrides land here, above file and environment.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn server_url(&self) -> String {
        self.get("PYRUN_SERVER_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// `None` when REQUEST_TIMEOUT is zero or unset: the client then waits as long as the
    /// transport does.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.get_u64("REQUEST_TIMEOUT") {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    pub fn theme_state_path(&self) -> PathBuf {
        self.get("THEME_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| app_config_dir().join("theme"))
    }

    pub fn export_file_name(&self) -> String {
        self.get("EXPORT_FILE_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_FILE_NAME.to_string())
    }

    pub fn log_path(&self) -> PathBuf {
        self.get("LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("pyrun"))
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (k, v) = line.split_once('=')?;
    Some((k.trim().to_string(), v.trim().to_string()))
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "REQUEST_TIMEOUT",
        "THEME_STATE_PATH",
        "EXPORT_FILE_NAME",
        "LOG_PATH",
    ];

    KEYS.contains(&k) || k.starts_with("PYRUN_")
}

fn app_config_dir() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("pyrun")
}

fn default_config_path() -> PathBuf {
    app_config_dir().join(".pyrunrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    let cache = BaseDirs::new()
        .map(|b| b.cache_dir().join("pyrun"))
        .unwrap_or_else(|| env::temp_dir().join("pyrun"));

    m.insert("PYRUN_SERVER_URL".into(), DEFAULT_SERVER_URL.into());
    m.insert("REQUEST_TIMEOUT".into(), "0".into());
    m.insert(
        "THEME_STATE_PATH".into(),
        app_config_dir().join("theme").to_string_lossy().into_owned(),
    );
    m.insert("EXPORT_FILE_NAME".into(), DEFAULT_EXPORT_FILE_NAME.into());
    m.insert("LOG_PATH".into(), cache.to_string_lossy().into_owned());

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let rc = dir.path().join(".pyrunrc");
        fs::write(
            &rc,
            "# local service\nPYRUN_SERVER_URL = http://localhost:8080\n\nREQUEST_TIMEOUT=15\n",
        )
        .unwrap();

        let cfg = Config::load_from(&rc);
        assert_eq!(cfg.server_url(), "http://localhost:8080");
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(cfg.export_file_name(), "code.py");
    }

    #[test]
    fn zero_timeout_means_none() {
        let mut cfg = Config::load_from(Path::new("/nonexistent/.pyrunrc"));
        cfg.set("REQUEST_TIMEOUT", "0");
        assert_eq!(cfg.request_timeout(), None);
        cfg.set("REQUEST_TIMEOUT", "abc");
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn parse_line_skips_comments() {
        assert_eq!(parse_line("# x=1"), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("A = b=c"), Some(("A".into(), "b=c".into())));
    }
}
