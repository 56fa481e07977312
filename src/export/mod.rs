//! Save the editor contents to a local file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use tracing::info;

/// Write `code` verbatim to `dir/file_name`, creating `dir` if needed.
pub fn export_code(code: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
    if file_name.trim().is_empty() || file_name.contains(['/', '\\']) {
        bail!("invalid export file name: {:?}", file_name);
    }
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, code).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = code.len(), "exported code");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let code = "print('hi')\n\n  # trailing  \n";
        let path = export_code(code, dir.path(), "code.py").unwrap();
        assert_eq!(path, dir.path().join("code.py"));
        assert_eq!(fs::read_to_string(path).unwrap(), code);
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_code("x", dir.path(), "../code.py").is_err());
        assert!(export_code("x", dir.path(), "  ").is_err());
    }
}
