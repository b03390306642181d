use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::errors::Result;

const DEFAULT_DIR_NAME: &str = ".expense_core";
const APP_DIR_NAME: &str = "expense_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Resolves on-disk locations for configuration and snapshots.
pub struct PathResolver;

impl PathResolver {
    /// Platform data directory for the application, falling back to the home
    /// directory and finally the working directory.
    pub fn base_dir() -> PathBuf {
        if let Some(data) = dirs::data_dir() {
            return data.join(APP_DIR_NAME);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    /// Joins relative paths onto `base`; absolute paths pass through unchanged.
    pub fn resolve_in(base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling staging path: `expenses.json` becomes `expenses.json.tmp`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Stages `data` next to `path` and renames it into place, so a failed write
/// leaves any previous file intact.
pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn relative_paths_resolve_against_base() {
        let base = Path::new("/srv/expenses");
        assert_eq!(
            PathResolver::resolve_in(base, Path::new("data.json")),
            PathBuf::from("/srv/expenses/data.json")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let temp = TempDir::new().unwrap();
        let absolute = temp.path().join("elsewhere.json");
        assert_eq!(
            PathResolver::resolve_in(Path::new("/srv/expenses"), &absolute),
            absolute
        );
    }

    #[test]
    fn tmp_path_appends_suffix_to_existing_extension() {
        assert_eq!(
            tmp_path(Path::new("/data/expenses.json")),
            PathBuf::from("/data/expenses.json.tmp")
        );
        assert_eq!(
            tmp_path(Path::new("/data/expenses")),
            PathBuf::from("/data/expenses.tmp")
        );
    }

    #[test]
    fn write_atomic_replaces_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("file.json");
        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(Path::new("")).unwrap();
    }
}
