//! Settings persistence
//!
//! Settings live in a JSON file. Saves are crash-safe: data goes to a
//! temporary file in the same directory, is fsynced, then renamed over the
//! target, so a reader never sees a half-written file.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::schema::Settings;

/// Settings file used by the host plugin inside a vault
pub const VAULT_SETTINGS_PATH: &str = ".obsidian/plugins/auto-note-mover/data.json";

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write settings {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid settings JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not determine a settings location")]
    NoLocation,
}

/// Pick the settings file for `vault_root`.
///
/// An explicit path wins; otherwise the vault's own plugin settings are used
/// when present, falling back to the user config directory.
pub fn resolve_settings_path(
    vault_root: &Path,
    explicit: Option<&Path>,
) -> Result<PathBuf, SettingsError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let in_vault = vault_root.join(VAULT_SETTINGS_PATH);
    if in_vault.exists() {
        return Ok(in_vault);
    }

    dirs::config_dir()
        .map(|dir| dir.join("note-mover").join("settings.json"))
        .ok_or(SettingsError::NoLocation)
}

/// Load settings, merging over defaults. A missing file yields defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("[Settings] {} not found, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    Settings::from_json(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save settings atomically
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let json = settings.to_json()?;
    atomic_write(path, json.as_bytes()).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("[Settings] Saved {}", path.display());
    Ok(())
}

/// Write data to a file atomically with fsync
///
/// This function:
/// 1. Writes data to a temporary file in the same directory
/// 2. Calls fsync on the file to ensure data is on disk
/// 3. Atomically renames the temp file to the target
/// 4. Syncs the directory to ensure the rename is durable
///
/// If any step fails, the temporary file is cleaned up.
pub fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !parent.exists() {
        fs::create_dir_all(&parent)?;
    }

    let temp_name = format!(
        ".{}.tmp.{}",
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "settings".to_string()),
        std::process::id()
    );
    let temp_path = parent.join(&temp_name);

    let write_result = (|| -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()
    })();

    if let Err(e) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    sync_directory(&parent);
    Ok(())
}

/// Best-effort directory fsync so the rename survives a crash.
/// Not supported on every platform, so failures are only logged.
fn sync_directory(path: &Path) {
    #[cfg(unix)]
    {
        if let Err(e) = fs::File::open(path).and_then(|dir| dir.sync_all()) {
            tracing::debug!("[Settings] Directory sync skipped for {}: {}", path.display(), e);
        }
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("dir").join("data.json");

        atomic_write(&path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        // No temp file left behind
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings(&dir.path().join("missing.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut settings = Settings::default();
        settings.add_tag_rule("Projects", "#proj");
        settings.use_regex_to_check_for_tags = true;
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(load_settings(&path), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_resolve_prefers_vault_settings() {
        let dir = tempdir().unwrap();
        let in_vault = dir.path().join(VAULT_SETTINGS_PATH);
        atomic_write(&in_vault, b"{}").unwrap();

        assert_eq!(resolve_settings_path(dir.path(), None).unwrap(), in_vault);

        let explicit = dir.path().join("custom.json");
        assert_eq!(
            resolve_settings_path(dir.path(), Some(&explicit)).unwrap(),
            explicit
        );
    }
}
