pub mod gate;

pub use gate::{should_skip, skip_reason, SkipReason};

use crate::utils::normalize_path;

/// Security validator for vault paths
pub struct PathValidator;

impl PathValidator {
    /// Normalize a destination folder and make sure it stays inside the vault.
    ///
    /// Returns the normalized folder, or an error message when the folder
    /// uses `.`/`..` segments or a drive prefix.
    pub fn validate_destination(folder: &str) -> Result<String, String> {
        let normalized = normalize_path(folder);

        if normalized
            .split('/')
            .any(|segment| segment == ".." || segment == ".")
        {
            return Err(format!("Destination escapes the vault: {}", folder));
        }

        let first = normalized.split('/').next().unwrap_or_default();
        if first.len() == 2 && first.ends_with(':') {
            return Err(format!("Destination is not a vault path: {}", folder));
        }

        Ok(normalized)
    }

    /// Whether a vault path points into a hidden folder (e.g. `.obsidian`)
    pub fn is_protected_path(vault_path: &str) -> bool {
        normalize_path(vault_path)
            .split('/')
            .any(|segment| segment.starts_with('.') && segment.len() > 1)
    }
}
