//! Shared utility functions
//!
//! Vault path helpers used across the rule, gate and move modules.

/// Normalize a vault-relative path.
///
/// Backslashes become `/`, repeated separators collapse, leading and
/// trailing separators are dropped and non-breaking spaces become plain
/// spaces. The vault root normalizes to `/`.
///
/// Examples: `"Projects//2024/"` -> `"Projects/2024"`, `""` -> `"/"`
pub fn normalize_path(path: &str) -> String {
    let cleaned: String = path
        .chars()
        .map(|c| match c {
            '\\' => '/',
            '\u{00A0}' | '\u{202F}' => ' ',
            other => other,
        })
        .collect();

    let joined = cleaned
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<&str>>()
        .join("/");

    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Parent folder of a normalized vault path (`/` for top-level notes)
pub fn parent_folder(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent.to_string(),
        _ => "/".to_string(),
    }
}

/// Last segment of a vault path
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Join a folder and a file name into a normalized vault path
pub fn join_path(folder: &str, name: &str) -> String {
    normalize_path(&format!("{}/{}", folder, name))
}
