use serde::Serialize;

use crate::notes::frontmatter::{self, Frontmatter};
use crate::utils::{normalize_path, parent_folder};

/// A note as seen by one evaluation pass.
///
/// Built fresh from the file on disk each time it is checked; nothing here
/// outlives a single command invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Vault-relative path, normalized (e.g. "Inbox/idea.md")
    pub path: String,
    /// File name without extension
    pub basename: String,
    /// File extension (without dot)
    pub extension: String,
    /// Parsed YAML frontmatter, None when the note has no frontmatter block
    #[serde(skip)]
    pub frontmatter: Option<Frontmatter>,
    /// Frontmatter and inline tags, `#`-prefixed, deduplicated, first-seen order
    pub tags: Vec<String>,
}

impl Note {
    /// Create a note from its vault path and already-extracted metadata
    pub fn new(path: &str, frontmatter: Option<Frontmatter>, tags: Vec<String>) -> Self {
        let path = normalize_path(path);
        let name = crate::utils::file_name(&path).to_string();
        let (basename, extension) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
            _ => (name.clone(), String::new()),
        };

        Self {
            path,
            basename,
            extension,
            frontmatter,
            tags,
        }
    }

    /// Build a note from raw markdown content
    pub fn from_content(path: &str, content: &str) -> Self {
        let parsed = frontmatter::parse_note(content);
        Self::new(path, parsed.frontmatter, parsed.tags)
    }

    /// File name with extension ("idea.md")
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.basename.clone()
        } else {
            format!("{}.{}", self.basename, self.extension)
        }
    }

    /// Containing folder path, `/` for the vault root
    pub fn folder(&self) -> String {
        parent_folder(&self.path)
    }

    /// Whether the frontmatter carries the disable marker
    pub fn is_disabled(&self) -> bool {
        self.frontmatter
            .as_ref()
            .map(frontmatter::is_disabled)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_parts() {
        let note = Note::new("Inbox/idea.md", None, vec![]);
        assert_eq!(note.path, "Inbox/idea.md");
        assert_eq!(note.basename, "idea");
        assert_eq!(note.extension, "md");
        assert_eq!(note.file_name(), "idea.md");
        assert_eq!(note.folder(), "Inbox");
    }

    #[test]
    fn test_note_at_vault_root() {
        let note = Note::new("/scratch.md", None, vec![]);
        assert_eq!(note.path, "scratch.md");
        assert_eq!(note.folder(), "/");
    }

    #[test]
    fn test_dotted_basename_keeps_inner_dots() {
        let note = Note::new("2024.01.02 log.md", None, vec![]);
        assert_eq!(note.basename, "2024.01.02 log");
        assert_eq!(note.extension, "md");
    }

    #[test]
    fn test_from_content_disabled() {
        let note = Note::from_content(
            "idea.md",
            "---\nAutoNoteMover: disable\ntags: [proj]\n---\nbody #inline\n",
        );
        assert!(note.is_disabled());
        assert_eq!(note.tags, vec!["#proj", "#inline"]);
    }

    #[test]
    fn test_no_frontmatter_not_disabled() {
        let note = Note::from_content("idea.md", "just text");
        assert!(note.frontmatter.is_none());
        assert!(!note.is_disabled());
    }
}
