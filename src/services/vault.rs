//! Directory-backed vault.
//!
//! Maps vault-relative `/` paths onto a root directory, enumerates the
//! markdown notes in it and loads them with fresh metadata.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::models::Note;
use crate::utils::normalize_path;

/// Errors raised while reading notes from the vault
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Vault root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Not a markdown note: {0}")]
    NotMarkdown(String),

    #[error("Path is outside the vault: {0}")]
    OutsideVault(String),

    #[error("Failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
}

/// A vault rooted at a directory
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Open the vault rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(VaultError::NotADirectory(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute filesystem path for a vault path (`/` is the root)
    pub fn absolute(&self, vault_path: &str) -> PathBuf {
        let normalized = normalize_path(vault_path);
        if normalized == "/" {
            return self.root.clone();
        }
        normalized
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    /// Vault path for a filesystem path, absolute or relative to the vault root
    pub fn relative(&self, path: &Path) -> Result<String, VaultError> {
        let outside = || VaultError::OutsideVault(path.display().to_string());

        let rel = if path.is_absolute() {
            let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
            let abs = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            abs.strip_prefix(&root).map_err(|_| outside())?.to_path_buf()
        } else {
            path.to_path_buf()
        };

        let mut segments = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().to_string()),
                Component::CurDir => {}
                _ => return Err(outside()),
            }
        }

        Ok(normalize_path(&segments.join("/")))
    }

    pub fn is_file(&self, vault_path: &str) -> bool {
        self.absolute(vault_path).is_file()
    }

    pub fn is_folder(&self, vault_path: &str) -> bool {
        self.absolute(vault_path).is_dir()
    }

    pub fn exists(&self, vault_path: &str) -> bool {
        self.absolute(vault_path).exists()
    }

    /// All markdown notes, sorted by vault path. Hidden entries are skipped.
    pub fn markdown_files(&self) -> Result<Vec<String>, VaultError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| VaultError::Io {
                path: e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop")),
            })?;

            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }

            files.push(self.relative_to_root(entry.path()));
        }

        files.sort();
        Ok(files)
    }

    /// Read a note and derive its frontmatter and tags
    pub fn load_note(&self, vault_path: &str) -> Result<Note, VaultError> {
        let vault_path = normalize_path(vault_path);
        if vault_path
            .split('/')
            .any(|segment| segment == ".." || segment == ".")
        {
            return Err(VaultError::OutsideVault(vault_path));
        }
        let abs = self.absolute(&vault_path);

        if !is_markdown(&abs) {
            return Err(VaultError::NotMarkdown(vault_path));
        }

        let content = match fs::read_to_string(&abs) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(VaultError::NotFound(vault_path))
            }
            Err(source) => {
                return Err(VaultError::Io {
                    path: vault_path,
                    source,
                })
            }
        };

        Ok(Note::from_content(&vault_path, &content))
    }

    fn relative_to_root(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let joined = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<String>>()
            .join("/");
        normalize_path(&joined)
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension().map(|e| e == "md").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_markdown_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("b.md"), "content").unwrap();
        fs::write(root.join("a.md"), "content").unwrap();
        fs::write(root.join("image.png"), "png").unwrap();
        fs::create_dir_all(root.join("ideas")).unwrap();
        fs::write(root.join("ideas/idea1.md"), "content").unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::write(root.join(".obsidian/workspace.md"), "hidden").unwrap();

        let vault = Vault::open(root).unwrap();
        let files = vault.markdown_files().unwrap();
        assert_eq!(files, vec!["a.md", "b.md", "ideas/idea1.md"]);
    }

    #[test]
    fn test_absolute_and_relative() {
        let dir = tempdir().unwrap();
        let vault = Vault::open(dir.path()).unwrap();

        assert_eq!(vault.absolute("/"), dir.path());
        assert_eq!(vault.absolute("a/b.md"), dir.path().join("a").join("b.md"));
        assert_eq!(vault.relative(Path::new("a/./b.md")).unwrap(), "a/b.md");
        assert!(matches!(
            vault.relative(Path::new("../escape.md")),
            Err(VaultError::OutsideVault(_))
        ));

        fs::write(dir.path().join("x.md"), "").unwrap();
        assert_eq!(vault.relative(&dir.path().join("x.md")).unwrap(), "x.md");
    }

    #[test]
    fn test_load_note() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Inbox")).unwrap();
        fs::write(
            dir.path().join("Inbox/idea.md"),
            "---\ntags: [proj]\n---\nSee #later",
        )
        .unwrap();

        let vault = Vault::open(dir.path()).unwrap();
        let note = vault.load_note("Inbox/idea.md").unwrap();
        assert_eq!(note.folder(), "Inbox");
        assert_eq!(note.tags, vec!["#proj", "#later"]);

        assert!(matches!(vault.load_note("missing.md"), Err(VaultError::NotFound(_))));
        assert!(matches!(vault.load_note("image.png"), Err(VaultError::NotMarkdown(_))));
    }

    #[test]
    fn test_load_note_stays_inside_vault() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("secret.md"), "#proj").unwrap();
        fs::create_dir_all(dir.path().join("vault/Inbox")).unwrap();

        let vault = Vault::open(dir.path().join("vault")).unwrap();
        assert!(matches!(
            vault.load_note("../secret.md"),
            Err(VaultError::OutsideVault(_))
        ));
        assert!(matches!(
            vault.load_note("Inbox/../../secret.md"),
            Err(VaultError::OutsideVault(_))
        ));
        assert!(matches!(
            vault.load_note("./Inbox/idea.md"),
            Err(VaultError::OutsideVault(_))
        ));
    }

    #[test]
    fn test_open_requires_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.md");
        fs::write(&file, "").unwrap();
        assert!(matches!(Vault::open(&file), Err(VaultError::NotADirectory(_))));
    }
}
