//! Move Executor
//!
//! Relocates a note into a destination folder. Missing folders are created,
//! and an occupied destination is never overwritten: the move is refused and
//! the source stays where it is.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::models::Note;
use crate::security::PathValidator;
use crate::services::Vault;
use crate::utils::join_path;

/// Successful result of a move request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum MoveOutcome {
    /// The note was relocated
    Moved { from: String, to: String },
    /// The note already lives at the destination
    AlreadyInPlace { path: String },
}

/// Why a move was not performed
#[derive(Debug, Error)]
pub enum MoveError {
    /// A file with the same name already exists at the destination
    #[error("Destination already exists: {path}")]
    Conflict { path: String },

    /// The destination folder path is taken by a file
    #[error("Destination folder is a file: {0}")]
    NotAFolder(String),

    /// The destination folder is not a usable vault path
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    /// The source note disappeared before the move
    #[error("Source not found: {0}")]
    SourceMissing(String),

    #[error("Failed to move {from} to {to}: {source}")]
    Io {
        from: String,
        to: String,
        source: io::Error,
    },
}

/// Performs note relocations inside one vault
pub struct MoveExecutor<'a> {
    vault: &'a Vault,
}

impl<'a> MoveExecutor<'a> {
    pub fn new(vault: &'a Vault) -> Self {
        Self { vault }
    }

    /// Move `note` to `destination_folder/file_name`
    pub fn move_note(
        &self,
        destination_folder: &str,
        file_name: &str,
        note: &Note,
    ) -> Result<MoveOutcome, MoveError> {
        let folder = PathValidator::validate_destination(destination_folder)
            .map_err(MoveError::InvalidDestination)?;
        if PathValidator::is_protected_path(&folder) {
            return Err(MoveError::InvalidDestination(format!(
                "Cannot move into hidden folder: {}",
                folder
            )));
        }

        let new_path = join_path(&folder, file_name);
        if new_path == note.path {
            tracing::debug!("[Executor] {} already in {}", note.path, folder);
            return Ok(MoveOutcome::AlreadyInPlace { path: new_path });
        }

        let source = self.vault.absolute(&note.path);
        let destination = self.vault.absolute(&new_path);

        if !source.is_file() {
            return Err(MoveError::SourceMissing(note.path.clone()));
        }

        if destination.exists() {
            return Err(MoveError::Conflict { path: new_path });
        }

        let io_error = |source: io::Error| MoveError::Io {
            from: note.path.clone(),
            to: new_path.clone(),
            source,
        };

        if folder != "/" {
            let folder_abs = self.vault.absolute(&folder);
            if folder_abs.exists() && !folder_abs.is_dir() {
                return Err(MoveError::NotAFolder(folder));
            }
            if !folder_abs.exists() {
                fs::create_dir_all(&folder_abs).map_err(io_error)?;
                tracing::info!("[Executor] Created folder {}", folder);
            }
        }

        rename_or_copy(&source, &destination).map_err(io_error)?;

        tracing::info!("[Executor] Moved {} -> {}", note.path, new_path);
        Ok(MoveOutcome::Moved {
            from: note.path.clone(),
            to: new_path,
        })
    }
}

/// Rename, falling back to copy + delete when rename fails (e.g. across devices)
fn rename_or_copy(source: &Path, destination: &Path) -> io::Result<()> {
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }

    fs::copy(source, destination)?;
    if let Err(e) = fs::remove_file(source) {
        // Leave exactly one copy behind
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    Ok(())
}
