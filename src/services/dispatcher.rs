//! Per-note orchestration: gate, then rules, then move.

use serde::Serialize;

use super::notice::Notifier;
use super::vault::Vault;
use crate::execution::{MoveError, MoveExecutor, MoveOutcome};
use crate::models::{Note, Trigger};
use crate::rules::find_destination;
use crate::security::{skip_reason, SkipReason};
use crate::settings::RuleSnapshot;
use crate::utils::parent_folder;

/// What happened to one note
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum DispatchOutcome {
    /// Gate rejected the note
    Skipped { reason: SkipReason },
    /// No rule applies; the note stays put
    NoMatch,
    /// Matching rule points at the folder the note is already in
    AlreadyInPlace { path: String },
    Moved { from: String, to: String },
    /// The move was refused or failed; the source is untouched
    Failed {
        #[serde(serialize_with = "serialize_error")]
        error: MoveError,
    },
}

fn serialize_error<S: serde::Serializer>(error: &MoveError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}

/// Runs one note through gate -> evaluator -> executor
pub struct Dispatcher<'a> {
    vault: &'a Vault,
    snapshot: &'a RuleSnapshot,
    notifier: &'a dyn Notifier,
}

impl<'a> Dispatcher<'a> {
    pub fn new(vault: &'a Vault, snapshot: &'a RuleSnapshot, notifier: &'a dyn Notifier) -> Self {
        Self {
            vault,
            snapshot,
            notifier,
        }
    }

    /// Process a single note. Never fails: move errors are reported as an
    /// outcome and a notice so a sweep can carry on.
    pub fn process(&self, note: &Note, trigger: &Trigger) -> DispatchOutcome {
        if let Some(reason) = skip_reason(note, trigger, self.snapshot) {
            tracing::debug!("[Dispatcher] Skipping {}: {}", note.path, reason);
            return DispatchOutcome::Skipped { reason };
        }

        let Some(rule) = find_destination(note, &self.snapshot.rules) else {
            return DispatchOutcome::NoMatch;
        };

        let executor = MoveExecutor::new(self.vault);
        match executor.move_note(&rule.folder, &note.file_name(), note) {
            Ok(MoveOutcome::Moved { from, to }) => {
                self.notifier.notice(&format!(
                    "Moved the note \"{}\" to \"{}\".",
                    note.file_name(),
                    parent_folder(&to)
                ));
                DispatchOutcome::Moved { from, to }
            }
            Ok(MoveOutcome::AlreadyInPlace { path }) => DispatchOutcome::AlreadyInPlace { path },
            Err(error) => {
                tracing::warn!("[Dispatcher] Could not move {}: {}", note.path, error);
                self.notifier.notice(&failure_notice(note, &rule.folder, &error));
                DispatchOutcome::Failed { error }
            }
        }
    }
}

fn failure_notice(note: &Note, folder: &str, error: &MoveError) -> String {
    match error {
        MoveError::Conflict { path } => format!(
            "Error: A file with the same name \"{}\" exists at \"{}\". The note was not moved.",
            note.file_name(),
            path
        ),
        other => format!(
            "Error: Could not move \"{}\" to \"{}\": {}",
            note.file_name(),
            folder,
            other
        ),
    }
}
