use serde::Serialize;
use thiserror::Error;

use crate::models::Trigger;
use crate::services::{DispatchOutcome, Dispatcher, Notifier, Vault, VaultError};
use crate::settings::{ConfigIssue, RuleSnapshot};

/// Notice shown when "Move the note" hits an opted-out note
pub const DISABLED_NOTICE: &str = "Auto Note Mover is disabled in the frontmatter.";

/// Errors that stop a command before any note is processed
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// Per-note failure collected during a sweep
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFailure {
    pub path: String,
    pub error: String,
}

/// Summary of a "Check all files" run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Notes found in the vault
    pub checked: usize,
    pub moved: usize,
    /// Gated out, disabled notes included
    pub skipped: usize,
    /// No rule matched, or already in the matching folder
    pub unchanged: usize,
    pub failed: usize,
    pub failures: Vec<NoteFailure>,
}

impl SweepReport {
    fn record(&mut self, path: &str, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Moved { .. } => self.moved += 1,
            DispatchOutcome::Skipped { .. } => self.skipped += 1,
            DispatchOutcome::NoMatch | DispatchOutcome::AlreadyInPlace { .. } => {
                self.unchanged += 1
            }
            DispatchOutcome::Failed { error } => self.fail(path, error.to_string()),
        }
    }

    fn fail(&mut self, path: &str, error: String) {
        self.failed += 1;
        self.failures.push(NoteFailure {
            path: path.to_string(),
            error,
        });
    }
}

/// Show each settings problem once per invocation
pub fn report_config_issues(issues: &[ConfigIssue], notifier: &dyn Notifier) {
    for issue in issues {
        notifier.notice(&format!("Settings: {}", issue));
    }
}

/// "Move the note": check the focused note and move it if a rule matches
pub fn move_the_note(
    vault: &Vault,
    snapshot: &RuleSnapshot,
    note_path: &str,
    notifier: &dyn Notifier,
) -> Result<DispatchOutcome, CommandError> {
    let note = vault.load_note(note_path)?;

    if note.is_disabled() {
        notifier.notice(DISABLED_NOTICE);
        return Ok(DispatchOutcome::Skipped {
            reason: crate::security::SkipReason::Disabled,
        });
    }

    let dispatcher = Dispatcher::new(vault, snapshot, notifier);
    Ok(dispatcher.process(&note, &Trigger::command()))
}

/// "Check all files": sweep every note in vault order.
///
/// Notes are handled one at a time; a failure on one note is recorded and
/// the sweep moves on.
pub fn check_all_files(
    vault: &Vault,
    snapshot: &RuleSnapshot,
    notifier: &dyn Notifier,
) -> Result<SweepReport, CommandError> {
    let files = vault.markdown_files()?;
    let dispatcher = Dispatcher::new(vault, snapshot, notifier);
    let mut report = SweepReport::default();

    tracing::info!("[Sweep] Checking {} notes", files.len());

    for path in files {
        report.checked += 1;

        let note = match vault.load_note(&path) {
            Ok(note) => note,
            Err(e) => {
                tracing::warn!("[Sweep] Could not read {}: {}", path, e);
                report.fail(&path, e.to_string());
                continue;
            }
        };

        if note.is_disabled() {
            report.skipped += 1;
            continue;
        }

        let outcome = dispatcher.process(&note, &Trigger::command());
        report.record(&path, &outcome);
    }

    tracing::info!(
        "[Sweep] Done: {} checked, {} moved, {} skipped, {} unchanged, {} failed",
        report.checked,
        report.moved,
        report.skipped,
        report.unchanged,
        report.failed
    );

    Ok(report)
}
