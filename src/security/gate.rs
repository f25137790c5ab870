//! Gate checks run before any rule is evaluated.
//!
//! A note is left alone when the check was not user-invoked, when it only
//! moved without changing its name, when it sits in an excluded folder, or
//! when its frontmatter opts it out.

use serde::Serialize;
use std::fmt;

use crate::models::{Note, Trigger};
use crate::settings::RuleSnapshot;
use crate::utils::file_name;

/// Why a note was not evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum SkipReason {
    /// Check came from host activity, not an explicit command
    NotCommand,
    /// Rename/move event that kept the same file name
    NameUnchanged,
    /// Note's folder matches an excluded-folder entry
    ExcludedFolder(String),
    /// Frontmatter carries the disable marker
    Disabled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotCommand => write!(f, "not triggered by a command"),
            SkipReason::NameUnchanged => write!(f, "file name unchanged by rename"),
            SkipReason::ExcludedFolder(folder) => write!(f, "folder '{}' is excluded", folder),
            SkipReason::Disabled => write!(f, "disabled in frontmatter"),
        }
    }
}

/// First reason to skip `note`, or None when it should be evaluated
pub fn skip_reason(note: &Note, trigger: &Trigger, snapshot: &RuleSnapshot) -> Option<SkipReason> {
    if !trigger.is_command() {
        return Some(SkipReason::NotCommand);
    }

    if let Some(old_path) = trigger.old_path.as_deref() {
        if file_name(old_path) == note.file_name() {
            return Some(SkipReason::NameUnchanged);
        }
    }

    let folder = note.folder();
    if snapshot.excluding(&folder).is_some() {
        return Some(SkipReason::ExcludedFolder(folder));
    }

    if note.is_disabled() {
        return Some(SkipReason::Disabled);
    }

    None
}

/// Whether `note` is exempt from processing for this trigger
pub fn should_skip(note: &Note, trigger: &Trigger, snapshot: &RuleSnapshot) -> bool {
    skip_reason(note, trigger, snapshot).is_some()
}
