use serde::{Deserialize, Serialize};

/// Where a note check came from.
///
/// Only `Command` checks may move anything; every other host activity is
/// passed through so the gate can reject it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerOrigin {
    /// Explicitly invoked by the user ("Move the note" / "Check all files")
    Command,
    /// Any other file-system event reported by the host (create, modify, rename)
    HostEvent,
}

/// A single request to check a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub origin: TriggerOrigin,
    /// Previous vault path when the check was caused by a rename/move
    pub old_path: Option<String>,
}

impl Trigger {
    /// A user-invoked check
    pub fn command() -> Self {
        Self {
            origin: TriggerOrigin::Command,
            old_path: None,
        }
    }

    /// A check caused by the note being renamed from `old_path`
    pub fn rename(origin: TriggerOrigin, old_path: impl Into<String>) -> Self {
        Self {
            origin,
            old_path: Some(old_path.into()),
        }
    }

    /// Any non-command host event
    pub fn host_event() -> Self {
        Self {
            origin: TriggerOrigin::HostEvent,
            old_path: None,
        }
    }

    pub fn is_command(&self) -> bool {
        self.origin == TriggerOrigin::Command
    }
}
