//! Transient user-visible notices.

use std::cell::RefCell;

/// Prefix shown on every notice
pub const NOTICE_PREFIX: &str = "[Auto Note Mover]";

/// Channel for short messages shown to the user
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// Prints notices to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notice(&self, message: &str) {
        eprintln!("{} {}", NOTICE_PREFIX, message);
    }
}

/// Keeps notices in memory; used by tests and by callers that render them later
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(needle))
    }
}

impl Notifier for RecordingNotifier {
    fn notice(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
