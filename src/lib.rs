//! Rule-driven note relocation for markdown vaults.
//!
//! A note is checked against an ordered list of rules (tag or filename
//! pattern); the first match decides the folder it is moved into. Notes in
//! excluded folders, notes that opt out through their frontmatter and any
//! check that was not explicitly requested by the user are left alone.

pub mod commands;
pub mod execution;
pub mod models;
pub mod notes;
pub mod rules;
pub mod security;
pub mod services;
pub mod settings;
pub mod utils;

pub use commands::{check_all_files, move_the_note, SweepReport};
pub use models::{Note, Trigger, TriggerOrigin};
pub use services::{DispatchOutcome, Dispatcher, Notifier, Vault};
pub use settings::{RuleSnapshot, Settings};
