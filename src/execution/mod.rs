//! Execution Engine Module
//!
//! Performs the single file-tree mutation this crate makes: moving a note
//! into its destination folder.

pub mod executor;

pub use executor::*;
