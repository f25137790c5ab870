//! Rule-based note matching.
//!
//! Rules are evaluated in configured order and the first one that matches
//! decides the destination folder. Two kinds of rule exist:
//! - tag rules: `#proj` -> `Projects` (exact, or regex when enabled)
//! - pattern rules: `^\d{4}-\d{2}-\d{2}$` -> `Daily` (regex over the basename)

pub mod ast;
pub mod evaluator;
pub mod matcher;

pub use ast::*;
pub use evaluator::*;
pub use matcher::*;
