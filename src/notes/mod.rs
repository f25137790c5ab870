//! Note metadata: YAML frontmatter, tags and the disable marker.
//!
//! Recomputed from file content on every check; no cache is kept between
//! invocations.

pub mod frontmatter;

pub use frontmatter::{parse_note, Frontmatter, ParsedNote, DISABLE_KEY, DISABLE_VALUE};
