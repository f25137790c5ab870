//! Single-rule matching.

use regex::Regex;

use super::ast::{Criterion, Rule};
use crate::models::Note;

/// A rule's criterion, ready to test against notes
#[derive(Debug, Clone)]
pub enum RuleMatcher {
    /// Tag set contains exactly this tag
    TagExact(String),
    /// Some tag in the tag set matches this regex
    TagRegex(Regex),
    /// Basename matches this regex (unanchored search)
    Pattern(Regex),
    /// Never matches (misconfigured entry or regex that failed to compile)
    Inert,
}

/// A rule compiled against the current settings snapshot
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Position in the configured rule list
    pub index: usize,
    /// Destination folder as configured
    pub folder: String,
    pub matcher: RuleMatcher,
}

impl CompiledRule {
    /// Compile a rule. `use_regex_for_tags` switches tag rules to regex search.
    pub fn compile(index: usize, rule: &Rule, use_regex_for_tags: bool) -> Result<Self, regex::Error> {
        let matcher = match &rule.criterion {
            Criterion::Tag(tag) if use_regex_for_tags => RuleMatcher::TagRegex(Regex::new(tag)?),
            Criterion::Tag(tag) => RuleMatcher::TagExact(tag.clone()),
            Criterion::Pattern(pattern) => RuleMatcher::Pattern(Regex::new(pattern)?),
        };

        Ok(Self {
            index,
            folder: rule.folder.clone(),
            matcher,
        })
    }

    /// A placeholder that keeps the slot of an unusable rule
    pub fn inert(index: usize, folder: impl Into<String>) -> Self {
        Self {
            index,
            folder: folder.into(),
            matcher: RuleMatcher::Inert,
        }
    }

    pub fn is_inert(&self) -> bool {
        matches!(self.matcher, RuleMatcher::Inert)
    }
}

/// Does `note` satisfy `rule`?
pub fn matches(note: &Note, rule: &CompiledRule) -> bool {
    match &rule.matcher {
        RuleMatcher::TagExact(tag) => note.tags.iter().any(|t| t == tag),
        RuleMatcher::TagRegex(re) => note.tags.iter().any(|t| re.is_match(t)),
        RuleMatcher::Pattern(re) => re.is_match(&note.basename),
        RuleMatcher::Inert => false,
    }
}
