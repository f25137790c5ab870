//! Rule types.
//!
//! A rule pairs one match criterion with a destination folder. The two
//! criteria are mutually exclusive, so a rule is either a tag rule or a
//! filename-pattern rule and never both.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a rule matches on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Criterion {
    /// Note carries this tag (exact, or regex when tag-regex mode is on)
    Tag(String),
    /// Note basename matches this regex (unanchored)
    Pattern(String),
}

impl Criterion {
    /// Short label used in logs and listings
    pub fn kind(&self) -> &'static str {
        match self {
            Criterion::Tag(_) => "tag",
            Criterion::Pattern(_) => "pattern",
        }
    }

    /// The configured tag or pattern text
    pub fn source(&self) -> &str {
        match self {
            Criterion::Tag(s) | Criterion::Pattern(s) => s,
        }
    }
}

/// A configured rule: criterion -> destination folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Destination folder (vault-relative)
    pub folder: String,
    pub criterion: Criterion,
}

/// Why a configured entry could not become a [`Rule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InertReason {
    /// Neither a tag nor a pattern is set
    NoCriterion,
    /// Both a tag and a pattern are set
    BothCriteria,
    /// No destination folder given
    NoFolder,
}

impl fmt::Display for InertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InertReason::NoCriterion => write!(f, "neither tag nor pattern is set"),
            InertReason::BothCriteria => write!(f, "both tag and pattern are set"),
            InertReason::NoFolder => write!(f, "no destination folder is set"),
        }
    }
}

impl Rule {
    pub fn tag(folder: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            criterion: Criterion::Tag(tag.into()),
        }
    }

    pub fn pattern(folder: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            criterion: Criterion::Pattern(pattern.into()),
        }
    }

    /// Build a rule from the optional-field settings shape.
    ///
    /// Empty strings count as unset. Exactly one of `tag`/`pattern` must be
    /// present; otherwise the entry is inert.
    pub fn from_parts(
        folder: &str,
        tag: Option<&str>,
        pattern: Option<&str>,
    ) -> Result<Self, InertReason> {
        let tag = tag.filter(|t| !t.is_empty());
        let pattern = pattern.filter(|p| !p.is_empty());

        if folder.trim().is_empty() {
            return Err(InertReason::NoFolder);
        }

        match (tag, pattern) {
            (Some(tag), None) => Ok(Self::tag(folder, tag)),
            (None, Some(pattern)) => Ok(Self::pattern(folder, pattern)),
            (Some(_), Some(_)) => Err(InertReason::BothCriteria),
            (None, None) => Err(InertReason::NoCriterion),
        }
    }
}
