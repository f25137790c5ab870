//! Immutable view of the settings used for one command invocation.
//!
//! Raw entries are validated and every regex is compiled exactly once here.
//! Anything unusable becomes inert and is reported as a [`ConfigIssue`]
//! instead of failing the whole run.

use regex::Regex;
use std::fmt;

use super::schema::Settings;
use crate::rules::{CompiledRule, Rule};
use crate::utils::normalize_path;

/// Where in the settings a problem was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSource {
    Rule(usize),
    ExcludedFolder(usize),
}

/// A settings entry that was disabled while building the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub source: IssueSource,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            IssueSource::Rule(i) => write!(f, "Rule #{} ignored: {}", i + 1, self.message),
            IssueSource::ExcludedFolder(i) => {
                write!(f, "Excluded folder #{} ignored: {}", i + 1, self.message)
            }
        }
    }
}

/// A compiled excluded-folder entry
#[derive(Debug, Clone)]
pub enum FolderExclusion {
    /// Normalized folder path compared for equality
    Exact(String),
    /// Regex searched in the note's folder path
    Regex(Regex),
}

impl FolderExclusion {
    pub fn matches(&self, folder: &str) -> bool {
        match self {
            FolderExclusion::Exact(path) => path == folder,
            FolderExclusion::Regex(re) => re.is_match(folder),
        }
    }
}

/// Everything the gate and the evaluator need, fixed for one invocation
#[derive(Debug, Clone, Default)]
pub struct RuleSnapshot {
    pub rules: Vec<CompiledRule>,
    pub exclusions: Vec<FolderExclusion>,
    pub use_regex_for_tags: bool,
    pub use_regex_for_excluded_folders: bool,
}

impl RuleSnapshot {
    /// Compile `settings` into a snapshot plus the issues found on the way
    pub fn compile(settings: &Settings) -> (Self, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let use_regex_for_tags = settings.use_regex_to_check_for_tags;
        let use_regex_for_excluded_folders = settings.use_regex_to_check_for_excluded_folder;

        let rules = settings
            .folder_tag_pattern
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let rule = match Rule::from_parts(
                    &entry.folder,
                    entry.tag.as_deref(),
                    entry.pattern.as_deref(),
                ) {
                    Ok(rule) => rule,
                    Err(reason) => {
                        // A blank row is how an empty rule list looks on disk; not worth a warning
                        let blank = entry.folder.is_empty()
                            && entry.tag.as_deref().unwrap_or("").is_empty()
                            && entry.pattern.as_deref().unwrap_or("").is_empty();
                        if !blank {
                            issues.push(ConfigIssue {
                                source: IssueSource::Rule(index),
                                message: reason.to_string(),
                            });
                        }
                        return CompiledRule::inert(index, entry.folder.clone());
                    }
                };

                CompiledRule::compile(index, &rule, use_regex_for_tags).unwrap_or_else(|e| {
                    issues.push(ConfigIssue {
                        source: IssueSource::Rule(index),
                        message: format!(
                            "invalid {} regex '{}': {}",
                            rule.criterion.kind(),
                            rule.criterion.source(),
                            e
                        ),
                    });
                    CompiledRule::inert(index, rule.folder.clone())
                })
            })
            .collect();

        let mut exclusions = Vec::new();
        for (index, entry) in settings.excluded_folder.iter().enumerate() {
            if entry.folder.is_empty() {
                continue;
            }

            if use_regex_for_excluded_folders {
                match Regex::new(&entry.folder) {
                    Ok(re) => exclusions.push(FolderExclusion::Regex(re)),
                    Err(e) => issues.push(ConfigIssue {
                        source: IssueSource::ExcludedFolder(index),
                        message: format!("invalid regex '{}': {}", entry.folder, e),
                    }),
                }
            } else {
                exclusions.push(FolderExclusion::Exact(normalize_path(&entry.folder)));
            }
        }

        for issue in &issues {
            tracing::warn!("[Settings] {}", issue);
        }

        (
            Self {
                rules,
                exclusions,
                use_regex_for_tags,
                use_regex_for_excluded_folders,
            },
            issues,
        )
    }

    /// First exclusion matching `folder`, if any
    pub fn excluding(&self, folder: &str) -> Option<&FolderExclusion> {
        self.exclusions.iter().find(|ex| ex.matches(folder))
    }
}
