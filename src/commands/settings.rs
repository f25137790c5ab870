use serde::Serialize;
use std::path::Path;

use crate::rules::{Criterion, Rule};
use crate::settings::{
    load_settings, save_settings, IssueSource, RuleSnapshot, Settings, SettingsError,
};

/// Which regex flag to toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexTarget {
    Tags,
    ExcludedFolders,
}

/// One row of `rules list`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRow {
    pub position: usize,
    pub folder: String,
    pub kind: String,
    pub value: String,
    /// Why the row is ignored, if it is
    pub problem: Option<String>,
}

/// Write default settings unless the file already exists
pub fn init_settings(path: &Path) -> Result<bool, SettingsError> {
    if path.exists() {
        tracing::info!("[Settings] {} already exists, leaving it alone", path.display());
        return Ok(false);
    }
    save_settings(path, &Settings::default())?;
    Ok(true)
}

/// Append a rule at the end of the list (lowest priority)
pub fn add_rule(path: &Path, rule: &Rule) -> Result<Settings, SettingsError> {
    let mut settings = load_settings(path)?;
    match &rule.criterion {
        Criterion::Tag(tag) => settings.add_tag_rule(&rule.folder, tag),
        Criterion::Pattern(pattern) => settings.add_pattern_rule(&rule.folder, pattern),
    }
    save_settings(path, &settings)?;
    Ok(settings)
}

pub fn add_excluded_folder(path: &Path, folder: &str) -> Result<Settings, SettingsError> {
    let mut settings = load_settings(path)?;
    settings.add_excluded_folder(folder);
    save_settings(path, &settings)?;
    Ok(settings)
}

pub fn set_regex_mode(
    path: &Path,
    target: RegexTarget,
    enabled: bool,
) -> Result<Settings, SettingsError> {
    let mut settings = load_settings(path)?;
    match target {
        RegexTarget::Tags => settings.use_regex_to_check_for_tags = enabled,
        RegexTarget::ExcludedFolders => settings.use_regex_to_check_for_excluded_folder = enabled,
    }
    save_settings(path, &settings)?;
    Ok(settings)
}

/// Rules in evaluation order, annotated with any configuration problem
pub fn list_rules(settings: &Settings) -> Vec<RuleRow> {
    let (_, issues) = RuleSnapshot::compile(settings);

    settings
        .folder_tag_pattern
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let tag = entry.tag.as_deref().filter(|t| !t.is_empty());
            let pattern = entry.pattern.as_deref().filter(|p| !p.is_empty());
            let (kind, value) = match (tag, pattern) {
                (Some(tag), None) => ("tag", tag),
                (None, Some(pattern)) => ("pattern", pattern),
                _ => ("-", ""),
            };

            let problem = issues
                .iter()
                .find(|issue| issue.source == IssueSource::Rule(index))
                .map(|issue| issue.message.clone());

            RuleRow {
                position: index + 1,
                folder: entry.folder.clone(),
                kind: kind.to_string(),
                value: value.to_string(),
                problem,
            }
        })
        .collect()
}
