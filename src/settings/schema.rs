use serde::{Deserialize, Serialize};

/// One entry of `folder_tag_pattern` as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    #[serde(default)]
    pub folder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// One entry of `excluded_folder` as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedFolderEntry {
    #[serde(default)]
    pub folder: String,
}

/// Persisted plugin settings.
///
/// Missing keys fall back to defaults and unknown keys are ignored, so
/// settings written by older or newer versions still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ordered rule list; order decides which rule wins
    pub folder_tag_pattern: Vec<RuleEntry>,
    pub excluded_folder: Vec<ExcludedFolderEntry>,
    pub use_regex_to_check_for_tags: bool,
    pub use_regex_to_check_for_excluded_folder: bool,
}

impl Settings {
    /// Parse settings JSON, merging over defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn add_tag_rule(&mut self, folder: &str, tag: &str) {
        self.folder_tag_pattern.push(RuleEntry {
            folder: folder.to_string(),
            tag: Some(tag.to_string()),
            pattern: None,
        });
    }

    pub fn add_pattern_rule(&mut self, folder: &str, pattern: &str) {
        self.folder_tag_pattern.push(RuleEntry {
            folder: folder.to_string(),
            tag: None,
            pattern: Some(pattern.to_string()),
        });
    }

    pub fn add_excluded_folder(&mut self, folder: &str) {
        self.excluded_folder.push(ExcludedFolderEntry {
            folder: folder.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_with_defaults() {
        let settings = Settings::from_json(r#"{"use_regex_to_check_for_tags": true}"#).unwrap();
        assert!(settings.use_regex_to_check_for_tags);
        assert!(!settings.use_regex_to_check_for_excluded_folder);
        assert!(settings.folder_tag_pattern.is_empty());
        assert!(settings.excluded_folder.is_empty());
    }

    #[test]
    fn test_reads_host_settings_shape() {
        let json = r##"{
            "trigger_auto_manual": "Manual",
            "folder_tag_pattern": [
                {"folder": "Projects", "tag": "#proj", "pattern": ""},
                {"folder": "Misc", "tag": "", "pattern": ".*"}
            ],
            "excluded_folder": [{"folder": "Archive"}],
            "use_regex_to_check_for_excluded_folder": false
        }"##;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.folder_tag_pattern.len(), 2);
        assert_eq!(settings.folder_tag_pattern[0].tag.as_deref(), Some("#proj"));
        assert_eq!(settings.folder_tag_pattern[1].pattern.as_deref(), Some(".*"));
        assert_eq!(settings.excluded_folder[0].folder, "Archive");
    }

    #[test]
    fn test_null_fields_and_empty_input() {
        let settings =
            Settings::from_json(r#"{"folder_tag_pattern": [{"folder": "A", "tag": null}]}"#).unwrap();
        assert_eq!(settings.folder_tag_pattern[0].tag, None);
        assert_eq!(Settings::from_json("  ").unwrap(), Settings::default());
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let mut settings = Settings::default();
        settings.add_tag_rule("Projects", "#proj");
        settings.add_pattern_rule("Misc", ".*");
        settings.add_excluded_folder("Archive");

        let loaded = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(loaded, settings);
    }
}
