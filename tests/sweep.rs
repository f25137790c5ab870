use std::fs;
use std::path::Path;

use note_mover_lib::commands::{check_all_files, move_the_note, report_config_issues};
use note_mover_lib::services::{DispatchOutcome, RecordingNotifier, Vault};
use note_mover_lib::settings::{load_settings, save_settings, RuleSnapshot, Settings};
use tempfile::tempdir;

fn write(root: &Path, path: &str, content: &str) {
    let abs = root.join(path);
    fs::create_dir_all(abs.parent().unwrap()).unwrap();
    fs::write(abs, content).unwrap();
}

const SETTINGS_JSON: &str = r##"{
  "folder_tag_pattern": [
    { "folder": "Projects", "tag": "#proj", "pattern": "" },
    { "folder": "Misc", "tag": "", "pattern": ".*" }
  ],
  "excluded_folder": [{ "folder": "Archive" }],
  "use_regex_to_check_for_tags": false,
  "use_regex_to_check_for_excluded_folder": false,
  "statusBar_trigger_indicator": true
}"##;

#[test]
fn sweep_with_vault_settings() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".obsidian/plugins/auto-note-mover/data.json", SETTINGS_JSON);
    write(root, "idea.md", "Some text #proj");
    write(root, "scratch.md", "plain");
    write(root, "Archive/old.md", "#proj");
    write(
        root,
        "keep.md",
        "---\nAutoNoteMover: disable\ntags: [proj]\n---\nbody",
    );

    let settings_path = note_mover_lib::settings::resolve_settings_path(root, None).unwrap();
    assert!(settings_path.starts_with(root));

    let settings = load_settings(&settings_path).unwrap();
    let (snapshot, issues) = RuleSnapshot::compile(&settings);
    assert!(issues.is_empty());

    let vault = Vault::open(root).unwrap();
    let notifier = RecordingNotifier::new();
    let report = check_all_files(&vault, &snapshot, &notifier).unwrap();

    assert_eq!(report.checked, 4);
    assert_eq!(report.moved, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.failed, 0);

    // First matching rule wins: the tagged note goes to Projects, not Misc
    assert!(root.join("Projects/idea.md").exists());
    assert!(root.join("Misc/scratch.md").exists());
    assert!(root.join("Archive/old.md").exists());
    assert!(root.join("keep.md").exists());
    assert!(!root.join(".obsidian/plugins/auto-note-mover/Misc").exists());
}

#[test]
fn second_sweep_changes_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "idea.md", "#proj");
    write(root, "scratch.md", "plain");

    let settings = Settings::from_json(SETTINGS_JSON).unwrap();
    let (snapshot, _) = RuleSnapshot::compile(&settings);
    let vault = Vault::open(root).unwrap();

    let first = check_all_files(&vault, &snapshot, &RecordingNotifier::new()).unwrap();
    assert_eq!(first.moved, 2);

    let notifier = RecordingNotifier::new();
    let second = check_all_files(&vault, &snapshot, &notifier).unwrap();
    assert_eq!(second.moved, 0);
    assert_eq!(second.unchanged, 2);
    assert!(notifier.messages().is_empty());
}

#[test]
fn move_creates_nested_destination() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "Inbox/2024-03-01.md", "journal");

    let mut settings = Settings::default();
    settings.add_pattern_rule("Journal/2024/03", r"^2024-03-\d{2}$");
    let (snapshot, _) = RuleSnapshot::compile(&settings);
    let vault = Vault::open(root).unwrap();
    let notifier = RecordingNotifier::new();

    let outcome = move_the_note(&vault, &snapshot, "Inbox/2024-03-01.md", &notifier).unwrap();

    match outcome {
        DispatchOutcome::Moved { from, to } => {
            assert_eq!(from, "Inbox/2024-03-01.md");
            assert_eq!(to, "Journal/2024/03/2024-03-01.md");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(root.join("Journal/2024/03/2024-03-01.md")).unwrap(),
        "journal"
    );
    assert!(!root.join("Inbox/2024-03-01.md").exists());
}

#[test]
fn conflict_keeps_both_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "idea.md", "new #proj");
    write(root, "Projects/idea.md", "old");

    let settings = Settings::from_json(SETTINGS_JSON).unwrap();
    let (snapshot, _) = RuleSnapshot::compile(&settings);
    let vault = Vault::open(root).unwrap();
    let notifier = RecordingNotifier::new();

    let outcome = move_the_note(&vault, &snapshot, "idea.md", &notifier).unwrap();

    assert!(matches!(outcome, DispatchOutcome::Failed { .. }));
    assert_eq!(fs::read_to_string(root.join("idea.md")).unwrap(), "new #proj");
    assert_eq!(fs::read_to_string(root.join("Projects/idea.md")).unwrap(), "old");
    assert!(notifier.contains("The note was not moved"));
}

#[test]
fn broken_rule_is_reported_and_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "idea.md", "#proj");

    let settings_path = root.join("settings.json");
    let mut settings = Settings::default();
    settings.add_pattern_rule("Broken", "(");
    settings.add_tag_rule("Projects", "#proj");
    save_settings(&settings_path, &settings).unwrap();

    let loaded = load_settings(&settings_path).unwrap();
    let (snapshot, issues) = RuleSnapshot::compile(&loaded);
    let notifier = RecordingNotifier::new();
    report_config_issues(&issues, &notifier);
    assert_eq!(notifier.messages().len(), 1);
    assert!(notifier.contains("Rule #1"));

    let vault = Vault::open(root).unwrap();
    let report = check_all_files(&vault, &snapshot, &notifier).unwrap();
    assert_eq!(report.moved, 1);
    assert!(root.join("Projects/idea.md").exists());
}
