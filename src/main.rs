use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use note_mover_lib::commands::{self, RegexTarget};
use note_mover_lib::rules::Rule;
use note_mover_lib::services::{DispatchOutcome, StderrNotifier, Vault};
use note_mover_lib::settings::{self, RuleSnapshot};

#[derive(Parser)]
#[command(author, version, about = "Move notes into folders by tag or file name", long_about = None)]
struct Cli {
    /// Vault root directory
    #[arg(long, global = true, env = "NOTE_MOVER_VAULT", default_value = ".")]
    vault: PathBuf,

    /// Settings file (defaults to the vault's plugin data.json)
    #[arg(long, global = true, env = "NOTE_MOVER_SETTINGS")]
    settings: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check all files in the vault and move the ones a rule matches
    CheckAll,
    /// Move a single note
    Move {
        /// Note path, relative to the vault or absolute
        note: PathBuf,
    },
    /// Write a default settings file
    Init,
    /// Show or edit the rule list
    Rules {
        #[command(subcommand)]
        action: RuleAction,
    },
    /// Show or edit excluded folders
    Exclude {
        #[command(subcommand)]
        action: ExcludeAction,
    },
    /// Toggle regex matching
    Regex {
        #[arg(value_enum)]
        target: RegexArg,
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Subcommand)]
enum RuleAction {
    /// List rules in evaluation order
    List,
    /// Append a rule (lowest priority)
    Add(AddRule),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct RuleCriterion {
    /// Match notes carrying this tag (e.g. "#project")
    #[arg(long)]
    tag: Option<String>,
    /// Match notes whose file name matches this regex
    #[arg(long)]
    pattern: Option<String>,
}

#[derive(Args)]
struct AddRule {
    /// Destination folder
    folder: String,
    #[command(flatten)]
    criterion: RuleCriterion,
}

#[derive(Subcommand)]
enum ExcludeAction {
    /// List excluded folders
    List,
    /// Exclude a folder (a regex when folder regex mode is on)
    Add { folder: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum RegexArg {
    Tags,
    Folders,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings_path = settings::resolve_settings_path(&cli.vault, cli.settings.as_deref())
        .context("Failed to locate settings")?;
    tracing::debug!("Using settings {}", settings_path.display());

    match cli.command {
        Commands::CheckAll => {
            let (vault, snapshot) = open(&cli.vault, &settings_path)?;
            let report = commands::check_all_files(&vault, &snapshot, &StderrNotifier)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Checked {} notes: {} moved, {} skipped, {} unchanged, {} failed",
                    report.checked, report.moved, report.skipped, report.unchanged, report.failed
                );
                for failure in &report.failures {
                    println!("  {}: {}", failure.path, failure.error);
                }
            }
        }
        Commands::Move { note } => {
            let (vault, snapshot) = open(&cli.vault, &settings_path)?;
            let note_path = vault.relative(&note)?;
            let outcome = commands::move_the_note(&vault, &snapshot, &note_path, &StderrNotifier)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", describe(&note_path, &outcome));
            }
        }
        Commands::Init => {
            // A fresh vault has no plugin settings yet; create them inside it
            let settings_path = match cli.settings.as_deref() {
                Some(path) => path.to_path_buf(),
                None => cli.vault.join(settings::store::VAULT_SETTINGS_PATH),
            };
            if commands::init_settings(&settings_path)? {
                println!("Created {}", settings_path.display());
            } else {
                println!("{} already exists", settings_path.display());
            }
        }
        Commands::Rules { action } => match action {
            RuleAction::List => {
                let settings = settings::load_settings(&settings_path)?;
                let rows = commands::list_rules(&settings);
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else if rows.is_empty() {
                    println!("No rules configured");
                } else {
                    for row in rows {
                        let problem = row
                            .problem
                            .map(|p| format!("  (ignored: {})", p))
                            .unwrap_or_default();
                        println!(
                            "{:>3}. {:<8} {:<24} -> {}{}",
                            row.position, row.kind, row.value, row.folder, problem
                        );
                    }
                }
            }
            RuleAction::Add(add) => {
                let rule = Rule::from_parts(
                    &add.folder,
                    add.criterion.tag.as_deref(),
                    add.criterion.pattern.as_deref(),
                );
                let rule = match rule {
                    Ok(rule) => rule,
                    Err(reason) => bail!("Invalid rule: {}", reason),
                };
                let saved = commands::add_rule(&settings_path, &rule)?;
                println!("Added rule #{}", saved.folder_tag_pattern.len());
            }
        },
        Commands::Exclude { action } => match action {
            ExcludeAction::List => {
                let settings = settings::load_settings(&settings_path)?;
                let mode = if settings.use_regex_to_check_for_excluded_folder {
                    "regex"
                } else {
                    "exact"
                };
                println!("Excluded folders ({} match):", mode);
                for entry in settings.excluded_folder.iter().filter(|e| !e.folder.is_empty()) {
                    println!("  {}", entry.folder);
                }
            }
            ExcludeAction::Add { folder } => {
                commands::add_excluded_folder(&settings_path, &folder)?;
                println!("Excluded {}", folder);
            }
        },
        Commands::Regex { target, state } => {
            let target = match target {
                RegexArg::Tags => RegexTarget::Tags,
                RegexArg::Folders => RegexTarget::ExcludedFolders,
            };
            let enabled = matches!(state, Toggle::On);
            commands::set_regex_mode(&settings_path, target, enabled)?;
            println!("Regex matching {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    Ok(())
}

/// Open the vault and compile a settings snapshot for this invocation
fn open(vault_root: &Path, settings_path: &Path) -> Result<(Vault, RuleSnapshot)> {
    let vault = Vault::open(vault_root)?;
    let loaded = settings::load_settings(settings_path)?;
    let (snapshot, issues) = RuleSnapshot::compile(&loaded);
    commands::report_config_issues(&issues, &StderrNotifier);
    Ok((vault, snapshot))
}

fn describe(path: &str, outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Moved { to, .. } => format!("Moved {} -> {}", path, to),
        DispatchOutcome::AlreadyInPlace { .. } => format!("{} is already in place", path),
        DispatchOutcome::NoMatch => format!("{} matches no rule", path),
        DispatchOutcome::Skipped { reason } => format!("Skipped {}: {}", path, reason),
        DispatchOutcome::Failed { error } => format!("Not moved {}: {}", path, error),
    }
}
