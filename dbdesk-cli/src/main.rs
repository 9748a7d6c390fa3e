//! `DbDesk` CLI - terminal frontend for the `DbDesk` selection flows
//!
//! Provides commands for listing profiles, running the profile-selection
//! flow, testing connectivity, and choosing backup/restore targets. The
//! terminal implementations of the core capability traits live here; all
//! selection logic stays in `dbdesk-core`.

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use dbdesk_core::{
    dialect, select_database, BackupMechanism, BackupSelectionView, BackupSelector, CancelRequest,
    Confirmation, ConfirmOutcome, ConnectionValidator, FilePicker, LocalStorage, LocationMode,
    Profile, ProfileChoice, ProfileSet, ProfileStore, ProfileWizard, RestoreSelectionView,
    RestoreSelector, SelectBackup, SelectOutcome, SelectRestore, SelectionFrontend,
    SelectionResult, SelectionSettings, Storage, TcpProbeEngine, WizardState,
};

/// `DbDesk` command-line interface for managing database profiles
#[derive(Parser)]
#[command(name = "dbdesk-cli")]
#[command(author, version, about = "DbDesk command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List all stored profiles
    #[command(about = "List all stored database profiles")]
    List {
        /// Output format for the profile list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Run the interactive profile-selection flow
    #[command(about = "Choose or create the active database profile")]
    Select,

    /// Test connectivity of a stored profile
    #[command(about = "Probe connectivity for a stored profile")]
    Test {
        /// Profile name
        name: String,

        /// Connection timeout in seconds
        #[arg(short, long, default_value = "10")]
        timeout: u64,
    },

    /// Choose a backup target
    #[command(about = "Select where a backup artifact should be written")]
    Backup {
        /// Prefix for the generated backup label
        #[arg(short, long, default_value = "backup")]
        prefix: String,
    },

    /// Choose a restore source
    #[command(about = "Select the backup artifact to restore from")]
    Restore,
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON document
    Json,
}

/// Errors surfaced by the CLI
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration or store access failed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The named profile does not exist
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// The connectivity probe failed
    #[error("Connection test failed for profile `{0}`")]
    TestFailed(String),

    /// I/O error on the terminal
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Process exit codes
pub mod exit_codes {
    /// Command completed (including user-cancelled selections)
    pub const SUCCESS: i32 = 0;
    /// Command failed
    pub const FAILURE: i32 = 1;
    /// Connectivity test ran and the probe failed
    pub const TEST_FAILED: i32 = 2;
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            match e {
                CliError::TestFailed(_) => exit_codes::TEST_FAILED,
                _ => exit_codes::FAILURE,
            }
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<(), CliError> {
    let store = open_store(cli.config)?;
    match cli.command {
        Commands::List { format } => cmd_list(&store, format),
        Commands::Select => cmd_select(&store),
        Commands::Test { name, timeout } => cmd_test(&store, &name, timeout),
        Commands::Backup { prefix } => cmd_backup(&store, &prefix),
        Commands::Restore => cmd_restore(&store),
    }
}

fn open_store(config: Option<PathBuf>) -> Result<ProfileStore, CliError> {
    match config {
        Some(dir) => Ok(ProfileStore::with_config_dir(dir)),
        None => ProfileStore::new()
            .map_err(|e| CliError::Config(format!("Failed to locate profile store: {e}"))),
    }
}

// ========== Commands ==========

fn cmd_list(store: &ProfileStore, format: OutputFormat) -> Result<(), CliError> {
    let profiles = store.load_or_default();
    if profiles.is_empty() {
        println!("No profiles stored.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => {
            println!(
                "{:<20} {:<12} {:<24} {:<6} {:<16} ACTIVE",
                "NAME", "DIALECT", "HOST", "PORT", "DATABASE"
            );
            for profile in profiles.profiles() {
                let active = if profiles.active_name() == Some(profile.name.as_str()) {
                    "*"
                } else {
                    ""
                };
                println!(
                    "{:<20} {:<12} {:<24} {:<6} {:<16} {active}",
                    profile.name, profile.dialect, profile.host, profile.port, profile.database
                );
            }
        }
        OutputFormat::Json => {
            let document = serde_json::json!({
                "active": profiles.active_name(),
                "profiles": profiles.profiles(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&document)
                    .map_err(|e| CliError::Config(format!("Failed to render JSON: {e}")))?
            );
        }
    }
    Ok(())
}

fn cmd_select(store: &ProfileStore) -> Result<(), CliError> {
    let validator = ConnectionValidator::new(Arc::new(TcpProbeEngine::new()));
    let mut frontend = TerminalFrontend::new();

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Failed to create async runtime: {e}")))?;
    let outcome = runtime.block_on(select_database(store, &validator, &mut frontend));

    match outcome {
        SelectOutcome::Selected(profile) => {
            println!(
                "Active profile: {} ({}@{}/{})",
                profile.name, profile.user, profile.host, profile.database
            );
        }
        SelectOutcome::Abandoned => {
            println!("No profile selected.");
        }
    }
    Ok(())
}

fn cmd_test(store: &ProfileStore, name: &str, timeout: u64) -> Result<(), CliError> {
    let profiles = store.load_or_default();
    let profile = find_profile(&profiles, name)?;

    let engine = TcpProbeEngine::with_timeout(Duration::from_secs(timeout));
    let validator = ConnectionValidator::new(Arc::new(engine));

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Failed to create async runtime: {e}")))?;

    println!("Testing profile '{}'...", profile.name);
    let valid = runtime.block_on(validator.validate(profile));
    if valid {
        println!("OK: {} is reachable", profile.host);
        Ok(())
    } else {
        Err(CliError::TestFailed(profile.name.clone()))
    }
}

fn cmd_backup(store: &ProfileStore, prefix: &str) -> Result<(), CliError> {
    let mechanism = CliBackupMechanism::new(store, prefix);
    let action = SelectBackup::new(&mechanism);

    let mut settings = SelectionSettings::new();
    let mut view = TerminalSelectionView::new(&mut settings);

    match action.run(&mut view) {
        Ok(result) => {
            print_selection("Backup target", &result, mechanism.storage_root());
            Ok(())
        }
        Err(CancelRequest) => {
            println!("Backup cancelled.");
            Ok(())
        }
    }
}

fn cmd_restore(store: &ProfileStore) -> Result<(), CliError> {
    let mechanism = CliBackupMechanism::new(store, "backup");
    let action = SelectRestore::new(&mechanism);

    let mut settings = SelectionSettings::new();
    let mut view = TerminalSelectionView::new(&mut settings);

    match action.run(&mut view) {
        Ok(result) => {
            print_selection("Restore source", &result, mechanism.storage_root());
            Ok(())
        }
        Err(CancelRequest) => {
            println!("Restore cancelled.");
            Ok(())
        }
    }
}

/// Finds a profile by name, falling back to a case-insensitive match
fn find_profile<'a>(profiles: &'a ProfileSet, name: &str) -> Result<&'a Profile, CliError> {
    if let Some(profile) = profiles.get(name) {
        return Ok(profile);
    }
    profiles
        .profiles()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CliError::ProfileNotFound(name.to_string()))
}

fn print_selection(title: &str, result: &SelectionResult, storage_root: &Path) {
    if result.storage.is_some() {
        println!(
            "{title}: {} (default storage at {})",
            result.label,
            storage_root.display()
        );
    } else {
        println!("{title}: {}", result.label);
    }
}

// ========== Backup mechanism ==========

/// Backup collaborator wired to the active profile's media location
///
/// Falls back to a `backups` directory beside the profile store when no
/// active profile declares one.
struct CliBackupMechanism {
    prefix: String,
    root: PathBuf,
    storage: Arc<LocalStorage>,
}

impl CliBackupMechanism {
    fn new(store: &ProfileStore, prefix: &str) -> Self {
        let profiles = store.load_or_default();
        let media_location = profiles
            .active()
            .map(|p| p.media_location.clone())
            .unwrap_or_default();

        let storage = if media_location.is_empty() {
            LocalStorage::new(store.config_dir().join("backups"))
        } else {
            LocalStorage::from_media_location(&media_location)
        };
        Self {
            prefix: prefix.to_string(),
            root: storage.root().to_path_buf(),
            storage: Arc::new(storage),
        }
    }

    fn storage_root(&self) -> &Path {
        &self.root
    }
}

impl BackupMechanism for CliBackupMechanism {
    fn filename_prefix(&self) -> String {
        self.prefix.clone()
    }

    fn default_storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.storage) as Arc<dyn Storage>
    }
}

// ========== Terminal prompts ==========

/// Prompts for one line of input; `None` on end of input
fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{message}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Prompts with a default value kept on empty input
fn prompt_with_default(message: &str, default: &str) -> io::Result<Option<String>> {
    match prompt(&format!("{message} [{default}]"))? {
        None => Ok(None),
        Some(line) if line.is_empty() => Ok(Some(default.to_string())),
        Some(line) => Ok(Some(line)),
    }
}

// ========== Profile-selection frontend ==========

/// Terminal implementation of the profile-selection capability trait
struct TerminalFrontend;

impl TerminalFrontend {
    const fn new() -> Self {
        Self
    }

    /// Collects the wizard's fields once; false means the user backed out
    fn fill_draft(wizard: &mut ProfileWizard<'_>) -> io::Result<bool> {
        let known = wizard.known_names();
        if !known.is_empty() {
            println!("Existing profiles: {}", known.join(", "));
        }

        let Some(name) = prompt("Profile name (empty to cancel)")? else {
            return Ok(false);
        };
        if name.is_empty() {
            return Ok(false);
        }
        wizard.set_name(&name);

        println!("Known dialects: {}", dialect::known_dialects().join(", "));
        let Some(value) = prompt_with_default("Driver", &wizard.draft().dialect)? else {
            return Ok(false);
        };
        wizard.set_dialect(&value);

        let Some(value) = prompt_with_default("Server host", &wizard.draft().host)? else {
            return Ok(false);
        };
        wizard.set_host(&value);

        let Some(value) = prompt_with_default("Port", &wizard.draft().port)? else {
            return Ok(false);
        };
        wizard.set_port(&value);

        let Some(value) =
            prompt_with_default("Database name", &wizard.draft().database)?
        else {
            return Ok(false);
        };
        wizard.set_database(&value);

        let Some(value) = prompt_with_default("Username", &wizard.draft().user)? else {
            return Ok(false);
        };
        wizard.set_user(&value);

        let Some(value) = prompt_with_default("Password", &wizard.draft().password)? else {
            return Ok(false);
        };
        wizard.set_password(&value);

        let Some(value) =
            prompt_with_default("Media location", &wizard.draft().media_location)?
        else {
            return Ok(false);
        };
        wizard.set_media_location(&value);

        Ok(true)
    }
}

#[async_trait]
impl SelectionFrontend for TerminalFrontend {
    fn choose_profile(&mut self, names: &[String]) -> Option<ProfileChoice> {
        println!("Select a stored profile:");
        for (i, name) in names.iter().enumerate() {
            println!("  {}) {name}", i + 1);
        }
        println!("  {}) new profile", names.len() + 1);

        loop {
            let line = match prompt("Choice (q to quit)") {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => return None,
            };
            if line.eq_ignore_ascii_case("q") {
                return None;
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=names.len()).contains(&n) => {
                    return Some(ProfileChoice::Existing(names[n - 1].clone()));
                }
                Ok(n) if n == names.len() + 1 => return Some(ProfileChoice::NewProfile),
                _ => println!("Please enter a number between 1 and {}.", names.len() + 1),
            }
        }
    }

    async fn run_wizard(&mut self, wizard: &mut ProfileWizard<'_>) {
        println!("-- Create new profile --");
        while wizard.state() == WizardState::Editing {
            let filled = Self::fill_draft(wizard).unwrap_or(false);
            if !filled {
                wizard.cancel();
                return;
            }

            println!("Verifying database settings...");
            match wizard.confirm().await {
                ConfirmOutcome::Accepted => {
                    println!("Profile `{}` saved.", wizard.draft().name);
                }
                ConfirmOutcome::ConnectionInvalid => {
                    println!("Could not connect with these settings; edit and retry or cancel.");
                }
                ConfirmOutcome::StoreFailed => {
                    println!("Could not save the profile store; nothing was committed.");
                }
                ConfirmOutcome::NotReady => {
                    println!("A profile name is required.");
                }
            }
        }
    }
}

// ========== Backup/restore selection view ==========

/// Terminal implementation of the selector views and the file picker
struct TerminalSelectionView<'a> {
    settings: &'a mut SelectionSettings,
    picker: TerminalPicker,
}

impl<'a> TerminalSelectionView<'a> {
    fn new(settings: &'a mut SelectionSettings) -> Self {
        Self {
            settings,
            picker: TerminalPicker,
        }
    }
}

struct TerminalPicker;

impl FilePicker for TerminalPicker {
    fn pick_save(&mut self, start_dir: Option<&Path>, extension: &str) -> Option<PathBuf> {
        pick_path("Save as", start_dir, extension)
    }

    fn pick_open(&mut self, start_dir: Option<&Path>, extension: &str) -> Option<PathBuf> {
        pick_path("Open file", start_dir, extension)
    }
}

fn pick_path(caption: &str, start_dir: Option<&Path>, extension: &str) -> Option<PathBuf> {
    if let Some(dir) = start_dir {
        println!("{caption} (last location: {})", dir.display());
    }
    let line = prompt(&format!("{caption}, path ending in {extension}")).ok()??;
    if line.is_empty() {
        return None;
    }
    Some(PathBuf::from(line))
}

impl BackupSelectionView for TerminalSelectionView<'_> {
    fn exec(&mut self, selector: &mut BackupSelector) -> Confirmation {
        loop {
            match selector.mode() {
                LocationMode::Default => match selector.default_file_name() {
                    Some(file_name) => println!("Default location: {file_name}"),
                    None if selector.default_stem().is_empty() => {
                        println!("Default location: (label required)");
                    }
                    None => println!(
                        "Default location: {}{} already exists, rename or pick a custom path",
                        selector.default_stem(),
                        dbdesk_core::BACKUP_EXTENSION
                    ),
                },
                LocationMode::Custom => {
                    let path = selector.custom_path();
                    println!(
                        "Custom location: {}",
                        if path.is_empty() { "(none picked)" } else { path }
                    );
                }
            }

            let line = match prompt("[d]efault / [c]ustom / [l]abel <text> / [p]ick / [ok] / [q]uit")
            {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => return Confirmation::Cancelled,
            };
            match line.split_once(' ') {
                Some(("l", rest)) => selector.set_default_stem(rest.trim()),
                _ => match line.as_str() {
                    "d" => selector.set_mode(LocationMode::Default),
                    "c" => selector.set_mode(LocationMode::Custom),
                    "p" => {
                        selector.set_mode(LocationMode::Custom);
                        selector.pick_custom(&mut self.picker, self.settings);
                    }
                    "ok" if selector.confirm_enabled() => return Confirmation::Confirmed,
                    "ok" => println!("Selection incomplete."),
                    "q" => return Confirmation::Cancelled,
                    _ => println!("Unrecognized input."),
                },
            }
        }
    }
}

impl RestoreSelectionView for TerminalSelectionView<'_> {
    fn exec(&mut self, selector: &mut RestoreSelector) -> Confirmation {
        if selector.default_available() {
            println!("Stored backups:");
            for (i, file) in selector.catalog().iter().enumerate() {
                println!("  {}) {}", i + 1, file.verbose_name);
            }
        } else {
            println!("No stored backups; a custom path is required.");
        }

        loop {
            let line = match prompt("[number] / [c]ustom / [p]ick / [ok] / [q]uit") {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => return Confirmation::Cancelled,
            };
            match line.as_str() {
                "c" => selector.set_mode(LocationMode::Custom),
                "p" => {
                    selector.set_mode(LocationMode::Custom);
                    selector.pick_custom(&mut self.picker, self.settings);
                }
                "ok" if selector.confirm_enabled() => return Confirmation::Confirmed,
                "ok" => println!("Selection incomplete."),
                "q" => return Confirmation::Cancelled,
                other => {
                    if let Ok(n) = other.parse::<usize>() {
                        if n >= 1 && n <= selector.catalog().len() {
                            selector.set_mode(LocationMode::Default);
                            selector.select_stored(n - 1);
                            continue;
                        }
                    }
                    println!("Unrecognized input.");
                }
            }
        }
    }
}
