//! Selection flows: database-profile choice and backup/restore file choice
//!
//! Both flows share one pattern: collect a user choice through a capability
//! trait the frontend implements, validate or resolve it, and hand the caller
//! a plain value or an explicit cancellation signal.

mod backup;
mod database;
mod restore;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::storage::Storage;

pub use backup::{
    default_backup_label, sanitize_label, BackupMechanism, BackupSelectionView,
    BackupSelector, SelectBackup,
};
pub use database::{select_database, ProfileChoice, SelectOutcome, SelectionFrontend};
pub use restore::{RestoreSelectionView, RestoreSelector, SelectRestore};

/// The two locations a backup artifact can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMode {
    /// The application's default storage, addressed by logical name
    Default,
    /// An operator-supplied filesystem path
    Custom,
}

/// How a selector dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user confirmed the current selection
    Confirmed,
    /// The user dismissed the dialog
    Cancelled,
}

/// The value a file selector produces on confirm
///
/// When `storage` is `None` the label is a full filesystem path; otherwise it
/// is a logical name to resolve inside that storage.
#[derive(Clone)]
pub struct SelectionResult {
    /// Logical file name or full custom path
    pub label: String,
    /// The default storage, or `None` in custom mode
    pub storage: Option<Arc<dyn Storage>>,
}

impl std::fmt::Debug for SelectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionResult")
            .field("label", &self.label)
            .field("storage", &self.storage.as_ref().map(|_| "<storage>"))
            .finish()
    }
}

/// Process-wide selection state: the last custom path the user picked
///
/// Starts empty and is updated on every successful custom-path pick, so the
/// next file dialog opens where the user last worked.
#[derive(Debug, Clone, Default)]
pub struct SelectionSettings {
    last_custom_path: Option<PathBuf>,
}

impl SelectionSettings {
    /// Creates empty selection settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the directory the next file dialog should open in
    #[must_use]
    pub fn last_custom_path(&self) -> Option<&Path> {
        self.last_custom_path.as_deref()
    }

    /// Remembers a successfully picked custom path
    pub fn remember(&mut self, path: &Path) {
        self.last_custom_path = Some(path.to_path_buf());
    }
}

/// Capability trait for the frontend's file dialogs
///
/// Implementations present a native save/open dialog filtered to the single
/// recognized extension and return the chosen path, or `None` when the user
/// dismisses the dialog.
pub trait FilePicker {
    /// Asks for a path to save a new file at
    fn pick_save(&mut self, start_dir: Option<&Path>, extension: &str) -> Option<PathBuf>;

    /// Asks for an existing file to open
    fn pick_open(&mut self, start_dir: Option<&Path>, extension: &str) -> Option<PathBuf>;
}
