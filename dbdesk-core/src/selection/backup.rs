//! Backup-target selection
//!
//! `BackupSelector` is the state machine behind the "where should this backup
//! go" dialog: default storage under a generated label, or a custom path from
//! a save dialog. `SelectBackup` is the action surface the application runs.

use std::sync::Arc;

use chrono::Local;
use tracing::warn;

use crate::error::CancelRequest;
use crate::storage::{Storage, BACKUP_EXTENSION};

use super::{Confirmation, FilePicker, LocationMode, SelectionResult, SelectionSettings};

/// Replaces every character outside `[A-Za-z0-9]` with an underscore
///
/// Locale-formatted timestamps contain separators that are unsafe or
/// ambiguous in file names; the sanitized form is filesystem-safe on every
/// platform.
#[must_use]
pub fn sanitize_label(formatted: &str) -> String {
    formatted
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Builds the default backup label `<prefix>-<timestamp>`
///
/// Both components are sanitized, so the label is always composed of
/// `[A-Za-z0-9_-]` regardless of what the mechanism's prefix contains.
#[must_use]
pub fn default_backup_label(prefix: &str, timestamp: &str) -> String {
    format!(
        "{}-{}",
        sanitize_label(prefix),
        sanitize_label(timestamp)
    )
}

/// Formats the current local time for use in a default backup label
fn current_timestamp() -> String {
    Local::now().format("%x %R").to_string()
}

/// Collaborator providing the backup prefix and default storage
pub trait BackupMechanism {
    /// Prefix for generated backup labels
    fn filename_prefix(&self) -> String;

    /// The storage backups are written to by default
    fn default_storage(&self) -> Arc<dyn Storage>;
}

/// Capability trait for the frontend rendering the backup selector
///
/// The implementation lets the user operate the selector (switch modes, edit
/// the label, browse for a path) and reports how the dialog was closed.
pub trait BackupSelectionView {
    /// Runs the dialog over the given selector until the user closes it
    fn exec(&mut self, selector: &mut BackupSelector) -> Confirmation;
}

/// State machine for choosing a backup target
pub struct BackupSelector {
    storage: Arc<dyn Storage>,
    mode: LocationMode,
    default_stem: String,
    custom_path: String,
}

impl BackupSelector {
    /// Creates a selector starting in default mode with the given label
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, default_label: &str) -> Self {
        Self {
            storage,
            mode: LocationMode::Default,
            default_stem: default_label.to_string(),
            custom_path: String::new(),
        }
    }

    /// Returns the current location mode
    #[must_use]
    pub const fn mode(&self) -> LocationMode {
        self.mode
    }

    /// Switches between default and custom location
    pub fn set_mode(&mut self, mode: LocationMode) {
        self.mode = mode;
    }

    /// Returns the editable label stem shown in default mode
    #[must_use]
    pub fn default_stem(&self) -> &str {
        &self.default_stem
    }

    /// Edits the label stem used in default mode
    pub fn set_default_stem(&mut self, stem: &str) {
        self.default_stem = stem.to_string();
    }

    /// Returns the custom path, empty until one was picked
    #[must_use]
    pub fn custom_path(&self) -> &str {
        &self.custom_path
    }

    /// Runs the save-file picker and stores the chosen custom path
    ///
    /// Remembers the pick in the selection settings so the next dialog opens
    /// there. A dismissed picker leaves the current path untouched.
    pub fn pick_custom(&mut self, picker: &mut dyn FilePicker, settings: &mut SelectionSettings) {
        if let Some(path) = picker.pick_save(settings.last_custom_path(), BACKUP_EXTENSION) {
            settings.remember(&path);
            self.custom_path = path.display().to_string();
        }
    }

    /// Computes the effective file name for default mode
    ///
    /// `None` while the stem is empty or the name is already taken in the
    /// default storage; the collision blocks confirmation rather than
    /// silently overwriting.
    #[must_use]
    pub fn default_file_name(&self) -> Option<String> {
        if self.default_stem.is_empty() {
            return None;
        }
        let file_name = format!("{}{BACKUP_EXTENSION}", self.default_stem);
        if self.storage.exists(&file_name) {
            return None;
        }
        Some(file_name)
    }

    /// Returns whether confirming is currently allowed
    ///
    /// Derived from the live state on every call, so switching modes or
    /// editing a field can never leave a stale answer behind.
    #[must_use]
    pub fn confirm_enabled(&self) -> bool {
        match self.mode {
            LocationMode::Default => self.default_file_name().is_some(),
            LocationMode::Custom => !self.custom_path.is_empty(),
        }
    }

    /// Produces the selection result, or `None` while confirm is disabled
    #[must_use]
    pub fn confirm(&self) -> Option<SelectionResult> {
        if !self.confirm_enabled() {
            return None;
        }
        Some(match self.mode {
            LocationMode::Default => SelectionResult {
                label: self.default_file_name().unwrap_or_default(),
                storage: Some(Arc::clone(&self.storage)),
            },
            LocationMode::Custom => SelectionResult {
                label: self.custom_path.clone(),
                storage: None,
            },
        })
    }
}

/// Action surface for selecting a backup target
///
/// Computes the generated default label from the mechanism's prefix and the
/// current local time, runs the selector through the frontend view, and
/// returns the confirmed result or a cancellation signal.
pub struct SelectBackup {
    default_label: String,
    default_storage: Arc<dyn Storage>,
}

impl SelectBackup {
    /// Creates the action for the given backup mechanism
    #[must_use]
    pub fn new(mechanism: &dyn BackupMechanism) -> Self {
        Self::with_timestamp(mechanism, &current_timestamp())
    }

    /// Creates the action with an explicit timestamp string
    ///
    /// Label generation is deterministic given prefix and timestamp.
    #[must_use]
    pub fn with_timestamp(mechanism: &dyn BackupMechanism, timestamp: &str) -> Self {
        Self {
            default_label: default_backup_label(&mechanism.filename_prefix(), timestamp),
            default_storage: mechanism.default_storage(),
        }
    }

    /// Returns the generated default label
    #[must_use]
    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Runs the selection dialog
    ///
    /// # Errors
    ///
    /// Returns `CancelRequest` when the user dismisses the dialog; the caller
    /// aborts the backup operation.
    pub fn run(&self, view: &mut dyn BackupSelectionView) -> Result<SelectionResult, CancelRequest> {
        let mut selector = BackupSelector::new(Arc::clone(&self.default_storage), &self.default_label);
        match view.exec(&mut selector) {
            Confirmation::Confirmed => selector.confirm().ok_or_else(|| {
                warn!("Backup selection confirmed while incomplete, treating as cancel");
                CancelRequest
            }),
            Confirmation::Cancelled => Err(CancelRequest),
        }
    }
}
