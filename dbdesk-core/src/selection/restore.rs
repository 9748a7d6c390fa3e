//! Restore-source selection
//!
//! Mirrors the backup selector with one difference: default-mode choices are
//! restricted to the catalog of files already in the default storage. With an
//! empty catalog the default option is not selectable at all and the selector
//! starts in custom mode.

use std::sync::Arc;

use tracing::warn;

use crate::error::CancelRequest;
use crate::models::StoredFile;
use crate::storage::{Storage, BACKUP_EXTENSION};

use super::backup::BackupMechanism;
use super::{Confirmation, FilePicker, LocationMode, SelectionResult, SelectionSettings};

/// Capability trait for the frontend rendering the restore selector
pub trait RestoreSelectionView {
    /// Runs the dialog over the given selector until the user closes it
    fn exec(&mut self, selector: &mut RestoreSelector) -> Confirmation;
}

/// State machine for choosing a restore source
pub struct RestoreSelector {
    storage: Arc<dyn Storage>,
    catalog: Vec<StoredFile>,
    mode: LocationMode,
    selected: Option<usize>,
    custom_path: String,
}

impl RestoreSelector {
    /// Creates a selector over the given catalog
    ///
    /// Starts in default mode with the first stored file preselected, or in
    /// custom mode when the catalog is empty.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, catalog: Vec<StoredFile>) -> Self {
        let (mode, selected) = if catalog.is_empty() {
            (LocationMode::Custom, None)
        } else {
            (LocationMode::Default, Some(0))
        };
        Self {
            storage,
            catalog,
            mode,
            selected,
            custom_path: String::new(),
        }
    }

    /// Returns the catalog of stored files offered in default mode
    #[must_use]
    pub fn catalog(&self) -> &[StoredFile] {
        &self.catalog
    }

    /// Returns whether the default option is selectable at all
    #[must_use]
    pub fn default_available(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// Returns the current location mode
    #[must_use]
    pub const fn mode(&self) -> LocationMode {
        self.mode
    }

    /// Switches between default and custom location
    ///
    /// Switching to default is ignored while the catalog is empty.
    pub fn set_mode(&mut self, mode: LocationMode) {
        if mode == LocationMode::Default && !self.default_available() {
            return;
        }
        self.mode = mode;
    }

    /// Selects a catalog entry by index
    ///
    /// Out-of-range indices are ignored.
    pub fn select_stored(&mut self, index: usize) {
        if index < self.catalog.len() {
            self.selected = Some(index);
        }
    }

    /// Returns the currently selected catalog entry
    #[must_use]
    pub fn selected_file(&self) -> Option<&StoredFile> {
        self.selected.and_then(|i| self.catalog.get(i))
    }

    /// Returns the custom path, empty until one was picked
    #[must_use]
    pub fn custom_path(&self) -> &str {
        &self.custom_path
    }

    /// Runs the open-file picker and stores the chosen custom path
    pub fn pick_custom(&mut self, picker: &mut dyn FilePicker, settings: &mut SelectionSettings) {
        if let Some(path) = picker.pick_open(settings.last_custom_path(), BACKUP_EXTENSION) {
            settings.remember(&path);
            self.custom_path = path.display().to_string();
        }
    }

    /// Returns whether confirming is currently allowed
    #[must_use]
    pub fn confirm_enabled(&self) -> bool {
        match self.mode {
            LocationMode::Default => self.selected_file().is_some(),
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
                label: self
                    .selected_file()
                    .map(|f| f.name.clone())
                    .unwrap_or_default(),
                storage: Some(Arc::clone(&self.storage)),
            },
            LocationMode::Custom => SelectionResult {
                label: self.custom_path.clone(),
                storage: None,
            },
        })
    }
}

/// Action surface for selecting a restore source
pub struct SelectRestore {
    default_storage: Arc<dyn Storage>,
    stored_files: Vec<StoredFile>,
}

impl SelectRestore {
    /// Creates the action for the given backup mechanism
    ///
    /// Enumerates the default storage up front; an unreadable catalog is
    /// treated as empty, which routes the user to a custom path.
    #[must_use]
    pub fn new(mechanism: &dyn BackupMechanism) -> Self {
        let default_storage = mechanism.default_storage();
        let stored_files = match default_storage.list() {
            Ok(files) => files,
            Err(e) => {
                warn!("Cannot list backup storage, offering custom path only: {e}");
                Vec::new()
            }
        };
        Self {
            default_storage,
            stored_files,
        }
    }

    /// Returns the enumerated catalog
    #[must_use]
    pub fn stored_files(&self) -> &[StoredFile] {
        &self.stored_files
    }

    /// Runs the selection dialog
    ///
    /// # Errors
    ///
    /// Returns `CancelRequest` when the user dismisses the dialog; the caller
    /// aborts the restore operation.
    pub fn run(
        &self,
        view: &mut dyn RestoreSelectionView,
    ) -> Result<SelectionResult, CancelRequest> {
        let mut selector = RestoreSelector::new(
            Arc::clone(&self.default_storage),
            self.stored_files.clone(),
        );
        match view.exec(&mut selector) {
            Confirmation::Confirmed => selector.confirm().ok_or_else(|| {
                warn!("Restore selection confirmed while incomplete, treating as cancel");
                CancelRequest
            }),
            Confirmation::Cancelled => Err(CancelRequest),
        }
    }
}
