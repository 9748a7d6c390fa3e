//! Tests for the backup/restore selector state machines at the public API

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dbdesk_core::{
    BackupSelector, FilePicker, LocationMode, RestoreSelector, SelectionSettings, Storage,
};

use super::fixtures::MemoryStorage;

struct FixedPicker {
    path: Option<PathBuf>,
}

impl FilePicker for FixedPicker {
    fn pick_save(&mut self, _start_dir: Option<&Path>, _extension: &str) -> Option<PathBuf> {
        self.path.clone()
    }

    fn pick_open(&mut self, _start_dir: Option<&Path>, _extension: &str) -> Option<PathBuf> {
        self.path.clone()
    }
}

#[test]
fn colliding_default_name_blocks_confirm_until_custom_path() {
    let storage = MemoryStorage::with(&["nightly-03_14_25_9_05.db"]);
    let mut selector = BackupSelector::new(
        Arc::clone(&storage) as Arc<dyn Storage>,
        "nightly-03_14_25_9_05",
    );

    // the computed default collides with the catalog
    assert_eq!(selector.mode(), LocationMode::Default);
    assert!(!selector.confirm_enabled());

    // a fresh custom path enables confirm
    selector.set_mode(LocationMode::Custom);
    let mut settings = SelectionSettings::new();
    let mut picker = FixedPicker {
        path: Some(PathBuf::from("/mnt/usb/nightly.db")),
    };
    selector.pick_custom(&mut picker, &mut settings);
    assert!(selector.confirm_enabled());
}

#[test]
fn renaming_the_default_stem_resolves_the_collision() {
    let storage = MemoryStorage::with(&["taken.db"]);
    let mut selector = BackupSelector::new(Arc::clone(&storage) as Arc<dyn Storage>, "taken");

    assert!(!selector.confirm_enabled());
    selector.set_default_stem("taken-2");
    assert!(selector.confirm_enabled());
    assert_eq!(selector.confirm().unwrap().label, "taken-2.db");
}

#[test]
fn restore_with_empty_catalog_starts_in_custom_mode() {
    let storage = MemoryStorage::with(&[]);
    let selector = RestoreSelector::new(Arc::clone(&storage) as Arc<dyn Storage>, Vec::new());

    assert_eq!(selector.mode(), LocationMode::Custom);
    assert!(!selector.default_available());
}

#[test]
fn restore_catalog_offers_default_mode() {
    let storage = MemoryStorage::with(&["a.db"]);
    let catalog = storage.list().unwrap();
    let selector = RestoreSelector::new(Arc::clone(&storage) as Arc<dyn Storage>, catalog);

    assert_eq!(selector.mode(), LocationMode::Default);
    assert!(selector.confirm_enabled());
    let result = selector.confirm().unwrap();
    assert_eq!(result.label, "a.db");
    assert!(result.storage.is_some());
}

#[test]
fn settings_remember_the_last_pick_across_selectors() {
    let storage = MemoryStorage::with(&[]);
    let mut settings = SelectionSettings::new();
    assert!(settings.last_custom_path().is_none());

    let mut backup = BackupSelector::new(Arc::clone(&storage) as Arc<dyn Storage>, "label");
    backup.set_mode(LocationMode::Custom);
    let mut picker = FixedPicker {
        path: Some(PathBuf::from("/mnt/usb/one.db")),
    };
    backup.pick_custom(&mut picker, &mut settings);

    assert_eq!(settings.last_custom_path(), Some(Path::new("/mnt/usb/one.db")));

    // the restore picker starts from the remembered location
    let mut restore = RestoreSelector::new(Arc::clone(&storage) as Arc<dyn Storage>, Vec::new());
    let mut picker = FixedPicker {
        path: Some(PathBuf::from("/mnt/usb/two.db")),
    };
    restore.pick_custom(&mut picker, &mut settings);
    assert_eq!(restore.custom_path(), "/mnt/usb/two.db");
    assert_eq!(settings.last_custom_path(), Some(Path::new("/mnt/usb/two.db")));
}
