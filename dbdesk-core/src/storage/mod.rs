//! Backup-storage abstraction
//!
//! The selectors treat storage as an opaque catalog of named blobs: they ask
//! whether a name exists and what names are stored. Writing the actual
//! artifact is the backup mechanism's job, through `create`.

mod local;

use std::io::Write;

use crate::error::StorageResult;
use crate::models::StoredFile;

pub use local::{LocalStorage, BACKUP_EXTENSION};

/// Abstraction over the application's canonical backup/media location
pub trait Storage: Send + Sync {
    /// Returns true if a file of that name is already stored
    fn exists(&self, name: &str) -> bool;

    /// Enumerates the stored files
    ///
    /// # Errors
    /// Returns `StorageError` if the catalog cannot be read
    fn list(&self) -> StorageResult<Vec<StoredFile>>;

    /// Creates a new stored file and returns a write handle to it
    ///
    /// # Errors
    /// Returns `StorageError` if the file cannot be created
    fn create(&self, name: &str) -> StorageResult<Box<dyn Write + Send>>;
}
