//! Directory-backed storage implementation
//!
//! Catalogs the files of one directory that carry the recognized backup
//! extension. This is the default storage the selectors offer as the
//! "default location".

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::models::StoredFile;

use super::Storage;

/// Extension carried by backup artifacts
pub const BACKUP_EXTENSION: &str = ".db";

/// Storage backed by a local directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Creates a storage rooted at the given directory
    ///
    /// The directory is created lazily on the first `create`.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Creates a storage rooted at a user-supplied location
    ///
    /// Expands a leading `~` so media locations entered in the wizard work
    /// as typed.
    #[must_use]
    pub fn from_media_location(location: &str) -> Self {
        let expanded = shellexpand::tilde(location);
        Self::new(PathBuf::from(expanded.as_ref()))
    }

    /// Returns the storage root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> StorageResult<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| {
                StorageError::RootUnavailable(format!("{}: {}", self.root.display(), e))
            })?;
        }
        Ok(())
    }
}

impl Storage for LocalStorage {
    fn exists(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }

    fn list(&self) -> StorageResult<Vec<StoredFile>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .map_err(|e| StorageError::List(format!("{}: {}", self.root.display(), e)))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StorageError::List(format!("{}: {}", self.root.display(), e)))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                debug!("Skipping non-UTF-8 storage entry");
                continue;
            };
            if !name.ends_with(BACKUP_EXTENSION) {
                continue;
            }
            let verbose_name = name
                .strip_suffix(BACKUP_EXTENSION)
                .unwrap_or(name)
                .to_string();
            files.push(StoredFile::new(name, verbose_name));
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    fn create(&self, name: &str) -> StorageResult<Box<dyn Write + Send>> {
        self.ensure_root()?;
        let path = self.root.join(name);
        let file = fs::File::create(&path).map_err(|e| StorageError::Create {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(file))
    }
}
