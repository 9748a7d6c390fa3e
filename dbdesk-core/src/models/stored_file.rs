//! Stored-file model, an entry in the backup storage catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named backup artifact cataloged by a storage backend
///
/// Read-only from the selectors' perspective; produced by `Storage::list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// The storage-level file name, including extension
    pub name: String,
    /// Human-readable name shown in choice lists
    pub verbose_name: String,
}

impl StoredFile {
    /// Creates a stored-file entry
    #[must_use]
    pub fn new(name: impl Into<String>, verbose_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verbose_name: verbose_name.into(),
        }
    }
}

impl fmt::Display for StoredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verbose_name)
    }
}
