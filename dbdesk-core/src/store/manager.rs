//! Profile store for TOML file operations
//!
//! This module provides the `ProfileStore` which persists the set of
//! database-connection profiles and the active-profile marker. The store is
//! the single source the application reads at startup to auto-connect.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::models::{Profile, ProfileSet};

/// File name for the profile store
const PROFILES_FILE: &str = "profiles.toml";

/// Wrapper for serializing the profile set
///
/// `active` must precede the profile tables in the TOML output.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct ProfilesFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active: Option<String>,
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// Profile store for `DbDesk`
///
/// Handles loading and saving profiles in TOML format.
/// Profiles are stored in `~/.config/dbdesk/` by default.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    /// Base directory for the profile store
    config_dir: PathBuf,
}

impl ProfileStore {
    /// Creates a new `ProfileStore` with the default configuration directory
    ///
    /// The default directory is `~/.config/dbdesk/`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> StoreResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StoreError::NotFound(PathBuf::from("~/.config")))?
            .join("dbdesk");
        Ok(Self { config_dir })
    }

    /// Creates a new `ProfileStore` with a custom configuration directory
    ///
    /// This is useful for testing or non-standard configurations.
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory path
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensures the configuration directory exists
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> StoreResult<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).map_err(|e| {
                StoreError::Write(format!(
                    "Failed to create config directory {}: {}",
                    self.config_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Loads the profile set from the store
    ///
    /// Returns an empty set if the backing file doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> StoreResult<ProfileSet> {
        let path = self.profiles_path();
        if !path.exists() {
            return Ok(ProfileSet::new());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| StoreError::Read(format!("Failed to read {}: {}", path.display(), e)))?;

        let file: ProfilesFile = toml::from_str(&content).map_err(|e| {
            StoreError::Deserialize(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(ProfileSet::from_parts(file.profiles, file.active))
    }

    /// Loads the profile set, treating unreadable data as "no profiles yet"
    ///
    /// A missing, unreadable, or corrupt store is recovered locally by
    /// starting from an empty set, which sends the selection flow into
    /// first-run profile creation instead of crashing.
    #[must_use]
    pub fn load_or_default(&self) -> ProfileSet {
        match self.load() {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!("Profile store unreadable, starting empty: {e}");
                ProfileSet::new()
            }
        }
    }

    /// Saves the profile set to the store
    ///
    /// The write is atomic: content goes to a temporary file in the same
    /// directory which is then renamed over the target, so a failure mid-write
    /// cannot leave a truncated store behind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, profiles: &ProfileSet) -> StoreResult<()> {
        self.ensure_config_dir()?;
        let path = self.profiles_path();

        let file = ProfilesFile {
            active: profiles.active_name().map(ToOwned::to_owned),
            profiles: profiles.profiles().into_iter().cloned().collect(),
        };
        let content = toml::to_string_pretty(&file)
            .map_err(|e| StoreError::Serialize(format!("Failed to serialize profiles: {e}")))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.config_dir).map_err(|e| {
            StoreError::Write(format!(
                "Failed to create temporary file in {}: {}",
                self.config_dir.display(),
                e
            ))
        })?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| StoreError::Write(format!("Failed to write {}: {}", path.display(), e)))?;
        tmp.persist(&path).map_err(|e| {
            StoreError::Write(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Marks a stored profile as the active one and persists the store
    ///
    /// Subsequent application startups read this marker to auto-connect.
    /// Returns false without touching the store if the name is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be saved.
    pub fn set_active(&self, name: &str) -> StoreResult<bool> {
        let mut profiles = self.load_or_default();
        if !profiles.set_active(name) {
            return Ok(false);
        }
        self.save(&profiles)?;
        Ok(true)
    }

    fn profiles_path(&self) -> PathBuf {
        self.config_dir.join(PROFILES_FILE)
    }
}
