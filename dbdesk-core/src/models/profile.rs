//! Profile model representing a named set of database-connection parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dialect;
use crate::error::{StoreError, StoreResult};

/// A named set of database-connection parameters
///
/// All parameters are kept as entered, including the port: the wizard edits
/// free-form text fields and the probe layer decides how to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique profile name, the key in the profile store
    pub name: String,
    /// Database dialect identifier (e.g. "mysql", "postgresql")
    #[serde(default = "default_dialect")]
    pub dialect: String,
    /// Database server host
    #[serde(default)]
    pub host: String,
    /// Database server port, as entered
    #[serde(default = "default_port")]
    pub port: String,
    /// Database name
    #[serde(default)]
    pub database: String,
    /// Username for authentication
    #[serde(default)]
    pub user: String,
    /// Password for authentication
    #[serde(default)]
    pub password: String,
    /// Root directory for the application's media and backup files
    #[serde(default)]
    pub media_location: String,
}

fn default_dialect() -> String {
    dialect::DEFAULT_DIALECT.to_string()
}

fn default_port() -> String {
    dialect::DEFAULT_PORT.to_string()
}

impl Profile {
    /// Creates a profile with the given name and default parameters
    ///
    /// Defaults mirror a fresh wizard form: `mysql` on port `3306`, every
    /// other field empty.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dialect: default_dialect(),
            host: String::new(),
            port: default_port(),
            database: String::new(),
            user: String::new(),
            password: String::new(),
            media_location: String::new(),
        }
    }

    /// Sets the host for this profile
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the database name for this profile
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Sets the username for this profile
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Validates this profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile name is empty or whitespace-only.
    pub fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation {
                field: "name".to_string(),
                reason: "Profile name cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// The in-memory set of profiles, keyed by unique name
///
/// At most one profile is marked active; the active profile is the one the
/// application opens its working connection with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSet {
    profiles: BTreeMap<String, Profile>,
    active: Option<String>,
}

impl ProfileSet {
    /// Creates an empty profile set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list of profiles and an active name
    ///
    /// Later duplicates of a name override earlier ones; an active name that
    /// matches no profile is dropped.
    #[must_use]
    pub fn from_parts(profiles: Vec<Profile>, active: Option<String>) -> Self {
        let profiles: BTreeMap<String, Profile> = profiles
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        let active = active.filter(|name| profiles.contains_key(name));
        Self { profiles, active }
    }

    /// Returns true if the set contains no profiles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Returns the number of stored profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Looks up a profile by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Returns all profile names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// Returns all profiles, ordered by name
    #[must_use]
    pub fn profiles(&self) -> Vec<&Profile> {
        self.profiles.values().collect()
    }

    /// Inserts a profile, replacing any existing profile of the same name
    pub fn upsert(&mut self, profile: Profile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// Removes a profile by name
    ///
    /// Clears the active marker if it pointed at the removed profile.
    pub fn remove(&mut self, name: &str) -> Option<Profile> {
        let removed = self.profiles.remove(name);
        if removed.is_some() && self.active.as_deref() == Some(name) {
            self.active = None;
        }
        removed
    }

    /// Marks a profile as active
    ///
    /// Returns false (and leaves the marker untouched) if no profile of that
    /// name exists.
    pub fn set_active(&mut self, name: &str) -> bool {
        if self.profiles.contains_key(name) {
            self.active = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Clears the active marker
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Returns the active profile name, if any
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns the active profile, if any
    #[must_use]
    pub fn active(&self) -> Option<&Profile> {
        self.active.as_deref().and_then(|name| self.profiles.get(name))
    }
}
