//! Profile wizard state machine
//!
//! Collects one profile's fields, validates the candidate connection, and
//! commits it to the store on success. The machine is independent of any
//! rendering layer: a frontend mutates the draft through the setters, asks
//! `confirm_enabled` before offering OK, and drives `confirm`/`cancel`.

use tracing::{info, warn};

use crate::models::{Profile, ProfileSet};
use crate::store::ProfileStore;
use crate::validator::ConnectionValidator;

/// State of a profile wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Collecting field edits
    Editing,
    /// A connectivity probe is in flight
    Validating,
    /// Candidate committed and set active; the wizard is finished
    Accepted,
    /// Dismissed without committing anything
    Cancelled,
}

/// Result of a confirm attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Candidate validated, persisted, and set active
    Accepted,
    /// The connectivity probe failed; edit and retry
    ConnectionInvalid,
    /// Persisting the store failed; nothing was committed
    StoreFailed,
    /// Confirm is not available (empty name or wizard already finished)
    NotReady,
}

/// Wizard collecting and validating one profile
///
/// Holds a draft profile and a mutable borrow of the profile set it commits
/// into. Only one confirm can be in flight at a time, enforced by the state
/// guard and the exclusive borrow.
pub struct ProfileWizard<'a> {
    profiles: &'a mut ProfileSet,
    store: &'a ProfileStore,
    validator: &'a ConnectionValidator,
    state: WizardState,
    draft: Profile,
}

impl<'a> ProfileWizard<'a> {
    /// Creates a wizard over the given profile set
    ///
    /// The draft starts from an empty form: no name, default dialect and
    /// port, every other field empty.
    #[must_use]
    pub fn new(
        profiles: &'a mut ProfileSet,
        store: &'a ProfileStore,
        validator: &'a ConnectionValidator,
    ) -> Self {
        Self {
            profiles,
            store,
            validator,
            state: WizardState::Editing,
            draft: Profile::new(""),
        }
    }

    /// Returns the current wizard state
    #[must_use]
    pub const fn state(&self) -> WizardState {
        self.state
    }

    /// Returns the current draft for rendering
    #[must_use]
    pub const fn draft(&self) -> &Profile {
        &self.draft
    }

    /// Returns the names of the stored profiles, sorted
    #[must_use]
    pub fn known_names(&self) -> Vec<String> {
        self.profiles.names()
    }

    /// Sets the profile-name field
    ///
    /// Switching the name re-populates every other field: from the stored
    /// profile when the name matches an existing one, otherwise back to the
    /// empty-form defaults.
    pub fn set_name(&mut self, name: &str) {
        if let Some(existing) = self.profiles.get(name) {
            self.draft = existing.clone();
        } else {
            self.draft = Profile::new(name);
        }
    }

    /// Sets the dialect field
    pub fn set_dialect(&mut self, dialect: &str) {
        self.draft.dialect = dialect.to_string();
    }

    /// Sets the host field
    pub fn set_host(&mut self, host: &str) {
        self.draft.host = host.to_string();
    }

    /// Sets the port field
    pub fn set_port(&mut self, port: &str) {
        self.draft.port = port.to_string();
    }

    /// Sets the database-name field
    pub fn set_database(&mut self, database: &str) {
        self.draft.database = database.to_string();
    }

    /// Sets the username field
    pub fn set_user(&mut self, user: &str) {
        self.draft.user = user.to_string();
    }

    /// Sets the password field
    pub fn set_password(&mut self, password: &str) {
        self.draft.password = password.to_string();
    }

    /// Sets the media-location field
    pub fn set_media_location(&mut self, media_location: &str) {
        self.draft.media_location = media_location.to_string();
    }

    /// Returns true while confirming is available
    ///
    /// OK is offered only while editing and only with a non-empty name.
    #[must_use]
    pub fn confirm_enabled(&self) -> bool {
        self.state == WizardState::Editing && !self.draft.name.is_empty()
    }

    /// Validates the candidate and commits it on success
    ///
    /// Transitions `Editing -> Validating`, probes connectivity, and on a
    /// valid result upserts the candidate, marks it active, and persists the
    /// store. A failed probe or a failed persist returns the wizard to
    /// `Editing` with the set exactly as it was.
    pub async fn confirm(&mut self) -> ConfirmOutcome {
        if !self.confirm_enabled() {
            return ConfirmOutcome::NotReady;
        }

        self.state = WizardState::Validating;
        info!("Verifying database settings for profile `{}`", self.draft.name);

        let valid = self.validator.validate(&self.draft).await;
        if !valid {
            self.state = WizardState::Editing;
            return ConfirmOutcome::ConnectionInvalid;
        }

        let name = self.draft.name.clone();
        let previous = self.profiles.get(&name).cloned();
        let previous_active = self.profiles.active_name().map(ToOwned::to_owned);

        self.profiles.upsert(self.draft.clone());
        self.profiles.set_active(&name);

        if let Err(e) = self.store.save(self.profiles) {
            warn!("Failed to persist profile `{name}`: {e}");
            match previous {
                Some(profile) => self.profiles.upsert(profile),
                None => {
                    self.profiles.remove(&name);
                }
            }
            match previous_active {
                Some(active) => {
                    self.profiles.set_active(&active);
                }
                None => self.profiles.clear_active(),
            }
            self.state = WizardState::Editing;
            return ConfirmOutcome::StoreFailed;
        }

        self.state = WizardState::Accepted;
        ConfirmOutcome::Accepted
    }

    /// Dismisses the wizard without committing
    pub fn cancel(&mut self) {
        if self.state == WizardState::Editing {
            self.state = WizardState::Cancelled;
        }
    }
}
