//! Top-level database-profile selection flow
//!
//! Decides which profile the application runs with: forces first-run profile
//! creation on an empty store, otherwise loops a chooser over the stored
//! names plus a "new profile" sentinel until a profile is active or the user
//! abandons the selection.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::Profile;
use crate::store::ProfileStore;
use crate::validator::ConnectionValidator;
use crate::wizard::{ProfileWizard, WizardState};

/// One entry from the profile chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileChoice {
    /// An existing profile, by name
    Existing(String),
    /// The "new profile" sentinel
    NewProfile,
}

/// How the selection flow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A profile was made active; the application can connect
    Selected(Profile),
    /// The user abandoned selection with no profile to run with
    ///
    /// The caller exits the process with a neutral status.
    Abandoned,
}

/// Capability trait the rendering layer implements for this flow
///
/// The flow invokes the frontend, never the reverse: the frontend presents
/// whatever it is handed and reports the user's decisions back.
#[async_trait]
pub trait SelectionFrontend {
    /// Presents the stored profile names plus the new-profile sentinel
    ///
    /// Returns `None` when the chooser itself is dismissed.
    fn choose_profile(&mut self, names: &[String]) -> Option<ProfileChoice>;

    /// Drives a profile wizard until it is accepted or cancelled
    async fn run_wizard(&mut self, wizard: &mut ProfileWizard<'_>);
}

/// Selects the database profile the application should run with
///
/// Implements the selection loop: empty store forces profile creation;
/// choosing an existing name marks it active; choosing "new profile" runs
/// the wizard; a cancelled wizard loops back to the chooser while other
/// profiles exist. There is no retry limit, the loop only ends in a selected
/// profile or an abandoned flow.
pub async fn select_database<F>(
    store: &ProfileStore,
    validator: &ConnectionValidator,
    frontend: &mut F,
) -> SelectOutcome
where
    F: SelectionFrontend + Send,
{
    let mut profiles = store.load_or_default();

    if profiles.is_empty() {
        let state = {
            let mut wizard = ProfileWizard::new(&mut profiles, store, validator);
            frontend.run_wizard(&mut wizard).await;
            wizard.state()
        };
        if state != WizardState::Accepted && profiles.is_empty() {
            return SelectOutcome::Abandoned;
        }
    }

    loop {
        let names = profiles.names();
        match frontend.choose_profile(&names) {
            None => return SelectOutcome::Abandoned,
            Some(ProfileChoice::Existing(name)) => {
                let Some(profile) = profiles.get(&name).cloned() else {
                    warn!("Chooser returned unknown profile `{name}`");
                    continue;
                };
                profiles.set_active(&name);
                if let Err(e) = store.save(&profiles) {
                    warn!("Failed to persist active profile `{name}`: {e}");
                }
                info!("Using database profile `{name}`");
                return SelectOutcome::Selected(profile);
            }
            Some(ProfileChoice::NewProfile) => {
                let state = {
                    let mut wizard = ProfileWizard::new(&mut profiles, store, validator);
                    frontend.run_wizard(&mut wizard).await;
                    wizard.state()
                };
                if state == WizardState::Accepted {
                    if let Some(profile) = profiles.active().cloned() {
                        info!("Using database profile `{}`", profile.name);
                        return SelectOutcome::Selected(profile);
                    }
                }
                if profiles.is_empty() {
                    return SelectOutcome::Abandoned;
                }
                // wizard dismissed: offer the chooser again
            }
        }
    }
}
