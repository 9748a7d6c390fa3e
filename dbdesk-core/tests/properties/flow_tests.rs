//! Tests for the top-level database-profile selection flow
//!
//! A scripted frontend stands in for the rendering layer: it replays a fixed
//! sequence of chooser decisions and wizard actions and records what it was
//! shown.

use std::collections::VecDeque;

use async_trait::async_trait;
use tempfile::TempDir;

use dbdesk_core::{
    select_database, ConnectionValidator, Profile, ProfileChoice, ProfileStore, ProfileWizard,
    SelectOutcome, SelectionFrontend, WizardState,
};

use super::fixtures::FixedEngine;

/// One scripted wizard interaction
enum WizardAction {
    /// Fill in a profile of this name and confirm
    Create(String),
    /// Dismiss the wizard
    Cancel,
}

struct ScriptedFrontend {
    choices: VecDeque<Option<ProfileChoice>>,
    wizard_actions: VecDeque<WizardAction>,
    wizard_runs: usize,
    offered_names: Vec<Vec<String>>,
}

impl ScriptedFrontend {
    fn new(
        choices: Vec<Option<ProfileChoice>>,
        wizard_actions: Vec<WizardAction>,
    ) -> Self {
        Self {
            choices: choices.into(),
            wizard_actions: wizard_actions.into(),
            wizard_runs: 0,
            offered_names: Vec::new(),
        }
    }
}

#[async_trait]
impl SelectionFrontend for ScriptedFrontend {
    fn choose_profile(&mut self, names: &[String]) -> Option<ProfileChoice> {
        self.offered_names.push(names.to_vec());
        self.choices.pop_front().unwrap_or(None)
    }

    async fn run_wizard(&mut self, wizard: &mut ProfileWizard<'_>) {
        self.wizard_runs += 1;
        match self.wizard_actions.pop_front() {
            Some(WizardAction::Create(name)) => {
                wizard.set_name(&name);
                wizard.set_host("db.internal");
                wizard.set_database("app");
                let _ = wizard.confirm().await;
                if wizard.state() != WizardState::Accepted {
                    wizard.cancel();
                }
            }
            Some(WizardAction::Cancel) | None => wizard.cancel(),
        }
    }
}

fn store_with(profiles: &[&str]) -> (ProfileStore, TempDir) {
    let temp = TempDir::new().unwrap();
    let store = ProfileStore::with_config_dir(temp.path().to_path_buf());
    if !profiles.is_empty() {
        let mut set = store.load_or_default();
        for name in profiles {
            set.upsert(Profile::new(*name).with_host("db.internal"));
        }
        store.save(&set).unwrap();
    }
    (store, temp)
}

#[tokio::test]
async fn empty_store_and_cancelled_wizard_abandons() {
    let (store, _temp) = store_with(&[]);
    let validator = ConnectionValidator::new(FixedEngine::reachable());
    let mut frontend = ScriptedFrontend::new(vec![], vec![WizardAction::Cancel]);

    let outcome = select_database(&store, &validator, &mut frontend).await;

    assert_eq!(outcome, SelectOutcome::Abandoned);
    assert_eq!(frontend.wizard_runs, 1);
    assert!(store.load().unwrap().is_empty());
    // the chooser was never reached
    assert!(frontend.offered_names.is_empty());
}

#[tokio::test]
async fn empty_store_forces_creation_before_choice() {
    let (store, _temp) = store_with(&[]);
    let validator = ConnectionValidator::new(FixedEngine::reachable());
    let mut frontend = ScriptedFrontend::new(
        vec![Some(ProfileChoice::Existing("prod".to_string()))],
        vec![WizardAction::Create("prod".to_string())],
    );

    let outcome = select_database(&store, &validator, &mut frontend).await;

    let SelectOutcome::Selected(profile) = outcome else {
        panic!("expected a selected profile");
    };
    assert_eq!(profile.name, "prod");
    assert_eq!(frontend.wizard_runs, 1);
    assert_eq!(frontend.offered_names, vec![vec!["prod".to_string()]]);
    assert_eq!(store.load().unwrap().active_name(), Some("prod"));
}

#[tokio::test]
async fn existing_profile_selected_without_wizard() {
    let (store, _temp) = store_with(&["prod", "staging"]);
    let validator = ConnectionValidator::new(FixedEngine::reachable());
    let mut frontend = ScriptedFrontend::new(
        vec![Some(ProfileChoice::Existing("prod".to_string()))],
        vec![],
    );

    let outcome = select_database(&store, &validator, &mut frontend).await;

    let SelectOutcome::Selected(profile) = outcome else {
        panic!("expected a selected profile");
    };
    assert_eq!(profile.name, "prod");
    assert_eq!(profile.host, "db.internal");
    assert_eq!(frontend.wizard_runs, 0);
    // names are offered sorted
    assert_eq!(
        frontend.offered_names,
        vec![vec!["prod".to_string(), "staging".to_string()]]
    );
    assert_eq!(store.load().unwrap().active_name(), Some("prod"));
}

#[tokio::test]
async fn cancelled_wizard_loops_back_to_chooser() {
    let (store, _temp) = store_with(&["prod"]);
    let validator = ConnectionValidator::new(FixedEngine::reachable());
    let mut frontend = ScriptedFrontend::new(
        vec![
            Some(ProfileChoice::NewProfile),
            Some(ProfileChoice::Existing("prod".to_string())),
        ],
        vec![WizardAction::Cancel],
    );

    let outcome = select_database(&store, &validator, &mut frontend).await;

    let SelectOutcome::Selected(profile) = outcome else {
        panic!("expected a selected profile");
    };
    assert_eq!(profile.name, "prod");
    assert_eq!(frontend.wizard_runs, 1);
    assert_eq!(frontend.offered_names.len(), 2);
}

#[tokio::test]
async fn new_profile_accepted_is_selected() {
    let (store, _temp) = store_with(&["prod"]);
    let validator = ConnectionValidator::new(FixedEngine::reachable());
    let mut frontend = ScriptedFrontend::new(
        vec![Some(ProfileChoice::NewProfile)],
        vec![WizardAction::Create("edge".to_string())],
    );

    let outcome = select_database(&store, &validator, &mut frontend).await;

    let SelectOutcome::Selected(profile) = outcome else {
        panic!("expected a selected profile");
    };
    assert_eq!(profile.name, "edge");
    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.active_name(), Some("edge"));
}

#[tokio::test]
async fn dismissed_chooser_abandons() {
    let (store, _temp) = store_with(&["prod"]);
    let validator = ConnectionValidator::new(FixedEngine::reachable());
    let mut frontend = ScriptedFrontend::new(vec![None], vec![]);

    let outcome = select_database(&store, &validator, &mut frontend).await;

    assert_eq!(outcome, SelectOutcome::Abandoned);
    // the active marker was never set
    assert!(store.load().unwrap().active_name().is_none());
}

#[tokio::test]
async fn unreachable_host_keeps_store_empty() {
    let (store, _temp) = store_with(&[]);
    let validator = ConnectionValidator::new(FixedEngine::unreachable());
    let mut frontend = ScriptedFrontend::new(
        vec![],
        vec![WizardAction::Create("prod".to_string())],
    );

    let outcome = select_database(&store, &validator, &mut frontend).await;

    // validation failed, the scripted wizard gave up, nothing was created
    assert_eq!(outcome, SelectOutcome::Abandoned);
    assert!(store.load().unwrap().is_empty());
}
