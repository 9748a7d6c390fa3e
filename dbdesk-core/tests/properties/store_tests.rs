//! Property-based tests for profile-store persistence

use proptest::prelude::*;
use tempfile::TempDir;

use dbdesk_core::{Profile, ProfileStore};

/// Strategy for valid profile names
fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,15}"
}

/// Strategy for hosts
fn arb_host() -> impl Strategy<Value = String> {
    "[a-z0-9.-]{0,24}"
}

/// Strategy for free-form field values, printable ASCII
fn arb_value() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Upserting a profile, saving, and loading yields a mapping containing
    /// exactly that profile under its name.
    #[test]
    fn save_then_load_round_trips(
        name in arb_name(),
        host in arb_host(),
        port in "[0-9]{0,5}",
        database in arb_value(),
        user in arb_value(),
        password in arb_value(),
        media_location in arb_value(),
    ) {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::with_config_dir(temp.path().to_path_buf());

        let mut profile = Profile::new(name.clone());
        profile.host = host;
        profile.port = port;
        profile.database = database;
        profile.user = user;
        profile.password = password;
        profile.media_location = media_location;

        let mut set = store.load_or_default();
        set.upsert(profile.clone());
        store.save(&set).unwrap();

        let loaded = store.load().unwrap();
        prop_assert_eq!(loaded.get(&name), Some(&profile));
    }

    /// The active marker survives the round trip whenever it is set.
    #[test]
    fn active_marker_round_trips(names in prop::collection::btree_set(arb_name(), 1..5)) {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::with_config_dir(temp.path().to_path_buf());

        let mut set = store.load_or_default();
        for name in &names {
            set.upsert(Profile::new(name.clone()));
        }
        let chosen = names.iter().next().unwrap().clone();
        prop_assert!(set.set_active(&chosen));
        store.save(&set).unwrap();

        let loaded = store.load().unwrap();
        prop_assert_eq!(loaded.len(), names.len());
        prop_assert_eq!(loaded.active_name(), Some(chosen.as_str()));
    }
}
