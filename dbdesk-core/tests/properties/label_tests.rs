//! Property-based tests for backup-label generation

use proptest::prelude::*;

use dbdesk_core::{default_backup_label, sanitize_label};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any prefix and any printable timestamp rendering, the generated
    /// label contains only characters safe in file names.
    #[test]
    fn labels_are_filesystem_safe(
        prefix in "[ -~]{1,12}",
        timestamp in "[ -~]{0,24}",
    ) {
        let label = default_backup_label(&prefix, &timestamp);
        prop_assert!(
            label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "unexpected character in label {label:?}"
        );
    }

    /// Label generation is deterministic given prefix and timestamp.
    #[test]
    fn labels_are_deterministic(
        prefix in "[a-zA-Z0-9]{1,12}",
        timestamp in "[ -~]{0,24}",
    ) {
        prop_assert_eq!(
            default_backup_label(&prefix, &timestamp),
            default_backup_label(&prefix, &timestamp)
        );
    }

    /// Sanitizing preserves length and every alphanumeric character.
    #[test]
    fn sanitize_preserves_alphanumerics(timestamp in "[ -~]{0,32}") {
        let sanitized = sanitize_label(&timestamp);
        prop_assert_eq!(sanitized.chars().count(), timestamp.chars().count());
        for (original, mapped) in timestamp.chars().zip(sanitized.chars()) {
            if original.is_ascii_alphanumeric() {
                prop_assert_eq!(original, mapped);
            } else {
                prop_assert_eq!(mapped, '_');
            }
        }
    }
}

#[test]
fn locale_short_format_example() {
    assert_eq!(
        default_backup_label("nightly", "03/14/25 9:05"),
        "nightly-03_14_25_9_05"
    );
}
