//! Property-based tests using proptest
//!
//! These tests verify the status merge law, threshold regions and output
//! sanitization over arbitrary inputs.

use monitoring_plugin::{
    InvalidCharacterPolicy, MetricPoint, MetricStore, Response, Status, Thresholds,
};
use proptest::prelude::*;

fn any_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Ok),
        Just(Status::Warning),
        Just(Status::Critical),
        Just(Status::Unknown),
    ]
}

// =============================================================================
// 1. Status merge
// =============================================================================

proptest! {
    #[test]
    fn prop_merge_critical_absorbs_else_max_code(codes in prop::collection::vec(-5i64..10, 0..20)) {
        let mut response = Response::new("");
        for code in &codes {
            response.update_status_code(*code, "");
        }
        let clamped: Vec<Status> = codes.iter().map(|c| Status::from_code(*c)).collect();
        let expected = if clamped.contains(&Status::Critical) {
            Status::Critical
        } else {
            clamped
                .iter()
                .copied()
                .max_by_key(|s| s.code())
                .unwrap_or(Status::Ok)
        };
        prop_assert_eq!(response.status(), expected);
        prop_assert!((0..=3).contains(&response.exit_code()));
    }

    #[test]
    fn prop_merge_idempotent(s in any_status()) {
        prop_assert_eq!(s.merge(s), s);
    }

    #[test]
    fn prop_critical_is_terminal(rest in prop::collection::vec(any_status(), 0..10)) {
        let status = rest.iter().fold(Status::Critical, |acc, s| acc.merge(*s));
        prop_assert_eq!(status, Status::Critical);
    }
}

// =============================================================================
// 2. Thresholds
// =============================================================================

proptest! {
    #[test]
    fn prop_no_thresholds_always_ok(v in any::<f64>()) {
        prop_assert_eq!(Thresholds::default().check_value(v), Status::Ok);
    }

    #[test]
    fn prop_threshold_regions(
        bounds in prop::array::uniform4(-1000i64..1000),
        v in -2000i64..2000,
    ) {
        let mut bounds = bounds;
        bounds.sort();
        let [crit_min, warn_min, warn_max, crit_max] = bounds;
        let th = Thresholds::new(warn_min, warn_max, crit_min, crit_max);
        prop_assert!(th.validate().is_ok());

        let expected = if v < crit_min || v > crit_max {
            Status::Critical
        } else if v < warn_min || v > warn_max {
            Status::Warning
        } else {
            Status::Ok
        };
        prop_assert_eq!(th.check_value(v), expected);

        // bounds themselves are never flagged as the severity they delimit
        prop_assert_ne!(th.check_value(crit_min), Status::Critical);
        prop_assert_ne!(th.check_value(crit_max), Status::Critical);
        prop_assert_eq!(th.check_value(warn_min), Status::Ok);
        prop_assert_eq!(th.check_value(warn_max), Status::Ok);
    }
}

// =============================================================================
// 3. Metric store and output
// =============================================================================

proptest! {
    #[test]
    fn prop_duplicate_key_rejected(name in "[a-z_]{1,12}", label in "[a-z0-9/]{0,8}") {
        let mut store = MetricStore::new();
        prop_assert!(store.add(MetricPoint::new(name.clone(), 1).with_label(label.clone())).is_ok());
        prop_assert!(store.add(MetricPoint::new(name.clone(), 2).with_label(label.clone())).is_err());
        let other = format!("{}x", label);
        prop_assert!(store.add(MetricPoint::new(name, 3).with_label(other)).is_ok());
    }

    #[test]
    fn prop_messages_never_leak_separator(
        messages in prop::collection::vec((any_status(), ".*"), 0..8),
        policy in prop_oneof![
            Just(InvalidCharacterPolicy::Remove),
            Just(InvalidCharacterPolicy::RemoveMessage),
            Just(InvalidCharacterPolicy::ReplaceMessage),
            Just(InvalidCharacterPolicy::ReplaceMessageAndSetUnknown),
        ],
        default_ok in ".*",
    ) {
        let mut response = Response::new(default_ok);
        response.set_invalid_character_behavior(policy, "").unwrap();
        for (status, message) in &messages {
            response.update_status(*status, message.clone());
        }
        let output = response.output();
        prop_assert!(!output.contains('|'), "separator leaked: {:?}", output);
    }

    #[test]
    fn prop_sorting_keeps_messages(statuses in prop::collection::vec(any_status(), 0..12)) {
        let mut response = Response::new("");
        response.set_sort_messages_by_severity(true);
        for (i, status) in statuses.iter().enumerate() {
            response.update_status(*status, format!("m{}", i));
        }
        response.finalize();
        let sorted = response.messages();
        prop_assert_eq!(sorted.len(), statuses.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].status >= pair[1].status);
        }
    }
}
