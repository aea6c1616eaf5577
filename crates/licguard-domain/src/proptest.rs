//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Verdict precedence (whitelist, blacklist, exceptions)
//! - Independence from policy list ordering
//! - Audit and attribution completeness

use crate::audit::{AuditError, AuditResult, run_audit};
use crate::evaluate::{LicenseVerdict, evaluate};
use crate::model::{DependencyId, LicenseClassification, LicenseInventory};
use crate::policy::LicensePolicy;
use proptest::prelude::*;
use rand::seq::SliceRandom;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// License types drawn from a small pool so lists and inventories overlap often.
fn arb_license_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("MIT".to_string()),
        Just("Apache-2.0".to_string()),
        Just("BSD-3-Clause".to_string()),
        Just("GPL-3.0".to_string()),
        Just("LGPL-2.1".to_string()),
        Just("MPL-2.0".to_string()),
    ]
}

/// Import-path-like dependency ids.
fn arb_dep_id() -> impl Strategy<Value = String> {
    prop::string::string_regex("(github\\.com|golang\\.org)/[a-c]{1,2}(/[a-c]{1,2}){0,2}")
        .expect("valid regex")
}

fn arb_exception() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_dep_id(),
        arb_dep_id().prop_map(|id| format!("{id}/...")),
    ]
}

fn arb_inventory() -> impl Strategy<Value = LicenseInventory> {
    prop::collection::btree_map(
        arb_dep_id().prop_map(DependencyId::new),
        arb_license_type().prop_map(|ty| {
            let text = format!("text for {ty}");
            LicenseClassification::new(ty, text)
        }),
        0..12,
    )
}

#[derive(Clone, Debug)]
struct RawPolicy {
    whitelist: Vec<String>,
    blacklist: Vec<String>,
    exceptions: Vec<String>,
}

impl RawPolicy {
    fn build(&self) -> LicensePolicy {
        LicensePolicy::build(&self.whitelist, &self.blacklist, &self.exceptions)
    }
}

fn arb_raw_policy() -> impl Strategy<Value = RawPolicy> {
    (
        prop::collection::vec(arb_license_type(), 0..5),
        prop::collection::vec(arb_license_type(), 0..3),
        prop::collection::vec(arb_exception(), 0..4),
    )
        .prop_map(|(whitelist, blacklist, exceptions)| RawPolicy {
            whitelist,
            blacklist,
            exceptions,
        })
}

fn audit_result(inventory: &LicenseInventory, policy: &LicensePolicy) -> AuditResult {
    match run_audit(inventory, policy, None) {
        Ok(result) => result,
        Err(AuditError::PolicyViolation { result, .. }) => result,
        Err(other) => panic!("unexpected audit error: {other}"),
    }
}

// ============================================================================
// Verdict precedence
// ============================================================================

proptest! {
    #[test]
    fn whitelisted_and_not_blacklisted_is_approved(
        dep in arb_dep_id(),
        ty in arb_license_type(),
        raw in arb_raw_policy(),
    ) {
        let mut raw = raw;
        raw.whitelist.push(ty.clone());
        raw.blacklist.retain(|b| b != &ty);
        let policy = raw.build();

        let verdict = evaluate(&DependencyId::new(dep), &LicenseClassification::of_type(ty.clone()), &policy);
        if ty.is_empty() {
            prop_assert_ne!(verdict, LicenseVerdict::Approved);
        } else {
            prop_assert_eq!(verdict, LicenseVerdict::Approved);
        }
    }

    #[test]
    fn blacklisted_is_never_approved(
        dep in arb_dep_id(),
        ty in arb_license_type(),
        raw in arb_raw_policy(),
    ) {
        let mut raw = raw;
        raw.whitelist.push(ty.clone());
        raw.blacklist.push(ty.clone());
        let policy = raw.build();

        let verdict = evaluate(&DependencyId::new(dep), &LicenseClassification::of_type(ty), &policy);
        prop_assert_ne!(verdict, LicenseVerdict::Approved);
    }

    #[test]
    fn exact_exception_is_never_non_approved(
        dep in arb_dep_id(),
        ty in arb_license_type(),
        raw in arb_raw_policy(),
    ) {
        let mut raw = raw;
        raw.exceptions.push(dep.clone());
        let policy = raw.build();

        let verdict = evaluate(&DependencyId::new(dep), &LicenseClassification::of_type(ty), &policy);
        prop_assert!(!verdict.is_non_approved());
    }

    #[test]
    fn wildcard_prefix_exception_covers_nested_ids(
        prefix in arb_dep_id(),
        suffix in "[a-z]{1,4}(/[a-z]{1,4}){0,2}",
        ty in arb_license_type(),
    ) {
        let policy = LicensePolicy::build(
            Vec::<String>::new(),
            Vec::<String>::new(),
            [format!("{prefix}/...")],
        );
        let dep = DependencyId::new(format!("{prefix}/{suffix}"));

        let verdict = evaluate(&dep, &LicenseClassification::of_type(ty), &policy);
        prop_assert_eq!(verdict, LicenseVerdict::Exceptioned);
    }

    #[test]
    fn evaluate_is_idempotent(
        dep in arb_dep_id(),
        ty in arb_license_type(),
        raw in arb_raw_policy(),
    ) {
        let policy = raw.build();
        let dep = DependencyId::new(dep);
        let lic = LicenseClassification::of_type(ty);

        prop_assert_eq!(evaluate(&dep, &lic, &policy), evaluate(&dep, &lic, &policy));
    }
}

// ============================================================================
// Ordering independence
// ============================================================================

proptest! {
    #[test]
    fn list_order_does_not_change_verdicts(
        inventory in arb_inventory(),
        raw in arb_raw_policy(),
    ) {
        let original = audit_result(&inventory, &raw.build());

        let mut shuffled = raw.clone();
        shuffled.whitelist.reverse();
        shuffled.blacklist.reverse();
        shuffled.exceptions.reverse();
        let reordered = audit_result(&inventory, &shuffled.build());

        prop_assert_eq!(original, reordered);
    }

    #[test]
    fn shuffled_exceptions_give_the_same_verdicts(
        inventory in arb_inventory(),
        exceptions in prop::collection::vec(arb_exception(), 0..6).prop_shuffle(),
    ) {
        let mut sorted = exceptions.clone();
        sorted.sort();

        let a = LicensePolicy::build(["MIT"], ["GPL-3.0"], &exceptions);
        let b = LicensePolicy::build(["MIT"], ["GPL-3.0"], &sorted);

        prop_assert_eq!(audit_result(&inventory, &a), audit_result(&inventory, &b));
    }
}

// ============================================================================
// Completeness
// ============================================================================

proptest! {
    #[test]
    fn one_verdict_per_dependency(
        inventory in arb_inventory(),
        raw in arb_raw_policy(),
    ) {
        let result = audit_result(&inventory, &raw.build());

        prop_assert_eq!(result.verdicts.len(), inventory.len());
        let ids: Vec<&DependencyId> = result.verdicts.iter().map(|v| &v.dependency).collect();
        let expected: Vec<&DependencyId> = inventory.keys().collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn attribution_has_one_entry_per_dependency(
        inventory in arb_inventory(),
        raw in arb_raw_policy(),
    ) {
        let mut buf = Vec::new();
        let result = match run_audit(&inventory, &raw.build(), Some(&mut buf)) {
            Ok(result) => result,
            Err(AuditError::PolicyViolation { result, .. }) => result,
            Err(other) => panic!("unexpected audit error: {other}"),
        };

        prop_assert_eq!(result.attribution_entries, Some(inventory.len()));
        let out = String::from_utf8(buf).expect("utf8");
        prop_assert_eq!(
            out.matches("The following software may be included in this product:").count(),
            inventory.len()
        );
    }

    #[test]
    fn aggregate_fails_iff_some_dependency_is_non_approved(
        inventory in arb_inventory(),
        raw in arb_raw_policy(),
    ) {
        let policy = raw.build();
        let any_non_approved = inventory
            .iter()
            .any(|(dep, lic)| evaluate(dep, lic, &policy).is_non_approved());

        let outcome = run_audit(&inventory, &policy, None);
        prop_assert_eq!(outcome.is_err(), any_non_approved);
    }
}

#[test]
fn random_insertion_order_keeps_wildcard_verdict_deterministic() {
    let inventory: LicenseInventory = [
        ("github.com/foo/bar", "GPL-3.0"),
        ("github.com/baz/qux", "GPL-3.0"),
        ("golang.org/x/net", "BSD-3-Clause"),
    ]
    .into_iter()
    .map(|(d, t)| (DependencyId::from(d), LicenseClassification::of_type(t)))
    .collect();

    let mut exceptions = vec![
        "github.com/foo/...".to_string(),
        "github.com/...".to_string(),
        "github.com/baz/...".to_string(),
        "golang.org/x/net".to_string(),
    ];
    let mut rng = rand::rng();

    let baseline = audit_result(
        &inventory,
        &LicensePolicy::build(["MIT"], Vec::<&str>::new(), &exceptions),
    );
    assert!(baseline.is_success());
    assert!(
        baseline
            .verdicts
            .iter()
            .all(|v| v.verdict == LicenseVerdict::Exceptioned)
    );

    for _ in 0..32 {
        exceptions.shuffle(&mut rng);
        let policy = LicensePolicy::build(["MIT"], Vec::<&str>::new(), &exceptions);
        assert_eq!(audit_result(&inventory, &policy), baseline);
    }
}
