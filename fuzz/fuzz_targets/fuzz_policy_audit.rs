//! Fuzz target for policy evaluation and attribution output.
//!
//! Invariants checked on arbitrary policies and inventories:
//! - one verdict and one attribution entry per dependency
//! - the audit fails iff some dependency is non-approved
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_audit
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use licguard_domain::{
    AuditError, DependencyId, LicenseClassification, LicenseInventory, LicensePolicy, run_audit,
};

#[derive(Arbitrary, Debug)]
struct Input {
    whitelist: Vec<String>,
    blacklist: Vec<String>,
    exceptions: Vec<String>,
    dependencies: Vec<(String, String, String)>,
}

fuzz_target!(|input: Input| {
    let policy = LicensePolicy::build(&input.whitelist, &input.blacklist, &input.exceptions);
    let inventory: LicenseInventory = input
        .dependencies
        .into_iter()
        .map(|(id, ty, text)| (DependencyId::new(id), LicenseClassification::new(ty, text)))
        .collect();

    let mut sink = Vec::new();
    let result = match run_audit(&inventory, &policy, Some(&mut sink)) {
        Ok(result) => result,
        Err(AuditError::PolicyViolation { violations, result }) => {
            assert!(!violations.is_empty());
            assert_eq!(violations.len(), result.violations().count());
            result
        }
        Err(AuditError::ReportWrite { source, .. }) => {
            panic!("in-memory sink cannot fail: {source}")
        }
    };

    assert_eq!(result.verdicts.len(), inventory.len());
    assert_eq!(result.attribution_entries, Some(inventory.len()));
});
