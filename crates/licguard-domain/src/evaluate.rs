//! Per-dependency verdicts.
//!
//! The decision is an ordered rule list; the first rule that yields a verdict wins.
//! Anything no rule accepts is non-approved.

use crate::model::{DependencyId, LicenseClassification};
use crate::policy::LicensePolicy;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NonApprovedReason {
    /// The license type is blacklisted (possibly also whitelisted).
    Denied,
    /// The license type was recognized but is not whitelisted.
    Unlisted,
    /// No license type was recognized.
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum LicenseVerdict {
    Approved,
    Exceptioned,
    /// Advisory only: produced by [`advise`] in list mode, never by [`evaluate`].
    Unrecognized,
    NonApproved(NonApprovedReason),
}

impl LicenseVerdict {
    pub fn is_non_approved(&self) -> bool {
        matches!(self, LicenseVerdict::NonApproved(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseVerdict::Approved => "approved",
            LicenseVerdict::Exceptioned => "exceptioned",
            LicenseVerdict::Unrecognized => "unrecognized",
            LicenseVerdict::NonApproved(_) => "non_approved",
        }
    }
}

type Rule = fn(&DependencyId, &LicenseClassification, &LicensePolicy) -> Option<LicenseVerdict>;

const RULES: &[Rule] = &[approved, exceptioned];

fn approved(
    _dep: &DependencyId,
    lic: &LicenseClassification,
    policy: &LicensePolicy,
) -> Option<LicenseVerdict> {
    let approved = lic.recognized()
        && policy.is_whitelisted(&lic.license_type)
        && !policy.is_blacklisted(&lic.license_type);
    approved.then_some(LicenseVerdict::Approved)
}

fn exceptioned(
    dep: &DependencyId,
    _lic: &LicenseClassification,
    policy: &LicensePolicy,
) -> Option<LicenseVerdict> {
    policy
        .exceptions
        .covers(dep)
        .then_some(LicenseVerdict::Exceptioned)
}

fn non_approved_reason(lic: &LicenseClassification, policy: &LicensePolicy) -> NonApprovedReason {
    if !lic.recognized() {
        NonApprovedReason::Unrecognized
    } else if policy.is_blacklisted(&lic.license_type) {
        NonApprovedReason::Denied
    } else {
        NonApprovedReason::Unlisted
    }
}

/// Decide the verdict for one dependency. Pure: same inputs, same verdict.
pub fn evaluate(
    dep: &DependencyId,
    lic: &LicenseClassification,
    policy: &LicensePolicy,
) -> LicenseVerdict {
    RULES
        .iter()
        .find_map(|rule| rule(dep, lic, policy))
        .unwrap_or_else(|| LicenseVerdict::NonApproved(non_approved_reason(lic, policy)))
}

/// Policy-free classification used when only listing licenses.
pub fn advise(lic: &LicenseClassification) -> Option<LicenseVerdict> {
    (!lic.recognized()).then_some(LicenseVerdict::Unrecognized)
}
