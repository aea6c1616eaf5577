//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after policy config examples.
    pub examples: ExamplePair,
}

/// Before and after config examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Config that would trigger a finding.
    pub before: &'static str,
    /// Config that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_LICENSE_POLICY => Some(explain_license_policy()),
        ids::CHECK_LICENSE_EXCEPTIONS => Some(explain_license_exceptions()),

        // Codes
        ids::CODE_DENIED_LICENSE => Some(explain_denied_license()),
        ids::CODE_UNLISTED_LICENSE => Some(explain_unlisted_license()),
        ids::CODE_UNRECOGNIZED_LICENSE => Some(explain_unrecognized_license()),
        ids::CODE_EXCEPTIONED_DEPENDENCY => Some(explain_exceptioned_dependency()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_LICENSE_POLICY, ids::CHECK_LICENSE_EXCEPTIONS]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_DENIED_LICENSE,
        ids::CODE_UNLISTED_LICENSE,
        ids::CODE_UNRECOGNIZED_LICENSE,
        ids::CODE_EXCEPTIONED_DEPENDENCY,
    ]
}

// --- Check-level explanations ---

fn explain_license_policy() -> Explanation {
    Explanation {
        title: "License Policy",
        description: "\
Evaluates the detected license of every dependency against the policy's
whitelist and blacklist.

A dependency passes when its license type is whitelisted and not blacklisted.
The blacklist always wins: a type listed in both is treated as denied.
Dependencies whose license could not be recognized never pass on their own,
because an empty license type is never whitelisted.

Every dependency is evaluated, so a failing run reports all violations at once.",
        remediation: "\
For each violation, pick one:
- Add the license type to `whitelist` if your organization accepts it
- Remove the license type from `blacklist` if it was denied by mistake
- Add the dependency to `exceptions` after a manual legal review
- Replace the dependency with one under an approved license",
        examples: ExamplePair {
            before: r#"whitelist = ["MIT"]
blacklist = []
exceptions = []"#,
            after: r#"whitelist = ["MIT", "Apache-2.0", "BSD-3-Clause"]
blacklist = ["GPL-3.0"]
exceptions = []"#,
        },
    }
}

fn explain_license_exceptions() -> Explanation {
    Explanation {
        title: "License Exceptions",
        description: "\
Reports dependencies that were accepted only because they match an entry in
`exceptions`, bypassing license-type evaluation.

An exception is either an exact dependency identifier or a prefix pattern ending
in `/...`, which covers the identifier and everything nested under it. The
prefix is matched as a plain string prefix.

Exceptioned dependencies are reported as warnings so reviewers can keep the list
short and current; they never fail the run.",
        remediation: "\
Review each exception periodically:
- Remove entries for dependencies that are no longer used
- Remove entries whose license is now whitelisted
- Prefer exact identifiers over `/...` patterns so new nested packages are evaluated",
        examples: ExamplePair {
            before: r#"exceptions = ["github.com/acme/..."]"#,
            after: r#"exceptions = ["github.com/acme/internal-tool"]"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_denied_license() -> Explanation {
    Explanation {
        title: "Denied License",
        description: "\
The dependency's license type is listed in `blacklist`.

The blacklist overrides the whitelist, so this finding is raised even when the
same type is also whitelisted.",
        remediation: "\
Replace the dependency, obtain a legal exception and add the dependency to
`exceptions`, or remove the type from `blacklist` if the policy has changed.",
        examples: ExamplePair {
            before: r#"whitelist = ["MIT", "GPL-3.0"]
blacklist = ["GPL-3.0"]"#,
            after: r#"whitelist = ["MIT"]
blacklist = ["GPL-3.0"]
exceptions = ["github.com/acme/gpl-tool"]"#,
        },
    }
}

fn explain_unlisted_license() -> Explanation {
    Explanation {
        title: "Unlisted License",
        description: "\
The dependency's license was recognized, but its type is not in `whitelist`.

The policy is declarative: anything it does not approve is not approved.",
        remediation: "\
Add the license type to `whitelist` once it has been reviewed, or add the
dependency to `exceptions`.",
        examples: ExamplePair {
            before: r#"whitelist = ["MIT"]"#,
            after: r#"whitelist = ["MIT", "ISC"]"#,
        },
    }
}

fn explain_unrecognized_license() -> Explanation {
    Explanation {
        title: "Unrecognized License",
        description: "\
No license type could be determined for the dependency.

The license detector found no license file, or found text it could not
classify. An unrecognized license is never whitelisted.",
        remediation: "\
Inspect the dependency's source manually. If its license is acceptable, add the
dependency to `exceptions`; otherwise replace it.",
        examples: ExamplePair {
            before: r#"exceptions = []"#,
            after: r#"exceptions = ["github.com/acme/unlicensed-helper"]"#,
        },
    }
}

fn explain_exceptioned_dependency() -> Explanation {
    let mut exp = explain_license_exceptions();
    exp.title = "Exceptioned Dependency";
    exp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_check_id() {
        assert!(lookup_explanation(ids::CHECK_LICENSE_POLICY).is_some());
        assert!(lookup_explanation(ids::CHECK_LICENSE_EXCEPTIONS).is_some());
    }

    #[test]
    fn lookup_by_code() {
        assert!(lookup_explanation(ids::CODE_DENIED_LICENSE).is_some());
        assert!(lookup_explanation(ids::CODE_UNLISTED_LICENSE).is_some());
        assert!(lookup_explanation(ids::CODE_UNRECOGNIZED_LICENSE).is_some());
        assert!(lookup_explanation(ids::CODE_EXCEPTIONED_DEPENDENCY).is_some());
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("unknown.check").is_none());
        assert!(lookup_explanation("unknown_code").is_none());
    }

    #[test]
    fn exceptioned_dependency_reuses_exceptions_text() {
        let code = lookup_explanation(ids::CODE_EXCEPTIONED_DEPENDENCY).expect("code");
        let check = lookup_explanation(ids::CHECK_LICENSE_EXCEPTIONS).expect("check");
        assert_eq!(code.description, check.description);
        assert_ne!(code.title, check.title);
    }
}
