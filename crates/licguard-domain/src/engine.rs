use crate::audit::{AuditResult, DependencyVerdict};
use crate::evaluate::{LicenseVerdict, NonApprovedReason};
use crate::fingerprint::fingerprint_for_dependency;
use crate::report::{DomainReport, SeverityCounts};
use licguard_types::{Finding, LicguardData, Severity, Verdict, ids};
use serde_json::json;

/// Turn an audit result into report findings, a verdict and summary data.
pub fn summarize(result: &AuditResult) -> DomainReport {
    let mut findings: Vec<Finding> = result.verdicts.iter().filter_map(finding_for).collect();

    // Deterministic ordering.
    findings.sort_by(compare_findings);

    let verdict = compute_verdict(&findings);
    let counts = SeverityCounts::from_findings(&findings);

    let data = LicguardData {
        config_source: None,
        dependencies_scanned: saturating_u32(result.verdicts.len()),
        approved: saturating_u32(result.count(|v| *v == LicenseVerdict::Approved)),
        exceptioned: saturating_u32(result.count(|v| *v == LicenseVerdict::Exceptioned)),
        non_approved: saturating_u32(result.count(LicenseVerdict::is_non_approved)),
        attribution_report: None,
    };

    DomainReport {
        verdict,
        findings,
        data,
        counts,
    }
}

/// Report counters are `u32`; larger counts are pinned at `u32::MAX`.
fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn finding_for(entry: &DependencyVerdict) -> Option<Finding> {
    let dep = entry.dependency.as_str();
    let license = (!entry.license_type.is_empty()).then(|| entry.license_type.clone());

    let (severity, check_id, code, message, help) = match entry.verdict {
        LicenseVerdict::Approved | LicenseVerdict::Unrecognized => return None,
        LicenseVerdict::Exceptioned => (
            Severity::Warning,
            ids::CHECK_LICENSE_EXCEPTIONS,
            ids::CODE_EXCEPTIONED_DEPENDENCY,
            format!("dependency '{dep}' is exempt from license evaluation"),
            "Review the exception; remove it once the dependency is gone or its license is approved.",
        ),
        LicenseVerdict::NonApproved(NonApprovedReason::Denied) => (
            Severity::Error,
            ids::CHECK_LICENSE_POLICY,
            ids::CODE_DENIED_LICENSE,
            format!(
                "dependency '{dep}' uses blacklisted license {}",
                entry.license_type
            ),
            "Replace the dependency or add it to exceptions after review.",
        ),
        LicenseVerdict::NonApproved(NonApprovedReason::Unlisted) => (
            Severity::Error,
            ids::CHECK_LICENSE_POLICY,
            ids::CODE_UNLISTED_LICENSE,
            format!(
                "dependency '{dep}' uses non-approved license {}",
                entry.license_type
            ),
            "Whitelist the license type or add the dependency to exceptions.",
        ),
        LicenseVerdict::NonApproved(NonApprovedReason::Unrecognized) => (
            Severity::Error,
            ids::CHECK_LICENSE_POLICY,
            ids::CODE_UNRECOGNIZED_LICENSE,
            format!("dependency '{dep}' has no recognized license"),
            "Check the dependency's license manually and add it to exceptions if acceptable.",
        ),
    };

    Some(Finding {
        severity,
        check_id: check_id.to_string(),
        code: code.to_string(),
        message,
        dependency: dep.to_string(),
        license,
        help: Some(help.to_string()),
        url: None,
        fingerprint: Some(fingerprint_for_dependency(
            check_id,
            code,
            dep,
            &entry.license_type,
        )),
        data: json!({
            "dependency": dep,
            "license": entry.license_type,
            "verdict": entry.verdict.as_str(),
        }),
    })
}

fn compute_verdict(findings: &[Finding]) -> Verdict {
    if findings.iter().any(|f| f.severity == Severity::Error) {
        return Verdict::Fail;
    }
    if findings.iter().any(|f| f.severity == Severity::Warning) {
        return Verdict::Warn;
    }
    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) dependency
    // 3) check_id
    // 4) code
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(a.dependency.cmp(&b.dependency))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditError, run_audit};
    use crate::test_support::{inventory, policy};

    fn audit(entries: &[(&str, &str)], p: &crate::policy::LicensePolicy) -> AuditResult {
        match run_audit(&inventory(entries), p, None) {
            Ok(result) => result,
            Err(AuditError::PolicyViolation { result, .. }) => result,
            Err(other) => panic!("unexpected audit error: {other}"),
        }
    }

    #[test]
    fn all_approved_is_pass_without_findings() {
        let result = audit(&[("a", "MIT"), ("b", "MIT")], &policy(&["MIT"], &[], &[]));
        let report = summarize(&result);

        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.findings.is_empty());
        assert_eq!(report.data.dependencies_scanned, 2);
        assert_eq!(report.data.approved, 2);
    }

    #[test]
    fn exceptions_only_warn() {
        let result = audit(&[("a", "GPL")], &policy(&["MIT"], &[], &["a"]));
        let report = summarize(&result);

        assert_eq!(report.verdict, Verdict::Warn);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].code, ids::CODE_EXCEPTIONED_DEPENDENCY);
        assert_eq!(report.counts.warning, 1);
    }

    #[test]
    fn errors_sort_before_warnings_then_by_dependency() {
        let result = audit(
            &[("a", "GPL"), ("b", ""), ("c", "GPL"), ("d", "ISC")],
            &policy(&["MIT"], &["GPL"], &["a"]),
        );
        let report = summarize(&result);

        assert_eq!(report.verdict, Verdict::Fail);
        let order: Vec<(&str, &str)> = report
            .findings
            .iter()
            .map(|f| (f.dependency.as_str(), f.code.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("b", ids::CODE_UNRECOGNIZED_LICENSE),
                ("c", ids::CODE_DENIED_LICENSE),
                ("d", ids::CODE_UNLISTED_LICENSE),
                ("a", ids::CODE_EXCEPTIONED_DEPENDENCY),
            ]
        );
        assert_eq!(report.data.non_approved, 3);
        assert_eq!(report.data.exceptioned, 1);
    }

    #[test]
    fn counters_saturate_instead_of_wrapping() {
        assert_eq!(saturating_u32(0), 0);
        assert_eq!(saturating_u32(7), 7);
        assert_eq!(saturating_u32(u32::MAX as usize), u32::MAX);
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);
    }

    #[test]
    fn unrecognized_finding_has_no_license_field() {
        let result = audit(&[("x", "")], &policy(&[], &[], &[]));
        let report = summarize(&result);
        let finding = &report.findings[0];

        assert_eq!(finding.license, None);
        assert_eq!(finding.data["verdict"], "non_approved");
        assert!(finding.fingerprint.is_some());
    }
}
