//! The audit runner: evaluate every dependency once, in inventory order.

use crate::attribution::AttributionWriter;
use crate::evaluate::{LicenseVerdict, evaluate};
use crate::model::{DependencyId, LicenseInventory};
use crate::policy::LicensePolicy;
use std::io::{self, Write};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyVerdict {
    pub dependency: DependencyId,
    /// Detected license type (empty when unrecognized).
    pub license_type: String,
    pub verdict: LicenseVerdict,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditResult {
    /// One entry per inventory dependency, in lexicographic dependency order.
    pub verdicts: Vec<DependencyVerdict>,
    /// Attribution entries written, when a sink was attached.
    pub attribution_entries: Option<usize>,
}

impl AuditResult {
    pub fn violations(&self) -> impl Iterator<Item = &DependencyVerdict> {
        self.verdicts.iter().filter(|v| v.verdict.is_non_approved())
    }

    pub fn is_success(&self) -> bool {
        self.violations().next().is_none()
    }

    pub fn count(&self, verdict: fn(&LicenseVerdict) -> bool) -> usize {
        self.verdicts.iter().filter(|v| verdict(&v.verdict)).count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// At least one dependency is not approved. `result` holds every verdict.
    #[error("non-approved licenses found: {}", format_ids(.violations))]
    PolicyViolation {
        violations: Vec<DependencyId>,
        result: AuditResult,
    },

    /// The attribution sink rejected a write; the audit stopped at `dependency`.
    #[error("failed to write attribution report{}", format_at(.dependency))]
    ReportWrite {
        dependency: Option<DependencyId>,
        #[source]
        source: io::Error,
    },
}

fn format_ids(ids: &[DependencyId]) -> String {
    ids.iter()
        .map(DependencyId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_at(dep: &Option<DependencyId>) -> String {
    match dep {
        Some(d) => format!(" entry for {d}"),
        None => String::new(),
    }
}

/// Evaluate every dependency against `policy`.
///
/// When `sink` is given, the attribution header and one entry per dependency are written to it
/// before that dependency's verdict is recorded. A write failure aborts the run immediately.
/// Policy violations never abort: all dependencies are evaluated and the error carries the full
/// result.
pub fn run_audit(
    inventory: &LicenseInventory,
    policy: &LicensePolicy,
    sink: Option<&mut dyn Write>,
) -> Result<AuditResult, AuditError> {
    let mut writer = sink.map(AttributionWriter::new);
    if let Some(w) = writer.as_mut() {
        w.write_header().map_err(|source| AuditError::ReportWrite {
            dependency: None,
            source,
        })?;
    }

    let mut result = AuditResult::default();

    for (dep, lic) in inventory {
        if let Some(w) = writer.as_mut() {
            w.write_entry(dep, &lic.text)
                .map_err(|source| AuditError::ReportWrite {
                    dependency: Some(dep.clone()),
                    source,
                })?;
        }

        result.verdicts.push(DependencyVerdict {
            dependency: dep.clone(),
            license_type: lic.license_type.clone(),
            verdict: evaluate(dep, lic, policy),
        });
    }

    if let Some(w) = writer {
        let written = w.finish().map_err(|source| AuditError::ReportWrite {
            dependency: None,
            source,
        })?;
        result.attribution_entries = Some(written);
    }

    let violations: Vec<DependencyId> = result
        .violations()
        .map(|v| v.dependency.clone())
        .collect();
    if violations.is_empty() {
        Ok(result)
    } else {
        Err(AuditError::PolicyViolation { violations, result })
    }
}
