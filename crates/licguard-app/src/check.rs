//! The `check` use case: evaluate policy and produce a report.

use std::io::Write;

use anyhow::Context;
use camino::Utf8Path;
use licguard_domain::{AuditError, AuditResult, LicenseInventory, LicenseVerdict};
use licguard_settings::{ConfigFormat, Overrides, ResolvedConfig};
use licguard_types::{LicguardReportV1, ReportEnvelope, SCHEMA_REPORT_V1, Verdict};
use time::OffsetDateTime;

use crate::inventory::parse_inventory_json;
use crate::report::tool_meta;

/// Input for the check use case.
pub struct CheckInput<'a> {
    /// Config file contents (empty string yields the empty policy).
    pub config_text: &'a str,
    pub config_format: ConfigFormat,
    /// Config path as given on the command line, recorded in the report.
    pub config_source: Option<&'a str>,
    /// License inventory JSON.
    pub inventory_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Path of the attribution report, recorded in the report.
    pub attribution_path: Option<&'a Utf8Path>,
}

/// A parsed policy and inventory, ready to be audited.
///
/// Nothing has been written yet; callers open the attribution sink only after this succeeds.
#[derive(Clone, Debug)]
pub struct PreparedCheck {
    started_at: OffsetDateTime,
    resolved: ResolvedConfig,
    inventory: LicenseInventory,
    config_source: Option<String>,
    attribution_path: Option<String>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: LicguardReportV1,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    /// Raw per-dependency verdicts.
    pub audit: AuditResult,
}

/// Parse and resolve the config, then parse the inventory.
pub fn prepare_check(input: CheckInput<'_>) -> anyhow::Result<PreparedCheck> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = licguard_settings::parse_config(input.config_text, input.config_format)
        .context("parse config")?;
    let resolved =
        licguard_settings::resolve_config(cfg, input.overrides).context("resolve config")?;
    tracing::debug!(
        whitelist = resolved.whitelist_entries,
        blacklist = resolved.blacklist_entries,
        exceptions = resolved.exception_entries,
        "resolved license policy"
    );

    let inventory = parse_inventory_json(input.inventory_text)?;

    Ok(PreparedCheck {
        started_at,
        resolved,
        inventory,
        config_source: input.config_source.map(str::to_string),
        attribution_path: input.attribution_path.map(|p| p.as_str().to_string()),
    })
}

impl PreparedCheck {
    /// Number of dependencies in the parsed inventory.
    pub fn dependencies(&self) -> usize {
        self.inventory.len()
    }

    /// Audit every dependency, streaming attribution into `attribution` when given.
    ///
    /// Policy violations are part of the report (verdict `fail`). Failing to write the
    /// attribution report is an error.
    pub fn run(self, attribution: Option<&mut dyn Write>) -> anyhow::Result<CheckOutput> {
        let audit =
            match licguard_domain::run_audit(&self.inventory, &self.resolved.policy, attribution) {
                Ok(result) => result,
                Err(AuditError::PolicyViolation { result, .. }) => result,
                Err(err @ AuditError::ReportWrite { .. }) => {
                    return Err(err).context("write attribution report");
                }
            };
        log_verdicts(&audit);

        let domain = licguard_domain::summarize(&audit);
        let mut data = domain.data;
        data.config_source = self.config_source;
        data.attribution_report = self.attribution_path;

        let report = ReportEnvelope {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: tool_meta(),
            started_at: self.started_at,
            finished_at: OffsetDateTime::now_utc(),
            verdict: domain.verdict,
            findings: domain.findings,
            data,
        };

        Ok(CheckOutput {
            report,
            resolved_config: self.resolved,
            audit,
        })
    }
}

/// Run the check use case: parse config and inventory, audit every dependency, produce a report.
pub fn run_check(
    input: CheckInput<'_>,
    attribution: Option<&mut dyn Write>,
) -> anyhow::Result<CheckOutput> {
    prepare_check(input)?.run(attribution)
}

fn log_verdicts(audit: &AuditResult) {
    for entry in &audit.verdicts {
        let package = entry.dependency.as_str();
        let license = entry.license_type.as_str();
        match entry.verdict {
            LicenseVerdict::Approved => {
                tracing::info!(package, license, "found approved license");
            }
            LicenseVerdict::Exceptioned => {
                tracing::warn!(package, license, "found exceptioned package");
            }
            LicenseVerdict::NonApproved(reason) => {
                tracing::error!(package, license, ?reason, "found non-approved license");
            }
            LicenseVerdict::Unrecognized => {}
        }
    }
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
