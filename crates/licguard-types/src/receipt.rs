use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for licguard reports.
pub const SCHEMA_REPORT_V1: &str = "licguard.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,
    pub message: String,

    /// Dependency identifier the finding is about (empty for tool-level findings).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dependency: String,

    /// Detected license type, if the detector recognized one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Stable identifier intended for dedup and trending. A hash of:
    /// `check_id + code + dependency + license`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Check-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Licguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct LicguardData {
    /// Where the policy came from (config path as given), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_source: Option<String>,

    pub dependencies_scanned: u32,
    pub approved: u32,
    pub exceptioned: u32,
    pub non_approved: u32,

    /// Path of the attribution report written during the run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_report: Option<String>,
}

/// A generic report envelope.
///
/// Keeping this generic allows embedding tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = LicguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type LicguardReportV1 = ReportEnvelope<LicguardData>;

pub type LicguardReport = LicguardReportV1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finding_omits_empty_optional_fields() {
        let finding = Finding {
            severity: Severity::Error,
            check_id: "tool.runtime".to_string(),
            code: "runtime_error".to_string(),
            message: "boom".to_string(),
            dependency: String::new(),
            license: None,
            help: None,
            url: None,
            fingerprint: None,
            data: JsonValue::Null,
        };

        let value = serde_json::to_value(&finding).expect("serialize finding");
        assert_eq!(
            value,
            json!({
                "severity": "error",
                "check_id": "tool.runtime",
                "code": "runtime_error",
                "message": "boom",
            })
        );
    }

    #[test]
    fn verdict_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Verdict::Warn).expect("serialize"),
            json!("warn")
        );
        let parsed: Verdict = serde_json::from_value(json!("fail")).expect("parse");
        assert_eq!(parsed, Verdict::Fail);
    }
}
