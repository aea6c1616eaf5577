//! Pure license policy evaluation.
//!
//! Input: a license inventory (dependency -> detected license) and the raw policy lists.
//! Output: per-dependency verdicts, an aggregate outcome, findings + report summary data.
//!
//! The only output channel is the optional attribution sink handed to [`run_audit`].

#![forbid(unsafe_code)]

pub mod attribution;
pub mod audit;
pub mod evaluate;
pub mod fingerprint;
pub mod model;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use attribution::{ATTRIBUTION_HEADER, AttributionWriter, render_entry, render_header};
pub use audit::{AuditError, AuditResult, DependencyVerdict, run_audit};
pub use engine::summarize;
pub use evaluate::{LicenseVerdict, NonApprovedReason, advise, evaluate};
pub use model::{DependencyId, LicenseClassification, LicenseInventory};
pub use policy::{ExceptionSet, LicensePolicy};
