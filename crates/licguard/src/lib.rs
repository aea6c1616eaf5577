//! Public facade for embedding the licguard engine.
//!
//! Re-exports the pure evaluation API so callers do not depend on the internal crate layout.

#![forbid(unsafe_code)]

pub use licguard_domain::{
    ATTRIBUTION_HEADER, AttributionWriter, AuditError, AuditResult, DependencyId,
    DependencyVerdict, ExceptionSet, LicenseClassification, LicenseInventory, LicensePolicy,
    LicenseVerdict, NonApprovedReason, advise, evaluate, render_entry, render_header, run_audit,
    summarize,
};
