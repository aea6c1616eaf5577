//! Use case orchestration for licguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing, logging setup, and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod inventory;
mod list;
mod render;
mod report;

pub use check::{
    CheckInput, CheckOutput, PreparedCheck, prepare_check, run_check, verdict_exit_code,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use inventory::parse_inventory_json;
pub use list::{ListOutput, ListedDependency, format_list, run_list};
pub use render::{render_annotations, render_markdown};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
