//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_LICENSE_POLICY: &str = "license.policy";
pub const CHECK_LICENSE_EXCEPTIONS: &str = "license.exceptions";

// Codes: license.policy
pub const CODE_DENIED_LICENSE: &str = "denied_license";
pub const CODE_UNLISTED_LICENSE: &str = "unlisted_license";
pub const CODE_UNRECOGNIZED_LICENSE: &str = "unrecognized_license";

// Codes: license.exceptions
pub const CODE_EXCEPTIONED_DEPENDENCY: &str = "exceptioned_dependency";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
