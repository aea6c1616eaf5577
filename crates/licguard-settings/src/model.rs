use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CONFIG_SCHEMA_V1: &str = "licguard.config.v1";

/// `.licguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
/// Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LicguardConfigV1 {
    /// Optional schema string for tooling (`licguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Approved license types.
    #[serde(default, alias = "allow")]
    pub whitelist: Vec<String>,

    /// Disallowed license types. Wins over `whitelist`.
    #[serde(default, alias = "deny")]
    pub blacklist: Vec<String>,

    /// Dependency ids exempt from license evaluation. A trailing `/...` exempts the id and
    /// everything nested under it.
    #[serde(default)]
    pub exceptions: Vec<String>,
}
