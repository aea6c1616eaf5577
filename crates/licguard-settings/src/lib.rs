//! Config parsing and policy resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{CONFIG_SCHEMA_V1, LicguardConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Config file syntax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file name: `.yml`/`.yaml` are YAML, anything else is TOML.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yml") || lower.ends_with(".yaml") {
            ConfigFormat::Yaml
        } else {
            ConfigFormat::Toml
        }
    }
}

/// Parse `.licguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<LicguardConfigV1> {
    let cfg: LicguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Parse a YAML policy file (e.g. `.licguard.yml`) into a typed model.
pub fn parse_config_yaml(input: &str) -> anyhow::Result<LicguardConfigV1> {
    let cfg: LicguardConfigV1 = serde_yaml::from_str(input)?;
    Ok(cfg)
}

/// Parse config text in the given format. Blank input yields the empty policy.
pub fn parse_config(input: &str, format: ConfigFormat) -> anyhow::Result<LicguardConfigV1> {
    if input.trim().is_empty() {
        return Ok(LicguardConfigV1::default());
    }
    match format {
        ConfigFormat::Toml => parse_config_toml(input),
        ConfigFormat::Yaml => parse_config_yaml(input),
    }
}

/// Resolve the policy used by the engine (config lists + CLI overrides).
pub fn resolve_config(
    cfg: LicguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_policy_and_ignores_unknown_fields() {
        let cfg = parse_config_toml(
            r#"
whitelist = ["MIT", "Apache-2.0"]
blacklist = ["GPL-3.0"]
exceptions = ["github.com/foo/..."]
owner = "legal@example.com"
"#,
        )
        .expect("parse toml");

        assert_eq!(cfg.whitelist, vec!["MIT", "Apache-2.0"]);
        assert_eq!(cfg.blacklist, vec!["GPL-3.0"]);
        assert_eq!(cfg.exceptions, vec!["github.com/foo/..."]);
    }

    #[test]
    fn parses_yaml_policy() {
        let cfg = parse_config_yaml(
            "---\nwhitelist:\n  - MIT\nblacklist:\n  - GPL-2.0\nexceptions:\n  - github.com/foo/bar\n",
        )
        .expect("parse yaml");

        assert_eq!(cfg.whitelist, vec!["MIT"]);
        assert_eq!(cfg.blacklist, vec!["GPL-2.0"]);
        assert_eq!(cfg.exceptions, vec!["github.com/foo/bar"]);
    }

    #[test]
    fn allow_and_deny_are_aliases() {
        let cfg = parse_config_toml("allow = [\"MIT\"]\ndeny = [\"AGPL-3.0\"]\n").expect("parse");
        assert_eq!(cfg.whitelist, vec!["MIT"]);
        assert_eq!(cfg.blacklist, vec!["AGPL-3.0"]);
    }

    #[test]
    fn blank_input_is_empty_policy() {
        let cfg = parse_config("  \n", ConfigFormat::Yaml).expect("parse");
        assert_eq!(cfg, LicguardConfigV1::default());
    }

    #[test]
    fn format_from_path() {
        assert_eq!(ConfigFormat::from_path("policy.yml"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("policy.YAML"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(".licguard.toml"), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("policy"), ConfigFormat::Toml);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config_toml("whitelist = [").is_err());
        assert!(parse_config_toml("whitelist = \"MIT\"").is_err());
    }
}
