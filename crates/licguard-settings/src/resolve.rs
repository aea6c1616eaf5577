use crate::model::{CONFIG_SCHEMA_V1, LicguardConfigV1};
use licguard_domain::LicensePolicy;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Extra exception entries appended after the configured ones.
    pub exceptions: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub policy: LicensePolicy,
    /// Raw entry counts as configured, before duplicates collapse.
    pub whitelist_entries: usize,
    pub blacklist_entries: usize,
    pub exception_entries: usize,
}

pub fn resolve_config(
    cfg: LicguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != CONFIG_SCHEMA_V1
    {
        anyhow::bail!("unknown config schema: {schema} (expected {CONFIG_SCHEMA_V1})");
    }

    let mut exceptions = cfg.exceptions;
    exceptions.extend(overrides.exceptions);

    let policy = LicensePolicy::build(&cfg.whitelist, &cfg.blacklist, &exceptions);

    Ok(ResolvedConfig {
        policy,
        whitelist_entries: cfg.whitelist.len(),
        blacklist_entries: cfg.blacklist.len(),
        exception_entries: exceptions.len(),
    })
}
