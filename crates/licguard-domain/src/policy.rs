use crate::model::DependencyId;
use std::collections::BTreeSet;

/// Suffix marking an exception entry as a prefix pattern.
pub const WILDCARD_SUFFIX: &str = "/...";

/// Normalized exception entries: exact identifiers and wildcard prefixes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExceptionSet {
    pub exact: BTreeSet<String>,
    pub prefixes: BTreeSet<String>,
}

impl ExceptionSet {
    pub fn build<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = ExceptionSet::default();
        for entry in entries {
            let entry = entry.as_ref();
            match entry.strip_suffix(WILDCARD_SUFFIX) {
                Some(prefix) => {
                    set.prefixes.insert(prefix.to_string());
                }
                None => {
                    set.exact.insert(entry.to_string());
                }
            }
        }
        set
    }

    /// True when `dep` is listed exactly or starts with any registered prefix.
    pub fn covers(&self, dep: &DependencyId) -> bool {
        let id = dep.as_str();
        self.prefixes.iter().any(|p| id.starts_with(p.as_str())) || self.exact.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefixes.is_empty()
    }
}

/// The policy model, rebuilt for every evaluation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LicensePolicy {
    pub whitelist: BTreeSet<String>,
    pub blacklist: BTreeSet<String>,
    pub exceptions: ExceptionSet,
}

impl LicensePolicy {
    /// Normalize raw policy lists. Duplicates collapse; license types are not validated.
    pub fn build<W, B, E, S1, S2, S3>(whitelist: W, blacklist: B, exceptions: E) -> Self
    where
        W: IntoIterator<Item = S1>,
        B: IntoIterator<Item = S2>,
        E: IntoIterator<Item = S3>,
        S1: AsRef<str>,
        S2: AsRef<str>,
        S3: AsRef<str>,
    {
        Self {
            whitelist: whitelist
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            blacklist: blacklist
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            exceptions: ExceptionSet::build(exceptions),
        }
    }

    pub fn is_whitelisted(&self, license_type: &str) -> bool {
        self.whitelist.contains(license_type)
    }

    pub fn is_blacklisted(&self, license_type: &str) -> bool {
        self.blacklist.contains(license_type)
    }
}
