use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of a dependency, e.g. a module import path.
///
/// Ordering is plain lexicographic byte order; the audit relies on it for a stable
/// iteration order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyId(String);

impl DependencyId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DependencyId {
    fn from(value: &str) -> Self {
        DependencyId::new(value)
    }
}

impl From<String> for DependencyId {
    fn from(value: String) -> Self {
        DependencyId(value)
    }
}

impl AsRef<str> for DependencyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// License information produced by the external license detector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseClassification {
    /// Normalized license identifier (SPDX-like). Empty when unrecognized.
    #[serde(rename = "type", default)]
    pub license_type: String,

    /// Raw license text, empty if none was found.
    #[serde(default)]
    pub text: String,
}

impl LicenseClassification {
    pub fn new<T: Into<String>, X: Into<String>>(license_type: T, text: X) -> Self {
        Self {
            license_type: license_type.into(),
            text: text.into(),
        }
    }

    /// A license without text, as a detector would report for a bare type tag.
    pub fn of_type<T: Into<String>>(license_type: T) -> Self {
        Self::new(license_type, String::new())
    }

    pub fn unrecognized() -> Self {
        Self::default()
    }

    pub fn recognized(&self) -> bool {
        !self.license_type.is_empty()
    }
}

/// Dependency -> detected license. Keyed by a `BTreeMap` so iteration is lexicographic.
pub type LicenseInventory = BTreeMap<DependencyId, LicenseClassification>;
