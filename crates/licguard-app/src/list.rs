//! The `list` use case: show what the detector found, without a policy.

use licguard_domain::{DependencyId, LicenseVerdict, advise};

use crate::inventory::parse_inventory_json;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedDependency {
    pub dependency: DependencyId,
    /// Detected license type (empty when unrecognized).
    pub license_type: String,
    /// `Some(Unrecognized)` when the detector found no license.
    pub advisory: Option<LicenseVerdict>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOutput {
    pub dependencies: Vec<ListedDependency>,
}

impl ListOutput {
    pub fn unrecognized(&self) -> usize {
        self.dependencies
            .iter()
            .filter(|d| d.advisory == Some(LicenseVerdict::Unrecognized))
            .count()
    }
}

/// List every dependency in the inventory with its detected license.
pub fn run_list(inventory_text: &str) -> anyhow::Result<ListOutput> {
    let inventory = parse_inventory_json(inventory_text)?;

    let dependencies = inventory
        .iter()
        .map(|(dep, lic)| {
            let advisory = advise(lic);
            let package = dep.as_str();
            match advisory {
                Some(_) => tracing::warn!(package, "did not find recognized license"),
                None => tracing::info!(package, license = lic.license_type.as_str(), "found license"),
            }
            ListedDependency {
                dependency: dep.clone(),
                license_type: lic.license_type.clone(),
                advisory,
            }
        })
        .collect();

    Ok(ListOutput { dependencies })
}

/// One `<dependency>\t<license>` line per dependency; unrecognized licenses print as `-`.
pub fn format_list(output: &ListOutput) -> String {
    let mut out = String::new();
    for d in &output.dependencies {
        let license = if d.license_type.is_empty() {
            "-"
        } else {
            d.license_type.as_str()
        };
        out.push_str(&format!("{}\t{}\n", d.dependency, license));
    }
    out
}
