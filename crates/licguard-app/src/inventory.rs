use anyhow::Context;
use licguard_domain::LicenseInventory;

/// Parse the detector's license inventory: `{ "<dependency>": { "type": "...", "text": "..." } }`.
///
/// Missing `type`/`text` fields default to empty strings; an empty `type` means the detector did
/// not recognize a license.
pub fn parse_inventory_json(text: &str) -> anyhow::Result<LicenseInventory> {
    let inventory: LicenseInventory =
        serde_json::from_str(text).context("parse license inventory json")?;
    Ok(inventory)
}
