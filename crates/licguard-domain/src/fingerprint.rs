use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a license finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - dependency id
/// - license type (empty when unrecognized)
pub fn fingerprint_for_dependency(
    check_id: &str,
    code: &str,
    dependency: &str,
    license_type: &str,
) -> String {
    let canonical = [check_id, code, dependency, license_type].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
