//! SHA-256 content checksum for repeatable change detection.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 checksum of a migration body as lowercase hex.
///
/// The ledger stores this per repeatable artifact; a mismatch on the next run
/// marks the artifact as needing re-application.
pub fn compute_checksum(sql: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sql.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        let a = compute_checksum("CREATE VIEW v AS SELECT 1");
        let b = compute_checksum("CREATE VIEW v AS SELECT 1");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_checksum_detects_change() {
        let a = compute_checksum("CREATE VIEW v AS SELECT 1");
        let b = compute_checksum("CREATE VIEW v AS SELECT 2");
        assert_ne!(a, b);
    }
}
