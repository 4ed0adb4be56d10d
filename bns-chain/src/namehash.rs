//! Hierarchical name hashing (EIP-137 namehash) for BNS domains.

use alloy::primitives::B256;
use sha3::{Digest, Keccak256};

use bns_core::error::{BnsError, Result};

/// Computes the namehash of a domain.
///
/// Labels are lower-cased and hashed from the root outward:
/// `node = keccak256(parent ‖ keccak256(label))`. Empty labels are skipped,
/// so `""` hashes to the zero node and a trailing dot is ignored.
pub fn namehash(name: &str) -> B256 {
    let mut node = [0u8; 32];

    for label in name.rsplit('.') {
        if label.is_empty() {
            continue;
        }

        let label_hash = Keccak256::digest(label.to_lowercase().as_bytes());

        let mut combined = [0u8; 64];
        combined[..32].copy_from_slice(&node);
        combined[32..].copy_from_slice(&label_hash);

        node = Keccak256::digest(combined).into();
    }

    B256::from(node)
}

/// Normalizes a domain name (trim, lowercase, validate format).
pub fn normalize_name(name: &str) -> Result<String> {
    let normalized = name.trim().trim_end_matches('.').to_lowercase();

    if normalized.is_empty() {
        return Err(BnsError::InvalidInput("Domain name cannot be empty".into()));
    }

    if !normalized.contains('.') {
        return Err(BnsError::InvalidInput(format!(
            "Domain name '{normalized}' must include a top-level label such as .bnb"
        )));
    }

    if normalized.split('.').any(str::is_empty) {
        return Err(BnsError::InvalidInput(format!(
            "Domain name '{normalized}' contains an empty label"
        )));
    }

    Ok(normalized)
}
