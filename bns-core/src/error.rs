//! Error types for BNS record tooling.
//!
//! One `thiserror` enum covers all three operations. The classifier methods
//! group variants into the failure kinds the CLI maps to exit codes.

use thiserror::Error;

/// Result type alias using `BnsError`.
pub type Result<T> = std::result::Result<T, BnsError>;

/// Main error type for all BNS operations.
#[derive(Debug, Error)]
pub enum BnsError {
    // ═══════════════════════════════════════════════════════════════════════════
    // PRECONDITION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A required configuration value is not set.
    #[error("{name} not found. Please set it in the .env file or as an environment variable")]
    MissingConfig {
        /// Environment variable or option name
        name: String,
    },

    /// A configuration value or input could not be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The domain has no resolver configured in the registry.
    #[error("No resolver set for {domain}")]
    NoResolver {
        /// Domain that was looked up
        domain: String,
    },

    /// The operator declined a confirmation prompt.
    #[error("Aborted by operator: {0}")]
    Aborted(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // REMOTE READ ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A contract call or JSON-RPC read failed.
    #[error("RPC call failed: {0}")]
    Rpc(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // REMOTE WRITE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Submitting or confirming a transaction failed.
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// The transaction was mined but reverted.
    #[error("Transaction {tx_hash} reverted")]
    TransactionReverted {
        /// Hash of the reverted transaction
        tx_hash: String,
    },

    /// The transaction was confirmed but the stored value differs.
    #[error("Contenthash update failed: expected {expected}, found {actual}")]
    VerificationMismatch {
        /// Hex of the value that was submitted
        expected: String,
        /// Hex of the value read back after confirmation
        actual: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // GATEWAY & DECODE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// An HTTP gateway request failed or returned a non-success status.
    #[error("Gateway {gateway} failed: {reason}")]
    Gateway {
        /// Gateway name
        gateway: String,
        /// Failure description
        reason: String,
    },

    /// A contenthash could not be turned back into a readable string.
    #[error("Could not decode contenthash: {0}")]
    Decode(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // PLUMBING
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BnsError {
    /// Shorthand for [`BnsError::MissingConfig`].
    pub fn missing(name: impl Into<String>) -> Self {
        BnsError::MissingConfig { name: name.into() }
    }

    /// Returns true if the operation stopped before any remote write.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BnsError::MissingConfig { .. }
                | BnsError::InvalidInput(_)
                | BnsError::NoResolver { .. }
                | BnsError::Aborted(_)
        )
    }

    /// Returns true if a chain read failed.
    pub fn is_remote_read(&self) -> bool {
        matches!(self, BnsError::Rpc(_))
    }

    /// Returns true if submission or confirmation of a transaction failed.
    pub fn is_remote_write(&self) -> bool {
        matches!(
            self,
            BnsError::Transaction(_) | BnsError::TransactionReverted { .. }
        )
    }

    /// Returns true if the write landed but did not produce the intended state.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, BnsError::VerificationMismatch { .. })
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        if self.is_precondition() {
            2
        } else if self.is_verification_failure() {
            3
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BnsError::missing("PRIVATE_KEY");
        assert!(err.to_string().starts_with("PRIVATE_KEY not found"));

        let err = BnsError::NoResolver {
            domain: "daoko.bnb".into(),
        };
        assert_eq!(err.to_string(), "No resolver set for daoko.bnb");
    }

    #[test]
    fn test_error_classification() {
        assert!(BnsError::missing("NEW_CID").is_precondition());
        assert!(BnsError::Aborted("no".into()).is_precondition());
        assert!(!BnsError::Rpc("boom".into()).is_precondition());

        assert!(BnsError::Rpc("boom".into()).is_remote_read());
        assert!(BnsError::Transaction("dropped".into()).is_remote_write());
        assert!(BnsError::TransactionReverted { tx_hash: "0x01".into() }.is_remote_write());

        let mismatch = BnsError::VerificationMismatch {
            expected: "0x01".into(),
            actual: "0x02".into(),
        };
        assert!(mismatch.is_verification_failure());
        assert!(!mismatch.is_remote_write());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BnsError::missing("PRIVATE_KEY").exit_code(), 2);
        assert_eq!(
            BnsError::VerificationMismatch {
                expected: "0x01".into(),
                actual: "0x".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(BnsError::Rpc("boom".into()).exit_code(), 1);
        assert_eq!(BnsError::Transaction("boom".into()).exit_code(), 1);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let bns_result: Result<serde_json::Value> = json_result.map_err(BnsError::from);
        assert!(matches!(bns_result, Err(BnsError::Json(_))));
    }
}
