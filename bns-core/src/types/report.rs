//! Reports returned by the check, verify and update operations.

use std::path::PathBuf;

use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use super::{UpdateRecord, UpdateWarning};

/// Metadata published by a content-publisher contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherMetadata {
    /// Value of `domain()`
    pub domain: String,
    /// Value of `ipnsRecord()`
    pub ipns_record: String,
}

/// A successful gateway response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header, if present
    pub content_type: Option<String>,
    /// Body length in bytes
    pub content_length: usize,
    /// Leading characters of an HTML body, when previews were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl GatewayResponse {
    /// Returns true if the content type indicates HTML.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("text/html"))
    }
}

/// Outcome of probing one gateway.
///
/// Failures are stored as text. A failed gateway request never aborts the operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOutcome {
    /// Gateway name (e.g. "ipfs.io")
    pub gateway: String,
    /// URL that was requested
    pub url: String,
    /// Response on success, error message on failure
    pub result: std::result::Result<GatewayResponse, String>,
}

impl GatewayOutcome {
    /// Returns true if the gateway returned content.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Publisher details found by the checker when the resolver matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherReport {
    /// Metadata read from the publisher
    pub metadata: PublisherMetadata,
    /// One outcome per configured gateway
    pub gateways: Vec<GatewayOutcome>,
}

/// Result of the resolution checker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Domain that was checked
    pub domain: String,
    /// Namehash of the domain
    pub node: B256,
    /// Registered owner
    pub owner: Address,
    /// Registered resolver
    pub resolver: Address,
    /// Publisher the resolver was compared against
    pub expected_publisher: Address,
    /// Present only when the resolver is the expected publisher
    pub publisher: Option<PublisherReport>,
}

impl CheckReport {
    /// Returns true if the resolver is the expected publisher.
    pub fn resolver_matches(&self) -> bool {
        self.resolver == self.expected_publisher
    }
}

/// Result of the record verifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Publisher contract that was read
    pub contract: Address,
    /// Metadata read from the contract
    pub metadata: PublisherMetadata,
    /// One outcome per configured gateway
    pub gateways: Vec<GatewayOutcome>,
}

/// Result of a successful update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Record that was persisted
    pub record: UpdateRecord,
    /// Where the record was written
    pub audit_path: PathBuf,
    /// Warnings raised before submission, in the order they were raised
    pub warnings: Vec<UpdateWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(content_type: Option<&str>) -> GatewayResponse {
        GatewayResponse {
            status: 200,
            content_type: content_type.map(String::from),
            content_length: 10,
            preview: None,
        }
    }

    #[test]
    fn test_is_html() {
        assert!(response(Some("text/html; charset=utf-8")).is_html());
        assert!(!response(Some("application/json")).is_html());
        assert!(!response(None).is_html());
    }

    #[test]
    fn test_resolver_matches() {
        let publisher = Address::repeat_byte(0xd7);
        let mut report = CheckReport {
            domain: "daoko.bnb".into(),
            node: B256::ZERO,
            owner: Address::repeat_byte(0x01),
            resolver: publisher,
            expected_publisher: publisher,
            publisher: None,
        };
        assert!(report.resolver_matches());

        report.resolver = Address::repeat_byte(0x02);
        assert!(!report.resolver_matches());
    }

    #[test]
    fn test_gateway_outcome_success() {
        let ok = GatewayOutcome {
            gateway: "ipfs.io".into(),
            url: "https://ipfs.io/ipns/k51".into(),
            result: Ok(response(None)),
        };
        let failed = GatewayOutcome {
            result: Err("timeout".into()),
            ..ok.clone()
        };
        assert!(ok.is_success());
        assert!(!failed.is_success());
    }
}
