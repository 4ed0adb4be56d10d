//! Record verifier: reads a publisher contract directly and queries gateways.

use tracing::{info, instrument};

use bns_core::error::{BnsError, Result};
use bns_core::traits::{ChainReader, GatewayFetch};
use bns_core::types::VerifyReport;
use bns_core::Address;

/// Verifies the IPNS record published by an arbitrary contract.
///
/// Unlike [`ResolutionChecker`](crate::ResolutionChecker) this skips the
/// registry and ownership lookups entirely.
pub struct RecordVerifier<'a> {
    chain: &'a dyn ChainReader,
    gateways: &'a dyn GatewayFetch,
}

impl<'a> RecordVerifier<'a> {
    /// Creates a verifier.
    pub fn new(chain: &'a dyn ChainReader, gateways: &'a dyn GatewayFetch) -> Self {
        Self { chain, gateways }
    }

    /// Parses a contract address given on the command line or in the environment.
    ///
    /// # Errors
    /// Returns [`BnsError::MissingConfig`] when the value is absent or blank and
    /// [`BnsError::InvalidInput`] when it is not an address.
    pub fn parse_contract(raw: Option<&str>) -> Result<Address> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BnsError::missing("CONTRACT_ADDRESS"))?;

        raw.parse()
            .map_err(|e| BnsError::InvalidInput(format!("CONTRACT_ADDRESS '{raw}' is not an address: {e}")))
    }

    /// Reads the contract's metadata and queries every gateway with HTML
    /// previews enabled.
    #[instrument(skip(self))]
    pub async fn verify(&self, contract: Address) -> Result<VerifyReport> {
        info!("Starting direct IPNS record verification");

        let metadata = self.chain.publisher_metadata(contract).await?;
        info!(
            domain = %metadata.domain,
            ipns_record = %metadata.ipns_record,
            "IPNS record from contract"
        );

        let gateways = self.gateways.fetch(&metadata.ipns_record, true).await;

        Ok(VerifyReport {
            contract,
            metadata,
            gateways,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockChain, StubGateways};

    fn contract() -> Address {
        Address::repeat_byte(0xc0)
    }

    #[tokio::test]
    async fn test_verify_reads_contract_directly() {
        let chain = MockChain::new(Address::repeat_byte(1), Address::ZERO).with_publisher(
            contract(),
            "daoko.bnb",
            "k51verify",
        );
        let gateways = StubGateways::default();

        let report = RecordVerifier::new(&chain, &gateways)
            .verify(contract())
            .await
            .unwrap();

        assert_eq!(report.contract, contract());
        assert_eq!(report.metadata.ipns_record, "k51verify");
        assert_eq!(chain.calls(), vec!["publisher_metadata"]);
        assert_eq!(gateways.fetched(), vec![("k51verify".to_string(), true)]);

        let html = report.gateways[1].result.as_ref().unwrap();
        assert!(html.preview.is_some());
    }

    #[tokio::test]
    async fn test_unreadable_contract_is_fatal() {
        let chain = MockChain::new(Address::repeat_byte(1), Address::ZERO);
        let gateways = StubGateways::default();

        let err = RecordVerifier::new(&chain, &gateways)
            .verify(contract())
            .await
            .unwrap_err();

        assert!(err.is_remote_read());
        assert!(gateways.fetched().is_empty());
    }

    #[test]
    fn test_parse_contract() {
        let parsed =
            RecordVerifier::parse_contract(Some(" 0xD7921CA7b35F9378bF8630ee429C6c10B0b26829 ")).unwrap();
        assert_eq!(parsed, bns_core::constants::IPNS_PUBLISHER_ADDRESS);

        let lower = RecordVerifier::parse_contract(Some("0xd7921ca7b35f9378bf8630ee429c6c10b0b26829")).unwrap();
        assert_eq!(lower, parsed);
    }

    #[test]
    fn test_parse_contract_missing_or_invalid() {
        assert!(matches!(
            RecordVerifier::parse_contract(None),
            Err(BnsError::MissingConfig { .. })
        ));
        assert!(matches!(
            RecordVerifier::parse_contract(Some("   ")),
            Err(BnsError::MissingConfig { .. })
        ));
        assert!(matches!(
            RecordVerifier::parse_contract(Some("0x1234")),
            Err(BnsError::InvalidInput(_))
        ));
    }
}
