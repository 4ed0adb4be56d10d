//! Resolution checker: registry lookup, publisher match, gateway queries.

use tracing::{info, instrument, warn};

use bns_chain::{namehash, normalize_name};
use bns_core::error::Result;
use bns_core::traits::{ChainReader, GatewayFetch};
use bns_core::types::{CheckReport, PublisherReport};

use crate::config::CheckerConfig;

/// Checks that a domain resolves to the expected content publisher.
///
/// Flow:
/// 1. Hash the domain and read its owner and resolver from the registry
/// 2. Compare the resolver with the expected publisher
/// 3. On a match, read the publisher's metadata and query the gateways
pub struct ResolutionChecker<'a> {
    chain: &'a dyn ChainReader,
    gateways: &'a dyn GatewayFetch,
    config: CheckerConfig,
}

impl<'a> ResolutionChecker<'a> {
    /// Creates a checker.
    pub fn new(
        chain: &'a dyn ChainReader,
        gateways: &'a dyn GatewayFetch,
        config: CheckerConfig,
    ) -> Self {
        Self {
            chain,
            gateways,
            config,
        }
    }

    /// Runs the check.
    ///
    /// # Errors
    /// Returns [`BnsError::InvalidInput`](bns_core::BnsError::InvalidInput) for a
    /// malformed domain and [`BnsError::Rpc`](bns_core::BnsError::Rpc) if a
    /// registry or publisher read fails. Gateway failures are reported inside
    /// the result.
    #[instrument(skip(self), fields(domain = %self.config.domain))]
    pub async fn check(&self) -> Result<CheckReport> {
        let domain = normalize_name(&self.config.domain)?;
        info!("Checking domain resolution");

        let node = namehash(&domain);
        info!(%node, "Computed namehash");

        let owner = self.chain.owner(node).await?;
        info!(%owner, "Domain owner");

        let resolver = self.chain.resolver(node).await?;
        info!(%resolver, "Domain resolver");

        let mut report = CheckReport {
            domain,
            node,
            owner,
            resolver,
            expected_publisher: self.config.expected_publisher,
            publisher: None,
        };

        if !report.resolver_matches() {
            warn!(
                expected = %self.config.expected_publisher,
                "Domain resolver is not set to the IPNS contract"
            );
            return Ok(report);
        }

        info!("Domain resolver is correctly set to the IPNS contract");

        let metadata = self.chain.publisher_metadata(resolver).await?;
        info!(
            publisher_domain = %metadata.domain,
            ipns_record = %metadata.ipns_record,
            "Read publisher metadata"
        );

        let gateways = self.gateways.fetch(&metadata.ipns_record, false).await;
        report.publisher = Some(PublisherReport { metadata, gateways });

        Ok(report)
    }
}
