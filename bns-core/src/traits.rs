//! Common traits for BNS record tooling.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing. The operations in `bns-ops` only see these
//! traits; `bns-chain` and `bns-gateway` provide the network-backed versions.

use async_trait::async_trait;

use alloy::primitives::{Address, TxHash, B256, U256};

use crate::error::Result;
use crate::types::{GatewayOutcome, PublisherMetadata, UpdateWarning};

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN READ TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only access to the BNS contracts.
///
/// Implementations might use:
/// - A JSON-RPC node (production)
/// - An in-memory ledger (tests)
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Chain id reported by the endpoint.
    async fn chain_id(&self) -> Result<u64>;

    /// Registry `owner(node)`.
    async fn owner(&self, node: B256) -> Result<Address>;

    /// Registry `resolver(node)`.
    async fn resolver(&self, node: B256) -> Result<Address>;

    /// Publisher `domain()` and `ipnsRecord()`.
    async fn publisher_metadata(&self, contract: Address) -> Result<PublisherMetadata>;

    /// Resolver `contenthash(node)`.
    async fn contenthash(&self, resolver: Address, node: B256) -> Result<Vec<u8>>;

    /// Native balance of an account, in wei.
    async fn balance(&self, account: Address) -> Result<U256>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN WRITE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Signing access to the resolver.
#[async_trait]
pub trait ChainWriter: ChainReader {
    /// Account that signs transactions.
    fn signer_address(&self) -> Address;

    /// Submits `setContenthash(node, hash)` and returns the transaction hash
    /// without waiting for it to be mined.
    async fn submit_contenthash(&self, resolver: Address, node: B256, hash: &[u8]) -> Result<TxHash>;

    /// Blocks until the transaction is mined.
    ///
    /// # Errors
    /// Fails if the transaction reverted or the node could not be queried.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// GATEWAY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Queries HTTP gateways for IPNS content.
#[async_trait]
pub trait GatewayFetch: Send + Sync {
    /// Fetches `record` through every configured gateway.
    ///
    /// Returns one outcome per gateway. Individual failures are captured in
    /// the outcome and never returned as an error.
    async fn fetch(&self, record: &str, with_preview: bool) -> Vec<GatewayOutcome>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIRMATION TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Decides whether to continue after a warning.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Returns true to continue, false to abort.
    async fn confirm(&self, warning: &UpdateWarning) -> bool;
}
