//! JSON-RPC clients for BNB Smart Chain.
//!
//! [`BnbClient`] performs read-only contract calls. [`BnbSigner`] adds a
//! private key and submits the `setContenthash` transaction.

use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::BoxTransport;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use bns_core::constants::{
    BNS_REGISTRY_ADDRESS, DEFAULT_BSC_RPC_URL, RECEIPT_POLL_INTERVAL_SECS,
    SET_CONTENTHASH_GAS_LIMIT, SET_CONTENTHASH_GAS_PRICE_WEI,
};
use bns_core::error::{BnsError, Result};
use bns_core::traits::{ChainReader, ChainWriter};
use bns_core::types::PublisherMetadata;

use crate::contracts::{IBnsRegistry, IContentPublisher, IContenthashResolver};

/// Chain client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// BNB Smart Chain RPC URL
    pub rpc_url: String,
    /// BNS registry contract
    pub registry: Address,
    /// Gas limit for `setContenthash`
    pub gas_limit: u64,
    /// Gas price for `setContenthash`, in wei
    pub gas_price_wei: u128,
    /// Seconds between receipt polls
    pub receipt_poll_interval_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_BSC_RPC_URL.into(),
            registry: BNS_REGISTRY_ADDRESS,
            gas_limit: SET_CONTENTHASH_GAS_LIMIT,
            gas_price_wei: SET_CONTENTHASH_GAS_PRICE_WEI,
            receipt_poll_interval_secs: RECEIPT_POLL_INTERVAL_SECS,
        }
    }
}

impl ChainConfig {
    /// Creates a new configuration with the given RPC URL.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Default::default()
        }
    }

    /// Overrides the registry address.
    pub fn with_registry(mut self, registry: Address) -> Self {
        self.registry = registry;
        self
    }

    /// Overrides the receipt poll interval.
    pub fn with_poll_interval(mut self, seconds: u64) -> Self {
        self.receipt_poll_interval_secs = seconds;
        self
    }

    fn parsed_url(&self) -> Result<Url> {
        self.rpc_url
            .parse()
            .map_err(|e| BnsError::InvalidInput(format!("Invalid RPC URL '{}': {e}", self.rpc_url)))
    }
}

fn rpc_error(e: impl std::fmt::Display) -> BnsError {
    BnsError::Rpc(e.to_string())
}

// ═══════════════════════════════════════════════════════════════════════════════
// READ-ONLY CLIENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only BNB Smart Chain client.
pub struct BnbClient {
    config: ChainConfig,
    rpc_url: Url,
    provider: RootProvider<BoxTransport>,
}

impl BnbClient {
    /// Creates a client with custom configuration.
    ///
    /// No request is made until the first call.
    pub fn with_config(config: ChainConfig) -> Result<Self> {
        let rpc_url = config.parsed_url()?;
        let provider = ProviderBuilder::new().on_http(rpc_url.clone()).boxed();

        Ok(Self {
            config,
            rpc_url,
            provider,
        })
    }

    fn config(&self) -> &ChainConfig {
        &self.config
    }
}

#[async_trait]
impl ChainReader for BnbClient {
    #[instrument(skip(self), fields(rpc_url = %self.rpc_url))]
    async fn chain_id(&self) -> Result<u64> {
        self.provider.get_chain_id().await.map_err(rpc_error)
    }

    #[instrument(skip(self))]
    async fn owner(&self, node: B256) -> Result<Address> {
        let registry = IBnsRegistry::new(self.config.registry, &self.provider);
        let owner = registry.owner(node).call().await.map_err(rpc_error)?._0;
        debug!(%owner, "Registry owner");
        Ok(owner)
    }

    #[instrument(skip(self))]
    async fn resolver(&self, node: B256) -> Result<Address> {
        let registry = IBnsRegistry::new(self.config.registry, &self.provider);
        let resolver = registry.resolver(node).call().await.map_err(rpc_error)?._0;
        debug!(%resolver, "Registry resolver");
        Ok(resolver)
    }

    #[instrument(skip(self))]
    async fn publisher_metadata(&self, contract: Address) -> Result<PublisherMetadata> {
        let publisher = IContentPublisher::new(contract, &self.provider);
        let ipns_record = publisher.ipnsRecord().call().await.map_err(rpc_error)?._0;
        let domain = publisher.domain().call().await.map_err(rpc_error)?._0;

        Ok(PublisherMetadata {
            domain,
            ipns_record,
        })
    }

    #[instrument(skip(self))]
    async fn contenthash(&self, resolver: Address, node: B256) -> Result<Vec<u8>> {
        let contract = IContenthashResolver::new(resolver, &self.provider);
        let hash = contract.contenthash(node).call().await.map_err(rpc_error)?._0;
        Ok(hash.to_vec())
    }

    #[instrument(skip(self))]
    async fn balance(&self, account: Address) -> Result<U256> {
        self.provider.get_balance(account).await.map_err(rpc_error)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIGNING CLIENT
// ═══════════════════════════════════════════════════════════════════════════════

/// BNB Smart Chain client that can sign resolver updates.
pub struct BnbSigner {
    client: BnbClient,
    signer: PrivateKeySigner,
}

impl BnbSigner {
    /// Creates a signing client from a hex private key (with or without `0x`).
    ///
    /// # Errors
    /// Returns [`BnsError::InvalidInput`] if the key does not parse. The key
    /// itself is never included in the message.
    pub fn new(config: ChainConfig, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key.trim().parse().map_err(|_| {
            BnsError::InvalidInput("PRIVATE_KEY is not a valid secp256k1 private key".into())
        })?;

        Ok(Self {
            client: BnbClient::with_config(config)?,
            signer,
        })
    }
}

#[async_trait]
impl ChainReader for BnbSigner {
    async fn chain_id(&self) -> Result<u64> {
        self.client.chain_id().await
    }

    async fn owner(&self, node: B256) -> Result<Address> {
        self.client.owner(node).await
    }

    async fn resolver(&self, node: B256) -> Result<Address> {
        self.client.resolver(node).await
    }

    async fn publisher_metadata(&self, contract: Address) -> Result<PublisherMetadata> {
        self.client.publisher_metadata(contract).await
    }

    async fn contenthash(&self, resolver: Address, node: B256) -> Result<Vec<u8>> {
        self.client.contenthash(resolver, node).await
    }

    async fn balance(&self, account: Address) -> Result<U256> {
        self.client.balance(account).await
    }
}

#[async_trait]
impl ChainWriter for BnbSigner {
    fn signer_address(&self) -> Address {
        self.signer.address()
    }

    #[instrument(skip(self, hash), fields(hash_len = hash.len()))]
    async fn submit_contenthash(&self, resolver: Address, node: B256, hash: &[u8]) -> Result<TxHash> {
        let config = self.client.config();
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(self.client.rpc_url.clone());

        let contract = IContenthashResolver::new(resolver, &provider);
        let call = contract
            .setContenthash(node, Bytes::copy_from_slice(hash))
            .gas(config.gas_limit.into())
            .gas_price(config.gas_price_wei);
        let pending = call
            .send()
            .await
            .map_err(|e| BnsError::Transaction(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "Submitted setContenthash");
        Ok(tx_hash)
    }

    #[instrument(skip(self))]
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()> {
        let interval = Duration::from_secs(self.client.config().receipt_poll_interval_secs);

        loop {
            let receipt = self
                .client
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| BnsError::Transaction(e.to_string()))?;

            match receipt {
                Some(receipt) if receipt.status() => {
                    info!(%tx_hash, block = ?receipt.block_number, "Transaction confirmed");
                    return Ok(());
                }
                Some(_) => {
                    return Err(BnsError::TransactionReverted {
                        tx_hash: tx_hash.to_string(),
                    });
                }
                None => {
                    debug!(%tx_hash, "Receipt not available yet");
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }
}
