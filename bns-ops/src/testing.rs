//! In-memory chain, gateway and confirmer doubles for operation tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use bns_core::error::{BnsError, Result};
use bns_core::traits::{ChainReader, ChainWriter, Confirmer, GatewayFetch};
use bns_core::types::{GatewayOutcome, GatewayResponse, PublisherMetadata, UpdateWarning};
use bns_core::{Address, TxHash, B256, U256};

/// Ledger state for one domain plus call bookkeeping.
pub struct MockChain {
    pub chain_id: u64,
    pub owner: Address,
    pub resolver: Address,
    pub signer: Address,
    pub balance: U256,
    pub publishers: HashMap<Address, PublisherMetadata>,
    /// Value the resolver holds after any submission, instead of the submitted one
    pub readback_override: Option<Vec<u8>>,
    pub fail_registry: bool,
    pub fail_submit: bool,
    contenthash: Mutex<Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

impl MockChain {
    pub fn new(owner: Address, resolver: Address) -> Self {
        Self {
            chain_id: bns_core::constants::BSC_CHAIN_ID,
            owner,
            resolver,
            signer: owner,
            balance: U256::from(10u64).pow(U256::from(18u64)),
            publishers: HashMap::new(),
            readback_override: None,
            fail_registry: false,
            fail_submit: false,
            contenthash: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_publisher(mut self, contract: Address, domain: &str, ipns_record: &str) -> Self {
        self.publishers.insert(
            contract,
            PublisherMetadata {
                domain: domain.into(),
                ipns_record: ipns_record.into(),
            },
        );
        self
    }

    pub fn with_contenthash(self, bytes: &[u8]) -> Self {
        *self.contenthash.lock().unwrap() = bytes.to_vec();
        self
    }

    pub fn stored_contenthash(&self) -> Vec<u8> {
        self.contenthash.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls().iter().any(|c| c == name)
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn chain_id(&self) -> Result<u64> {
        self.record("chain_id");
        Ok(self.chain_id)
    }

    async fn owner(&self, _node: B256) -> Result<Address> {
        self.record("owner");
        if self.fail_registry {
            return Err(BnsError::Rpc("registry unavailable".into()));
        }
        Ok(self.owner)
    }

    async fn resolver(&self, _node: B256) -> Result<Address> {
        self.record("resolver");
        if self.fail_registry {
            return Err(BnsError::Rpc("registry unavailable".into()));
        }
        Ok(self.resolver)
    }

    async fn publisher_metadata(&self, contract: Address) -> Result<PublisherMetadata> {
        self.record("publisher_metadata");
        self.publishers
            .get(&contract)
            .cloned()
            .ok_or_else(|| BnsError::Rpc(format!("execution reverted at {contract}")))
    }

    async fn contenthash(&self, _resolver: Address, _node: B256) -> Result<Vec<u8>> {
        self.record("contenthash");
        Ok(self.stored_contenthash())
    }

    async fn balance(&self, _account: Address) -> Result<U256> {
        self.record("balance");
        Ok(self.balance)
    }
}

#[async_trait]
impl ChainWriter for MockChain {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn submit_contenthash(&self, _resolver: Address, _node: B256, hash: &[u8]) -> Result<TxHash> {
        self.record("submit_contenthash");
        if self.fail_submit {
            return Err(BnsError::Transaction("insufficient funds for gas".into()));
        }
        let stored = self.readback_override.clone().unwrap_or_else(|| hash.to_vec());
        *self.contenthash.lock().unwrap() = stored;
        Ok(TxHash::repeat_byte(0xab))
    }

    async fn wait_for_confirmation(&self, _tx_hash: TxHash) -> Result<()> {
        self.record("wait_for_confirmation");
        Ok(())
    }
}

/// Gateway double: the first gateway fails, the second succeeds.
#[derive(Default)]
pub struct StubGateways {
    fetched: Mutex<Vec<(String, bool)>>,
}

impl StubGateways {
    pub fn fetched(&self) -> Vec<(String, bool)> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl GatewayFetch for StubGateways {
    async fn fetch(&self, record: &str, with_preview: bool) -> Vec<GatewayOutcome> {
        self.fetched.lock().unwrap().push((record.to_string(), with_preview));
        vec![
            GatewayOutcome {
                gateway: "ipfs.io".into(),
                url: format!("https://ipfs.io/ipns/{record}"),
                result: Err("Gateway ipfs.io failed: HTTP 504 Gateway Timeout".into()),
            },
            GatewayOutcome {
                gateway: "dweb.link".into(),
                url: format!("https://{record}.ipns.dweb.link/"),
                result: Ok(GatewayResponse {
                    status: 200,
                    content_type: Some("text/html".into()),
                    content_length: 42,
                    preview: with_preview.then(|| "<html>...".to_string()),
                }),
            },
        ]
    }
}

/// Confirmer that records every warning and answers with a fixed value.
pub struct RecordingConfirmer {
    answer: bool,
    seen: Mutex<Vec<UpdateWarning>>,
}

impl RecordingConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<UpdateWarning> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for RecordingConfirmer {
    async fn confirm(&self, warning: &UpdateWarning) -> bool {
        self.seen.lock().unwrap().push(warning.clone());
        self.answer
    }
}
