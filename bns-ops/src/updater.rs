//! Record updater: guarded `setContenthash` with read-back and audit record.

use tracing::{debug, info, instrument, warn};

use bns_chain::{namehash, normalize_name};
use bns_core::contenthash::{decode_readable, encode_cid, is_cid_v0, to_hex};
use bns_core::error::{BnsError, Result};
use bns_core::traits::{ChainWriter, Confirmer};
use bns_core::types::{UpdateOutcome, UpdateRecord, UpdateRecordParts, UpdateWarning};
use bns_core::{format_ether, Address};

use crate::audit::AuditFile;
use crate::config::UpdaterConfig;

/// What to write and where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Domain whose resolver receives the new contenthash
    pub domain: String,
    /// CID to store
    pub cid: String,
}

impl UpdateRequest {
    /// Creates a request.
    pub fn new(domain: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            cid: cid.into(),
        }
    }

    /// Checks the domain and CID without touching the network.
    ///
    /// # Errors
    /// Returns [`BnsError::MissingConfig`] for a blank CID and
    /// [`BnsError::InvalidInput`] for a malformed domain or a CID that has no
    /// single-byte encoding.
    pub fn validate(&self) -> Result<()> {
        self.prepare().map(|_| ())
    }

    /// Normalized name for hashing and the encoded contenthash.
    fn prepare(&self) -> Result<(String, Vec<u8>)> {
        let cid = self.cid.trim();
        if cid.is_empty() {
            return Err(BnsError::missing("NEW_CID"));
        }
        Ok((normalize_name(&self.domain)?, encode_cid(cid)?))
    }
}

/// Points a domain's resolver at a new CID.
///
/// # Flow
/// 1. Validate inputs and encode the CID
/// 2. Pre-flight warnings: CID prefix, signer balance, domain ownership
/// 3. Resolve the domain's resolver and read its current contenthash
/// 4. Submit `setContenthash` and wait for the receipt
/// 5. Read the value back and compare it byte for byte
/// 6. Write the update record
///
/// A single attempt is made. Nothing is written to disk unless step 5 passes.
pub struct RecordUpdater<'a> {
    chain: &'a dyn ChainWriter,
    confirmer: &'a dyn Confirmer,
    config: UpdaterConfig,
}

impl<'a> RecordUpdater<'a> {
    /// Creates an updater.
    pub fn new(chain: &'a dyn ChainWriter, confirmer: &'a dyn Confirmer, config: UpdaterConfig) -> Self {
        Self {
            chain,
            confirmer,
            config,
        }
    }

    /// Runs the update.
    ///
    /// # Errors
    /// - Precondition errors (`MissingConfig`, `InvalidInput`, `NoResolver`,
    ///   `Aborted`) before anything is submitted
    /// - `Rpc` if a chain read fails
    /// - `Transaction`/`TransactionReverted` if submission or confirmation fails
    /// - `VerificationMismatch` if the stored value differs after confirmation
    #[instrument(skip(self, request), fields(domain = %request.domain, cid = %request.cid))]
    pub async fn run(&self, request: &UpdateRequest) -> Result<UpdateOutcome> {
        let (domain, new_contenthash) = request.prepare()?;
        let cid = request.cid.trim();

        let mut warnings = Vec::new();

        if !is_cid_v0(cid) {
            self.raise(
                UpdateWarning::LegacyCidPrefix { cid: cid.to_string() },
                &mut warnings,
            )
            .await?;
        }

        let chain_id = self.chain.chain_id().await?;
        if chain_id == self.config.expected_chain_id {
            info!(chain_id, "Connected to BNB Smart Chain");
        } else {
            warn!(
                chain_id,
                expected = self.config.expected_chain_id,
                "RPC endpoint reports an unexpected chain id"
            );
        }

        let signer = self.chain.signer_address();
        info!(%signer, "Using account");

        let balance = self.chain.balance(signer).await?;
        info!(balance = %format_ether(balance), "Account balance (BNB)");
        if balance < self.config.min_balance_wei {
            self.raise(
                UpdateWarning::LowBalance {
                    balance,
                    minimum: self.config.min_balance_wei,
                },
                &mut warnings,
            )
            .await?;
        }

        let node = namehash(&domain);
        debug!(%node, "Computed namehash");

        let owner = self.chain.owner(node).await?;
        info!(%owner, "Domain owner");
        if owner != signer {
            self.raise(
                UpdateWarning::NotOwner {
                    domain: domain.clone(),
                    signer,
                    owner,
                },
                &mut warnings,
            )
            .await?;
        }

        let resolver = self.chain.resolver(node).await?;
        if resolver == Address::ZERO {
            return Err(BnsError::NoResolver { domain });
        }
        info!(%resolver, "Resolver contract");

        let old_contenthash = self.chain.contenthash(resolver, node).await?;
        if old_contenthash.is_empty() {
            info!("No contenthash currently set");
        } else {
            info!(contenthash = %to_hex(&old_contenthash), "Current contenthash");
            match decode_readable(&old_contenthash) {
                Ok(text) => info!(decoded = %text, "Decoded current contenthash"),
                Err(e) => warn!(error = %e, "Could not decode current contenthash"),
            }
        }

        info!(
            cid,
            contenthash = %to_hex(&new_contenthash),
            "Updating contenthash"
        );
        let tx_hash = self
            .chain
            .submit_contenthash(resolver, node, &new_contenthash)
            .await?;
        info!(%tx_hash, "Transaction sent");

        info!("Waiting for confirmation");
        self.chain.wait_for_confirmation(tx_hash).await?;
        info!(%tx_hash, "Transaction confirmed");

        let stored = self.chain.contenthash(resolver, node).await?;
        if stored != new_contenthash {
            return Err(BnsError::VerificationMismatch {
                expected: to_hex(&new_contenthash),
                actual: to_hex(&stored),
            });
        }
        info!("Contenthash verified after update");

        let record = UpdateRecord::new(UpdateRecordParts {
            domain: &request.domain,
            new_cid: cid,
            new_contenthash: &new_contenthash,
            old_contenthash: &old_contenthash,
            resolver,
            transaction_hash: tx_hash,
            updater: signer,
        });

        let audit = AuditFile::new(&self.config.audit_path);
        audit.write(&record).await?;

        Ok(UpdateOutcome {
            record,
            audit_path: audit.path().to_path_buf(),
            warnings,
        })
    }

    /// Logs a warning, asks for confirmation where needed and records it.
    async fn raise(&self, warning: UpdateWarning, warnings: &mut Vec<UpdateWarning>) -> Result<()> {
        warn!(%warning, "Pre-flight warning");
        if let Some(hint) = warning.hint() {
            warn!("{hint}");
        }

        if warning.requires_confirmation() && !self.confirmer.confirm(&warning).await {
            return Err(BnsError::Aborted(warning.to_string()));
        }

        warnings.push(warning);
        Ok(())
    }
}
