//! Update record persisted after a successful contenthash update.

use alloy::primitives::{Address, TxHash};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::NETWORK_LABEL;
use crate::contenthash::to_hex;

/// Snapshot of one completed update transaction.
///
/// Fields are declared in the order they appear in the JSON file.
///
/// # JSON Format
/// ```text
/// {
///   "domain": "daoko.bnb",
///   "network": "bnbMainnet",
///   "newCID": "Qm…",
///   "newContenthash": "0x516d…",
///   "oldContenthash": "0x",
///   "resolverAddress": "0x…",
///   "timestamp": "2024-01-01T00:00:00.000Z",
///   "transactionHash": "0x…",
///   "updater": "0x…"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Domain whose resolver was updated
    pub domain: String,
    /// Network label
    pub network: String,
    /// CID that was written
    #[serde(rename = "newCID")]
    pub new_cid: String,
    /// Hex of the contenthash that was written
    #[serde(rename = "newContenthash")]
    pub new_contenthash: String,
    /// Hex of the contenthash before the update
    #[serde(rename = "oldContenthash")]
    pub old_contenthash: String,
    /// Resolver contract address (checksummed)
    #[serde(rename = "resolverAddress")]
    pub resolver_address: String,
    /// RFC 3339 UTC time the record was created
    pub timestamp: String,
    /// Hash of the update transaction
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    /// Address that signed the transaction (checksummed)
    pub updater: String,
}

/// Inputs for [`UpdateRecord::new`].
#[derive(Clone, Debug)]
pub struct UpdateRecordParts<'a> {
    /// Domain whose resolver was updated
    pub domain: &'a str,
    /// CID that was written
    pub new_cid: &'a str,
    /// Contenthash bytes that were written
    pub new_contenthash: &'a [u8],
    /// Contenthash bytes before the update
    pub old_contenthash: &'a [u8],
    /// Resolver contract
    pub resolver: Address,
    /// Update transaction
    pub transaction_hash: TxHash,
    /// Signing account
    pub updater: Address,
}

impl UpdateRecord {
    /// Builds a record stamped with the current time.
    pub fn new(parts: UpdateRecordParts<'_>) -> Self {
        Self::at(parts, Utc::now())
    }

    /// Builds a record stamped with the given time.
    pub fn at(parts: UpdateRecordParts<'_>, time: DateTime<Utc>) -> Self {
        Self {
            domain: parts.domain.to_string(),
            network: NETWORK_LABEL.to_string(),
            new_cid: parts.new_cid.to_string(),
            new_contenthash: to_hex(parts.new_contenthash),
            old_contenthash: to_hex(parts.old_contenthash),
            resolver_address: parts.resolver.to_checksum(None),
            timestamp: time.to_rfc3339_opts(SecondsFormat::Millis, true),
            transaction_hash: parts.transaction_hash.to_string(),
            updater: parts.updater.to_checksum(None),
        }
    }
}
