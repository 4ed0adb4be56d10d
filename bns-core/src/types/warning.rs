//! Pre-flight warnings raised by the updater.

use std::fmt;

use alloy::primitives::{utils::format_ether, Address, U256};

use crate::constants::NATIVE_SYMBOL;

/// Something suspicious found before an update is submitted.
///
/// None of these stop the update on their own. Those that
/// [require confirmation](UpdateWarning::requires_confirmation) are handed to
/// a [`Confirmer`](crate::traits::Confirmer) first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateWarning {
    /// The CID does not start with the CIDv0 prefix.
    LegacyCidPrefix {
        /// CID that was given
        cid: String,
    },
    /// The signer may not have enough funds for gas.
    LowBalance {
        /// Current balance in wei
        balance: U256,
        /// Threshold in wei
        minimum: U256,
    },
    /// The signer is not the domain's registered owner.
    NotOwner {
        /// Domain being updated
        domain: String,
        /// Signing account
        signer: Address,
        /// Registered owner
        owner: Address,
    },
}

impl UpdateWarning {
    /// Returns true if the operator must confirm before the update continues.
    pub fn requires_confirmation(&self) -> bool {
        !matches!(self, UpdateWarning::LowBalance { .. })
    }

    /// Follow-up advice shown under the warning.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            UpdateWarning::LegacyCidPrefix { .. } => Some(
                "If you have a CIDv1 hash (starting with 'baf'), convert it using: \
                 ipfs cid format -v 0 -b base58btc your_cid",
            ),
            UpdateWarning::LowBalance { .. } => None,
            UpdateWarning::NotOwner { .. } => {
                Some("You may not have permission to update the resolver's contenthash.")
            }
        }
    }
}

impl fmt::Display for UpdateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateWarning::LegacyCidPrefix { cid } => write!(
                f,
                "The CID {cid} doesn't start with 'Qm'. BNB.me works best with CIDv0 format."
            ),
            UpdateWarning::LowBalance { balance, minimum } => write!(
                f,
                "Low balance ({} {NATIVE_SYMBOL}, recommended at least {} {NATIVE_SYMBOL}). \
                 You may need more {NATIVE_SYMBOL} for the transaction.",
                format_ether(*balance),
                format_ether(*minimum)
            ),
            UpdateWarning::NotOwner {
                domain,
                signer,
                owner,
            } => write!(f, "You ({signer}) are not the owner of {domain} ({owner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_requirements() {
        let legacy = UpdateWarning::LegacyCidPrefix { cid: "bafy".into() };
        let low = UpdateWarning::LowBalance {
            balance: U256::ZERO,
            minimum: U256::from(1u64),
        };
        let owner = UpdateWarning::NotOwner {
            domain: "daoko.bnb".into(),
            signer: Address::repeat_byte(1),
            owner: Address::repeat_byte(2),
        };

        assert!(legacy.requires_confirmation());
        assert!(!low.requires_confirmation());
        assert!(owner.requires_confirmation());
    }

    #[test]
    fn test_display_mentions_inputs() {
        let warning = UpdateWarning::NotOwner {
            domain: "daoko.bnb".into(),
            signer: Address::repeat_byte(1),
            owner: Address::repeat_byte(2),
        };
        let text = warning.to_string();
        assert!(text.contains("daoko.bnb"));
        assert!(text.contains(&Address::repeat_byte(1).to_string()));
        assert!(warning.hint().is_some());

        let legacy = UpdateWarning::LegacyCidPrefix { cid: "bafyabc".into() };
        assert!(legacy.to_string().contains("bafyabc"));
        assert!(legacy.hint().unwrap().contains("base58btc"));
    }
}
