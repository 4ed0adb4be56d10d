//! Network and contract constants for BNS on BNB Smart Chain mainnet.
//!
//! Values mirror what the live `daoko.bnb` deployment uses.

use alloy::primitives::{address, Address, U256};

// ═══════════════════════════════════════════════════════════════════════════════
// NETWORK
// ═══════════════════════════════════════════════════════════════════════════════

/// Public BNB Smart Chain mainnet JSON-RPC endpoint.
pub const DEFAULT_BSC_RPC_URL: &str = "https://bsc-dataseed.binance.org/";

/// BNB Smart Chain mainnet chain id.
pub const BSC_CHAIN_ID: u64 = 56;

/// Network label written into update records.
pub const NETWORK_LABEL: &str = "bnbMainnet";

/// Native currency symbol used when printing balances.
pub const NATIVE_SYMBOL: &str = "BNB";

// ═══════════════════════════════════════════════════════════════════════════════
// CONTRACTS
// ═══════════════════════════════════════════════════════════════════════════════

/// BNS registry contract (`owner(bytes32)`, `resolver(bytes32)`).
pub const BNS_REGISTRY_ADDRESS: Address = address!("08CEd32a7f3eeC915Ba84415e9C07a7286977956");

/// Content-publisher contract that `daoko.bnb` is expected to resolve to.
pub const IPNS_PUBLISHER_ADDRESS: Address = address!("D7921CA7b35F9378bF8630ee429C6c10B0b26829");

/// Domain used when none is configured.
pub const DEFAULT_DOMAIN: &str = "daoko.bnb";

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSACTION PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Gas limit for `setContenthash`.
pub const SET_CONTENTHASH_GAS_LIMIT: u64 = 100_000;

/// Gas price for `setContenthash`: 3 gwei.
pub const SET_CONTENTHASH_GAS_PRICE_WEI: u128 = 3_000_000_000;

/// Balance below which the updater warns: 0.01 BNB.
pub const MIN_BALANCE_WEI: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

/// Seconds between receipt polls while waiting for confirmation.
pub const RECEIPT_POLL_INTERVAL_SECS: u64 = 3;

// ═══════════════════════════════════════════════════════════════════════════════
// CONTENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Prefix of legacy CIDv0 identifiers. BNB.me works best with these.
pub const CID_V0_PREFIX: &str = "Qm";

/// Placeholder substituted with the IPNS record in gateway templates.
pub const GATEWAY_RECORD_PLACEHOLDER: &str = "{record}";

/// Path-style IPNS gateway.
pub const IPFS_IO_GATEWAY: &str = "https://ipfs.io/ipns/{record}";

/// Subdomain-style IPNS gateway.
pub const DWEB_LINK_GATEWAY: &str = "https://{record}.ipns.dweb.link/";

/// Per-request gateway timeout in milliseconds.
pub const GATEWAY_TIMEOUT_MS: u64 = 10_000;

/// Number of characters kept in an HTML preview.
pub const HTML_PREVIEW_CHARS: usize = 200;

/// Pause applied by the default confirmation policy, in seconds.
pub const CONFIRM_DELAY_SECS: u64 = 5;

/// Default file name for the update record.
pub const DEFAULT_AUDIT_FILE: &str = "update-info.json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_balance_is_one_hundredth_bnb() {
        let one_bnb = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(MIN_BALANCE_WEI * U256::from(100u64), one_bnb);
    }

    #[test]
    fn test_gas_price_is_three_gwei() {
        assert_eq!(SET_CONTENTHASH_GAS_PRICE_WEI, 3 * 1_000_000_000);
    }

    #[test]
    fn test_registry_and_publisher_differ() {
        assert_ne!(BNS_REGISTRY_ADDRESS, IPNS_PUBLISHER_ADDRESS);
        assert!(!BNS_REGISTRY_ADDRESS.is_zero());
    }

    #[test]
    fn test_gateway_templates_carry_placeholder() {
        assert!(IPFS_IO_GATEWAY.contains(GATEWAY_RECORD_PLACEHOLDER));
        assert!(DWEB_LINK_GATEWAY.contains(GATEWAY_RECORD_PLACEHOLDER));
    }
}
