//! Operation settings.

use std::path::PathBuf;

use bns_core::constants::{
    BSC_CHAIN_ID, DEFAULT_AUDIT_FILE, DEFAULT_DOMAIN, IPNS_PUBLISHER_ADDRESS, MIN_BALANCE_WEI,
};
use bns_core::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::confirm::ConfirmPolicy;

/// Resolution checker configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Domain to check
    pub domain: String,
    /// Publisher the resolver is expected to be
    pub expected_publisher: Address,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.into(),
            expected_publisher: IPNS_PUBLISHER_ADDRESS,
        }
    }
}

impl CheckerConfig {
    /// Checks a different domain against the default publisher.
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Overrides the expected publisher.
    pub fn with_publisher(mut self, publisher: Address) -> Self {
        self.expected_publisher = publisher;
        self
    }
}

/// Record updater configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Chain id the endpoint should report; a mismatch is logged, not fatal
    pub expected_chain_id: u64,
    /// Balance below which a low-balance warning is raised, in wei
    pub min_balance_wei: U256,
    /// Where the update record is written
    pub audit_path: PathBuf,
    /// How warnings that need confirmation are handled
    pub confirm: ConfirmPolicy,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            expected_chain_id: BSC_CHAIN_ID,
            min_balance_wei: MIN_BALANCE_WEI,
            audit_path: PathBuf::from(DEFAULT_AUDIT_FILE),
            confirm: ConfirmPolicy::default(),
        }
    }
}

impl UpdaterConfig {
    /// Writes the update record to `path`.
    pub fn with_audit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.audit_path = path.into();
        self
    }

    /// Sets the confirmation policy.
    pub fn with_confirm(mut self, confirm: ConfirmPolicy) -> Self {
        self.confirm = confirm;
        self
    }
}
