//! # BNS Core
//!
//! Core types, errors, and traits for BNB Name Service record tooling.
//!
//! This crate provides the building blocks shared by the other `bns-*` crates:
//!
//! - **Types**: Update records, operation reports, gateway outcomes and warnings
//! - **Errors**: One error enum covering every failure kind of the three operations
//! - **Constants**: Contract addresses, gateway templates and transaction parameters
//! - **Codec**: The per-character contenthash encoding used by the updater
//! - **Traits**: Seams for the chain client, the gateway client and confirmations
//!
//! ## Example
//!
//! ```rust
//! use bns_core::contenthash::{encode_cid, to_hex};
//!
//! let bytes = encode_cid("QmAbc123").unwrap();
//! assert_eq!(to_hex(&bytes), "0x516d416263313233");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod contenthash;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{BnsError, Result};
pub use traits::*;
pub use types::*;

/// Ethereum primitives re-exported so downstream crates agree on one version.
pub use alloy::primitives::{utils::format_ether, Address, Bytes, TxHash, B256, U256};
