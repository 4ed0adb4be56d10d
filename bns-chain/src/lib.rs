//! # BNS Chain Integration
//!
//! BNB Smart Chain access for the BNS registry, resolvers and
//! content-publisher contracts. Implements the `bns-core` chain traits on top
//! of `alloy`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
pub mod contracts;
mod namehash;

pub use client::{BnbClient, BnbSigner, ChainConfig};
pub use namehash::{namehash, normalize_name};
