//! Domain types for BNS record tooling.
//!
//! - [`UpdateRecord`]: Persisted summary of one completed contenthash update
//! - [`GatewayOutcome`]: Result of probing one HTTP gateway
//! - [`CheckReport`] / [`VerifyReport`]: What the read-only operations found
//! - [`UpdateWarning`]: Pre-flight warnings raised by the updater

mod record;
mod report;
mod warning;

pub use record::*;
pub use report::*;
pub use warning::*;
