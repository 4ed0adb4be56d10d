//! # BNS Operations
//!
//! The three record operations, each returning a typed report:
//!
//! - [`ResolutionChecker`]: registry lookup, publisher match, gateway queries
//! - [`RecordVerifier`]: direct publisher read plus gateway queries with preview
//! - [`RecordUpdater`]: guarded `setContenthash` with read-back and audit record
//!
//! Operations never terminate the process. Callers decide what a failure means.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod audit;
mod checker;
mod config;
mod confirm;
mod updater;
mod verifier;

#[cfg(test)]
mod testing;

pub use audit::AuditFile;
pub use checker::ResolutionChecker;
pub use config::{CheckerConfig, UpdaterConfig};
pub use confirm::{AutoConfirm, ConfirmPolicy, PromptConfirm};
pub use updater::{RecordUpdater, UpdateRequest};
pub use verifier::RecordVerifier;
