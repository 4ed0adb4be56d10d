//! HTTP gateway client for IPNS records.
//!
//! Supports any number of URL templates; the defaults are ipfs.io and dweb.link.

mod gateway;

pub use gateway::{GatewayClient, GatewayConfig, GatewayTemplate};
