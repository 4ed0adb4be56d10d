//! Contenthash codec used by the BNS updater.
//!
//! The resolver stores the CID's characters directly: each character becomes
//! the byte equal to its code point. This is not the EIP-1577 multicodec
//! layout (`0xe3 0x01 …`) that standard resolvers and gateways expect, so a
//! record written here reads back as text, not as a binary CID.
//!
//! ```text
//! "QmAbc123" -> 0x51 6d 41 62 63 31 32 33
//! ```

use crate::error::{BnsError, Result};

/// Encodes a CID into contenthash bytes, one byte per character.
///
/// # Errors
/// Returns [`BnsError::InvalidInput`] if a character's code point is above
/// `0xFF` and therefore has no single-byte form.
pub fn encode_cid(cid: &str) -> Result<Vec<u8>> {
    cid.chars()
        .enumerate()
        .map(|(index, c)| {
            u8::try_from(u32::from(c)).map_err(|_| {
                BnsError::InvalidInput(format!(
                    "CID character {c:?} at position {index} (U+{:04X}) does not fit in one byte",
                    u32::from(c)
                ))
            })
        })
        .collect()
}

/// Decodes contenthash bytes back into the CID they were encoded from.
///
/// Exact inverse of [`encode_cid`] for every input `encode_cid` accepts.
pub fn decode_cid(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decodes contenthash bytes for display.
///
/// Succeeds only when every byte maps to a printable character. A standard
/// multicodec contenthash starts with control bytes and is rejected here.
///
/// # Errors
/// Returns [`BnsError::Decode`] naming the first non-printable byte.
pub fn decode_readable(bytes: &[u8]) -> Result<String> {
    if let Some((offset, byte)) = bytes
        .iter()
        .enumerate()
        .find(|(_, b)| char::from(**b).is_control())
    {
        return Err(BnsError::Decode(format!(
            "non-printable byte 0x{byte:02x} at offset {offset}"
        )));
    }

    Ok(decode_cid(bytes))
}

/// Formats bytes as `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Returns true if the CID uses the legacy CIDv0 prefix.
pub fn is_cid_v0(cid: &str) -> bool {
    cid.starts_with(crate::constants::CID_V0_PREFIX)
}
