//! Monero address format checks.
//!
//! Full base58-check decoding is too expensive on-chain; length, leading
//! character and alphabet membership catch the realistic mistakes (wrong
//! network, truncation, pasted garbage). The backend re-validates before
//! sending.

use crate::state::MAX_XMR_ADDRESS_LEN;

/// Standard and subaddress length.
pub const STANDARD_ADDRESS_LEN: usize = 95;
/// Integrated address length.
pub const INTEGRATED_ADDRESS_LEN: usize = MAX_XMR_ADDRESS_LEN;

/// Monero's base58 alphabet (no 0, O, I, l).
const XMR_BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub fn is_valid_xmr_address(address: &str) -> bool {
    let bytes = address.as_bytes();
    if bytes.len() != STANDARD_ADDRESS_LEN && bytes.len() != INTEGRATED_ADDRESS_LEN {
        return false;
    }
    // Mainnet prefixes: 4 (standard/integrated), 8 (subaddress).
    if !matches!(bytes[0], b'4' | b'8') {
        return false;
    }
    bytes.iter().all(|b| XMR_BASE58.contains(b))
}
