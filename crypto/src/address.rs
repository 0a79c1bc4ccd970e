//! EIP-55 mixed-case checksum addresses.
//!
//! A hex digit of the address is upper-cased when the matching nibble of
//! `keccak256(lowercase_hex)` is 8 or higher.

use fairroll_types::{Address, EncodingError};

use crate::hash::keccak256;

/// Render an address with its EIP-55 checksum casing.
pub fn to_checksum(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0F;
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse an address, enforcing the checksum when the input is mixed-case.
///
/// All-lowercase and all-uppercase inputs carry no checksum and are accepted
/// as-is.
pub fn validate_checksum(s: &str) -> Result<Address, EncodingError> {
    let address = Address::from_hex(s)?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address)[2..] != *digits {
        return Err(EncodingError::KindMismatch {
            kind: "address",
            detail: format!("checksum mismatch for {s}"),
        });
    }
    Ok(address)
}
