//! Signature bytes and ordered ranges in, one unbiased integer per range out.
//!
//! For the range at index `i` with `span = hi - lo + 1`:
//!
//! 1. `r = keccak256(sig ‖ uint256(i))`, read as a 256-bit integer.
//! 2. While `r >= floor(2^255 / span) * span`, set `r = keccak256(r)`.
//! 3. The draw is `lo + r mod span`.
//!
//! The acceptance zone is an exact multiple of `span`, so every residue is
//! equally likely. A single-value range returns `lo` without hashing and an
//! inverted range is swapped.

use fairroll_crypto::{keccak256, solidity_sha3};
use fairroll_types::{Draw, DrawBatch, EncodingError, RangeSpec, Signature, TypedValue, Uint, H256};
use tracing::debug;

use crate::SamplerError;

/// Byte length of the signature source the sampler accepts.
pub const SOURCE_LEN: usize = 32;

/// Largest span the sampler accepts, as a power of two.
const MAX_SPAN_BITS: u32 = 255;

/// Derive one draw per range from a 32-byte signature source.
///
/// Draws are index-aligned with `ranges`. Fails if `signature` is not exactly
/// 32 bytes or any span exceeds 2^255.
pub fn derive_draws(signature: &[u8], ranges: &[RangeSpec]) -> Result<DrawBatch, SamplerError> {
    if signature.len() != SOURCE_LEN {
        return Err(EncodingError::InvalidLength {
            kind: "signature",
            expected: SOURCE_LEN,
            got: signature.len(),
        }
        .into());
    }
    ranges
        .iter()
        .enumerate()
        .map(|(index, range)| draw_one(signature, index, range))
        .collect()
}

/// Derive draws from a full 65-byte recoverable signature.
///
/// The signature is first compressed to 32 bytes with [`signature_source`].
pub fn derive_draws_from_signature(
    signature: &Signature,
    ranges: &[RangeSpec],
) -> Result<DrawBatch, SamplerError> {
    let source = signature_source(signature)?;
    derive_draws(source.as_bytes(), ranges)
}

/// `keccak256(signature)` over the packed `bytes` encoding.
pub fn signature_source(signature: &Signature) -> Result<H256, SamplerError> {
    Ok(solidity_sha3(&[TypedValue::bytes(signature.as_bytes().to_vec())])?)
}

/// `floor(2^255 / span) * span`: values of `r` below this are accepted.
pub fn acceptance_threshold(span: &Uint) -> Result<Uint, SamplerError> {
    let limit = Uint::pow2(MAX_SPAN_BITS);
    if span.is_zero() || span > &limit {
        return Err(SamplerError::RangeOverflow { span: span.clone() });
    }
    Ok(&(&limit / span) * span)
}

fn draw_one(signature: &[u8], index: usize, range: &RangeSpec) -> Result<Draw, SamplerError> {
    let range = range.normalized();
    if range.is_degenerate() {
        return Ok(range.lo);
    }

    let span = range.span();
    let threshold = acceptance_threshold(&span)?;

    let mut digest = solidity_sha3(&[TypedValue::bytes32(signature), TypedValue::uint(index)])?;
    let mut r = digest.to_uint();
    let mut rehashes = 0u32;
    while r >= threshold {
        digest = H256::new(keccak256(digest.as_bytes()));
        r = digest.to_uint();
        rehashes += 1;
    }

    let draw = &range.lo + &(&r % &span);
    debug!(index, %span, rehashes, %draw, "drew value");
    Ok(draw)
}
