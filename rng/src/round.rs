//! Playing a round and auditing it afterwards.
//!
//! The round digest is `keccak256(bytes32 seed)`. The player's identity signs
//! it, and the draws come from that signature. A [`RoundRecord`] carries
//! everything a third party needs to recompute the outcome.

use fairroll_crypto::{recover, solidity_sha3, Identity};
use fairroll_types::{Address, DrawBatch, RangeSpec, Seed, Signature, TypedValue, H256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::sampler::derive_draws_from_signature;
use crate::RngError;

/// The published outcome of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub seed: Seed,
    pub digest: H256,
    pub signature: Signature,
    pub signer: Address,
    pub ranges: Vec<RangeSpec>,
    pub draws: DrawBatch,
}

fn round_digest(seed: &Seed) -> Result<H256, RngError> {
    Ok(solidity_sha3(&[TypedValue::bytes32(seed.as_bytes())])?)
}

/// Sign the round digest with `identity` and draw one value per range.
pub fn play_round<I: Identity + ?Sized>(
    identity: &I,
    seed: &Seed,
    ranges: &[RangeSpec],
) -> Result<RoundRecord, RngError> {
    let digest = round_digest(seed)?;
    let signature = identity.sign_digest(&digest)?;
    let draws = derive_draws_from_signature(&signature, ranges)?;
    let signer = identity.address();

    info!(%signer, %seed, draws = draws.len(), "played round");
    Ok(RoundRecord {
        seed: *seed,
        digest,
        signature,
        signer,
        ranges: ranges.to_vec(),
        draws,
    })
}

/// Check a published round end to end.
///
/// Recomputes the digest from the seed, recovers the signer and compares it
/// with both `expected_signer` and the recorded signer, then redraws every
/// range and compares with the recorded draws.
pub fn audit_round(record: &RoundRecord, expected_signer: &Address) -> Result<(), RngError> {
    let digest = round_digest(&record.seed)?;
    if digest != record.digest {
        return Err(RngError::DigestMismatch {
            expected: digest,
            found: record.digest,
        });
    }

    let recovered = recover(&digest, &record.signature)?;
    for expected in [expected_signer, &record.signer] {
        if recovered != *expected {
            return Err(RngError::SignerMismatch {
                expected: *expected,
                recovered,
            });
        }
    }

    let draws = derive_draws_from_signature(&record.signature, &record.ranges)?;
    if draws.len() != record.draws.len() {
        return Err(RngError::DrawCountMismatch {
            expected: draws.len(),
            found: record.draws.len(),
        });
    }
    for (index, (expected, found)) in draws.iter().zip(record.draws.iter()).enumerate() {
        if expected != found {
            return Err(RngError::DrawMismatch {
                index,
                expected: expected.clone(),
                found: found.clone(),
            });
        }
    }

    debug!(signer = %recovered, seed = %record.seed, "round audit passed");
    Ok(())
}
