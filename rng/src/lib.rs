//! Fairness-verifiable randomness for game rounds.
//!
//! A round is fixed the moment its seed is signed: every draw is a pure
//! function of the signature bytes, the range index and the range itself, so
//! any third party holding the signature can recompute the outcome.
//!
//! - [`sampler`]: signature + ranges to one unbiased integer per range
//! - [`seed`]: unpredictable per-round seeds
//! - [`round`]: sign-and-draw, and the matching audit

pub mod error;
pub mod round;
pub mod sampler;
pub mod seed;

pub use error::{RngError, SamplerError};
pub use round::{audit_round, play_round, RoundRecord};
pub use sampler::{acceptance_threshold, derive_draws, derive_draws_from_signature, signature_source};
pub use seed::{make_seed, make_seed_from, random_hash, random_hash_from, OsSeedSource};

/// A source of unpredictable bytes for seeds.
pub trait SeedSource: Send + Sync {
    /// Fill `buf` entirely with fresh bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), RngError>;

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}
