//! Per-round seeds and short random tokens.

use fairroll_crypto::keccak256;
use fairroll_types::Seed;

use crate::{RngError, SeedSource};

/// Bytes drawn from the source for one seed.
const SEED_ENTROPY_LEN: usize = 32;

/// Bytes behind one [`random_hash`] token.
const TOKEN_LEN: usize = 16;

/// Operating-system randomness.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), RngError> {
        getrandom::getrandom(buf).map_err(|e| RngError::Entropy(e.to_string()))
    }

    fn name(&self) -> &str {
        "os"
    }
}

/// A fresh seed: Keccak-256 of 32 bytes from `source`.
pub fn make_seed_from(source: &dyn SeedSource) -> Result<Seed, RngError> {
    let mut raw = [0u8; SEED_ENTROPY_LEN];
    source.fill(&mut raw)?;
    Ok(Seed::new(keccak256(&raw)))
}

/// A fresh seed from OS randomness.
pub fn make_seed() -> Result<Seed, RngError> {
    make_seed_from(&OsSeedSource)
}

/// 16 bytes from `source` as 32 lowercase hex characters, no prefix.
pub fn random_hash_from(source: &dyn SeedSource) -> Result<String, RngError> {
    let mut raw = [0u8; TOKEN_LEN];
    source.fill(&mut raw)?;
    Ok(hex::encode(raw))
}

pub fn random_hash() -> Result<String, RngError> {
    random_hash_from(&OsSeedSource)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(u8);

    impl SeedSource for Constant {
        fn fill(&self, buf: &mut [u8]) -> Result<(), RngError> {
            buf.fill(self.0);
            Ok(())
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    struct Broken;

    impl SeedSource for Broken {
        fn fill(&self, _buf: &mut [u8]) -> Result<(), RngError> {
            Err(RngError::Entropy("unplugged".into()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn seed_is_keccak_of_entropy() {
        let seed = make_seed_from(&Constant(0xFF)).unwrap();
        assert_eq!(seed.as_bytes(), &keccak256(&[0xFF; 32]));
    }

    #[test]
    fn os_seeds_differ() {
        assert_ne!(make_seed().unwrap(), make_seed().unwrap());
    }

    #[test]
    fn random_hash_is_32_hex_chars() {
        let token = random_hash().unwrap();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(random_hash_from(&Constant(0xAB)).unwrap(), "ab".repeat(16));
    }

    #[test]
    fn source_failure_propagates() {
        assert!(matches!(make_seed_from(&Broken), Err(RngError::Entropy(_))));
        assert!(matches!(random_hash_from(&Broken), Err(RngError::Entropy(_))));
    }
}
