//! Nullable randomness: seed bytes from a fixed script.

use fairroll_rng::{RngError, SeedSource};
use std::sync::Mutex;

/// A deterministic seed source for testing.
///
/// Each `fill` hands out the next configured chunk, cycling when exhausted.
/// A chunk shorter than the buffer is repeated to fill it.
pub struct NullSeedSource {
    outputs: Vec<Vec<u8>>,
    index: Mutex<usize>,
}

impl NullSeedSource {
    /// Create with a sequence of deterministic chunks.
    pub fn new(outputs: Vec<Vec<u8>>) -> Self {
        Self {
            outputs,
            index: Mutex::new(0),
        }
    }

    /// Create with a single chunk returned for every call.
    pub fn constant(value: impl Into<Vec<u8>>) -> Self {
        Self::new(vec![value.into()])
    }

    /// How many times `fill` has been called.
    pub fn calls(&self) -> usize {
        *self.index.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SeedSource for NullSeedSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), RngError> {
        let mut idx = self.index.lock().unwrap_or_else(|e| e.into_inner());
        if self.outputs.is_empty() {
            return Err(RngError::Entropy("null seed source has no outputs".into()));
        }
        let chunk = &self.outputs[*idx % self.outputs.len()];
        *idx += 1;
        if chunk.is_empty() {
            return Err(RngError::Entropy("null seed source chunk is empty".into()));
        }
        for (dst, src) in buf.iter_mut().zip(chunk.iter().cycle()) {
            *dst = *src;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "null-random"
    }
}
