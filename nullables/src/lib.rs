//! Nullable infrastructure for deterministic testing.
//!
//! The ledger and the seed source are abstracted behind traits. This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network or the OS random source
//!
//! Usage: swap real implementations for nullables in tests.

pub mod ledger;
pub mod random;

pub use ledger::NullLedger;
pub use random::NullSeedSource;
