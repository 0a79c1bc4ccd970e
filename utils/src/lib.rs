//! Shared utilities for fairroll.

pub mod hex;
pub mod logging;
pub mod time;

pub use hex::{add_0x, ZERO_X};
pub use logging::{init_logging, LogFormat};
pub use time::{format_elapsed, now_millis};
