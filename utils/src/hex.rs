//! `0x` prefix for hex strings.

pub const ZERO_X: &str = "0x";

/// `s` with a leading `0x`, added only if missing.
pub fn add_0x(s: &str) -> String {
    if s.starts_with(ZERO_X) {
        s.to_owned()
    } else {
        format!("{ZERO_X}{s}")
    }
}
