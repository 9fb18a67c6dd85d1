//! Key comparison and diagnostic rendering.
//!
//! Keys are arbitrary byte strings with an explicit length. Nothing here
//! assumes a terminator or a text encoding.

use alloc::string::String;
use core::fmt::Write;

/// Returns `true` if both keys have the same length and the same bytes.
///
/// ```rust
/// # use probe_table::key::keys_match;
/// assert!(keys_match(b"ab", b"ab"));
/// assert!(!keys_match(b"ab", b"ba"));
/// assert!(!keys_match(b"ab", b"ab\0"));
/// ```
#[inline(always)]
pub fn keys_match(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a == b
}

#[inline(always)]
fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

/// Renders a key for human consumption.
///
/// Keys made entirely of printable ASCII come back as `char key:[...]` with
/// the literal text, anything else as `hex key:[0x...]` with two lowercase hex
/// digits per byte.
///
/// ```rust
/// # use probe_table::key::render_key;
/// assert_eq!(render_key(b"ab"), "char key:[ab]");
/// assert_eq!(render_key(&[0x00, 0xff]), "hex key:[0x00ff]");
/// ```
pub fn render_key(key: &[u8]) -> String {
    let mut out = String::with_capacity(key.len() * 2 + 12);

    if key.iter().copied().all(is_printable) {
        out.push_str("char key:[");
        out.extend(key.iter().map(|&b| b as char));
    } else {
        out.push_str("hex key:[0x");
        for b in key {
            // Writing into a String cannot fail.
            let _ = write!(out, "{b:02x}");
        }
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_never_matches() {
        assert!(!keys_match(b"abc", b"ab"));
        assert!(!keys_match(b"", b"a"));
        assert!(keys_match(b"", b""));
    }

    #[test]
    fn no_case_folding() {
        assert!(!keys_match(b"Key", b"key"));
    }

    #[test]
    fn embedded_nul_is_significant() {
        assert!(keys_match(b"a\0b", b"a\0b"));
        assert!(!keys_match(b"a\0b", b"a\0c"));
    }

    #[test]
    fn render_printable() {
        assert_eq!(render_key(b"hello world"), "char key:[hello world]");
        assert_eq!(render_key(b""), "char key:[]");
    }

    #[test]
    fn render_binary() {
        assert_eq!(render_key(&[0xde, 0xad, 0xbe, 0xef]), "hex key:[0xdeadbeef]");
        assert_eq!(render_key(b"tab\there"), "hex key:[0x7461620968657265]");
    }
}
