// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON string-literal escaping.

use std::borrow::Cow;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Escape a value for embedding between the quotes of a JSON string.
///
/// Returns the input borrowed when nothing needs escaping, which is the
/// common case for status values and identifiers.
pub fn escape(s: &str) -> Cow<'_, str> {
    let Some(first) = s.bytes().position(needs_escape) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);

    for c in s[first..].chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let b = c as u8;
                out.push_str("\\u00");
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
            c => out.push(c),
        }
    }

    Cow::Owned(out)
}

/// Append the escaped form of `s` to a byte buffer.
pub fn write_escaped(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(escape(s).as_bytes());
}

#[inline]
fn needs_escape(b: u8) -> bool {
    b == b'\\' || b == b'"' || b < 0x20
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
