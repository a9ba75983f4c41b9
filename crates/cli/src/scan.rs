// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-pass byte scanning over pre-serialized JSON.
//!
//! Nothing here parses JSON. The scanners track just enough state (nesting
//! depth, whether the cursor is inside a string literal, and whether the
//! previous byte was a backslash) to find structural delimiters without
//! being fooled by braces, brackets, or quotes inside string values.

use std::ops::Range;

use memchr::memmem;

/// String-literal state shared by the scanners.
#[derive(Debug, Default, Clone, Copy)]
struct LiteralState {
    in_string: bool,
    escape_next: bool,
}

impl LiteralState {
    /// Feed one byte. Returns true if the byte is structural, i.e. outside
    /// any string literal and not itself a quote or escape.
    #[inline]
    fn structural(&mut self, b: u8) -> bool {
        if self.escape_next {
            self.escape_next = false;
            return false;
        }
        match b {
            b'\\' => {
                self.escape_next = true;
                false
            }
            b'"' => {
                self.in_string = !self.in_string;
                false
            }
            _ => !self.in_string,
        }
    }
}

/// Find the index of the `]` matching the `[` at `open`.
///
/// Brackets inside string literals are ignored. Returns `None` if `open`
/// is not a `[` or the array is never closed.
pub fn match_closing_bracket(buf: &[u8], open: usize) -> Option<usize> {
    if buf.get(open) != Some(&b'[') {
        return None;
    }

    let mut state = LiteralState::default();
    let mut depth = 1usize;

    for (i, &b) in buf.iter().enumerate().skip(open + 1) {
        if !state.structural(b) {
            continue;
        }
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Iterator over the top-level `{...}` objects in a byte range.
///
/// Yields inclusive byte ranges (`start..end+1`) relative to the scanned
/// slice, in order. Bytes between objects (commas, whitespace) are skipped.
/// A trailing object that is never closed is not yielded.
#[derive(Debug, Clone)]
pub struct GoalSpans<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: usize,
    state: LiteralState,
    object_start: Option<usize>,
}

impl<'a> GoalSpans<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            depth: 0,
            state: LiteralState::default(),
            object_start: None,
        }
    }
}

impl Iterator for GoalSpans<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.buf.len() {
            let i = self.pos;
            let b = self.buf[i];
            self.pos += 1;

            if !self.state.structural(b) {
                continue;
            }

            match b {
                b'{' => {
                    if self.depth == 0 {
                        self.object_start = Some(i);
                    }
                    self.depth += 1;
                }
                b'}' => {
                    // Stray closer at top level; nothing to balance.
                    if self.depth == 0 {
                        continue;
                    }
                    self.depth -= 1;
                    if self.depth == 0
                        && let Some(start) = self.object_start.take()
                    {
                        return Some(start..i + 1);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Position of the first occurrence of `needle` in `haystack`.
#[inline]
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    memmem::find(haystack, needle)
}

/// Position of the first `byte` at or after `from`.
#[inline]
pub fn find_byte_from(haystack: &[u8], byte: u8, from: usize) -> Option<usize> {
    let tail = haystack.get(from..)?;
    memchr::memchr(byte, tail).map(|i| from + i)
}

/// Position of the last `byte` in `haystack`.
#[inline]
pub fn rfind_byte(haystack: &[u8], byte: u8) -> Option<usize> {
    memchr::memrchr(byte, haystack)
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
