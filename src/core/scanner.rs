//! Byte cursor with SIMD-accelerated searching
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use memchr::{memchr, memchr2, memmem};

/// Forward-only cursor over the input bytes
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner at the start of `input`
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Jump to an absolute byte position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Check if at end of input
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Byte at an absolute position
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.get(pos).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Skip spaces, tabs, line breaks and any other control byte
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos] <= b' ' {
            self.pos += 1;
        }
    }

    /// Find next occurrence of a specific byte
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, self.input.get(self.pos..)?).map(|i| self.pos + i)
    }

    /// Find next occurrence of either of two bytes
    #[inline]
    pub fn find_byte2(&self, b1: u8, b2: u8) -> Option<usize> {
        memchr2(b1, b2, self.input.get(self.pos..)?).map(|i| self.pos + i)
    }

    /// Find next occurrence of a byte sequence
    #[inline]
    pub fn find_seq(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(self.input.get(self.pos..)?, needle).map(|i| self.pos + i)
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(needle))
    }

    /// Compare the bytes at the current position with `input[start..end]`
    pub fn matches_range(&self, start: usize, end: usize) -> bool {
        match self.input.get(start..end) {
            Some(expected) => self.starts_with(expected),
            None => false,
        }
    }

    /// Advance until whitespace, `/` or `>`, returning where the run started
    pub fn read_name(&mut self) -> usize {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b <= b' ' || b == b'/' || b == b'>' {
                break;
            }
            self.pos += 1;
        }
        start
    }
}
