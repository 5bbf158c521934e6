//! TextView - offset and length into the original input
//!
//! Zero-copy window over the document text. Used for element names,
//! attribute names/values, and text content.
//!
//! A view always points at the root `&str`, never at another view: building
//! a view over a view composes the offsets once, so repeated slicing never
//! grows an indirection chain.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Anything a [`TextView`] can be built over.
///
/// Implementors report the root text they ultimately refer to and where in it
/// they start, which is what keeps views flat.
pub trait TextSource<'a> {
    /// The backing text. Never itself a view.
    fn root(&self) -> &'a str;
    /// Offset of this source within `root()`.
    fn base(&self) -> usize;
    /// Length of this source in bytes.
    fn text_len(&self) -> usize;
}

impl<'a> TextSource<'a> for &'a str {
    #[inline]
    fn root(&self) -> &'a str {
        self
    }

    #[inline]
    fn base(&self) -> usize {
        0
    }

    #[inline]
    fn text_len(&self) -> usize {
        self.len()
    }
}

impl<'a> TextSource<'a> for &'a String {
    #[inline]
    fn root(&self) -> &'a str {
        self.as_str()
    }

    #[inline]
    fn base(&self) -> usize {
        0
    }

    #[inline]
    fn text_len(&self) -> usize {
        self.len()
    }
}

impl<'a> TextSource<'a> for TextView<'a> {
    #[inline]
    fn root(&self) -> &'a str {
        self.source
    }

    #[inline]
    fn base(&self) -> usize {
        self.offset
    }

    #[inline]
    fn text_len(&self) -> usize {
        self.len
    }
}

/// A window into the input document.
///
/// Offsets are byte offsets. Construction checks that both ends fall on
/// character boundaries, so `as_str()` never copies and never fails.
#[derive(Clone, Copy)]
pub struct TextView<'a> {
    /// Root text, never a view
    source: &'a str,
    /// Byte offset into `source`
    offset: usize,
    /// Length in bytes
    len: usize,
}

impl<'a> TextView<'a> {
    /// Create a view of `len` bytes starting at `offset` within `source`.
    ///
    /// `source` may itself be a view; the result is flattened against the root.
    pub fn new<S: TextSource<'a>>(source: S, offset: usize, len: usize) -> Result<Self> {
        let available = source.text_len();
        let out_of_bounds = Error::OutOfBounds {
            offset,
            len,
            available,
        };
        match offset.checked_add(len) {
            Some(end) if end <= available => {}
            _ => return Err(out_of_bounds),
        }

        let root = source.root();
        let start = source.base() + offset;
        if !root.is_char_boundary(start) || !root.is_char_boundary(start + len) {
            return Err(out_of_bounds);
        }

        Ok(Self {
            source: root,
            offset: start,
            len,
        })
    }

    /// View covering the whole of `source`.
    pub fn whole<S: TextSource<'a>>(source: S) -> Self {
        Self {
            source: source.root(),
            offset: source.base(),
            len: source.text_len(),
        }
    }

    /// View over `[start, end)` of `source`.
    pub fn range<S: TextSource<'a>>(source: S, start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(Error::OutOfBounds {
                offset: start,
                len: 0,
                available: source.text_len(),
            });
        }
        Self::new(source, start, end - start)
    }

    /// Empty view, used as "no text"
    #[inline]
    pub const fn empty() -> Self {
        Self {
            source: "",
            offset: 0,
            len: 0,
        }
    }

    /// Byte offset of this view within the root text
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the end offset (exclusive) within the root text
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The root text this view refers to
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Borrow the viewed text without copying
    #[inline]
    pub fn as_str(&self) -> &'a str {
        &self.source[self.offset..self.offset + self.len]
    }

    /// Copy the viewed text into an owned string
    pub fn to_owned_string(&self) -> String {
        self.as_str().to_owned()
    }

    /// Byte at `index`, relative to the view
    #[inline]
    pub fn byte_at(&self, index: usize) -> Option<u8> {
        if index < self.len {
            Some(self.source.as_bytes()[self.offset + index])
        } else {
            None
        }
    }

    /// Character starting at byte `index`, relative to the view
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.as_str().get(index..)?.chars().next()
    }

    /// Drop the first `count` bytes
    pub fn drop(&self, count: usize) -> Result<Self> {
        if count > self.len {
            return Err(Error::OutOfBounds {
                offset: count,
                len: 0,
                available: self.len,
            });
        }
        Self::new(*self, count, self.len - count)
    }

    /// Everything from `offset` to the end. Same as [`TextView::drop`].
    pub fn slice(&self, offset: usize) -> Result<Self> {
        self.drop(offset)
    }

    /// `len` bytes starting at `offset`
    pub fn slice_len(&self, offset: usize, len: usize) -> Result<Self> {
        Self::new(*self, offset, len)
    }

    /// Bytes in `[start, end)`
    pub fn subrange(&self, start: usize, end: usize) -> Result<Self> {
        Self::range(*self, start, end)
    }

    /// The first `len` bytes
    pub fn left(&self, len: usize) -> Result<Self> {
        Self::new(*self, 0, len)
    }

    /// Index of the first byte at or after `start` that is not whitespace or
    /// a control character. Returns `len()` if there is none.
    pub fn skip_whitespace(&self, start: usize) -> usize {
        let bytes = self.as_str().as_bytes();
        let mut i = start;
        while i < bytes.len() && bytes[i] <= b' ' {
            i += 1;
        }
        i
    }

    /// Bounded rendering for diagnostics.
    ///
    /// Views longer than `max` characters are cut and suffixed with `...`.
    pub fn preview(&self, max: usize) -> String {
        let text = self.as_str();
        match text.char_indices().nth(max) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_owned(),
        }
    }
}

/// Excerpt of `source` starting at byte `position`, at most `max` characters,
/// bracketed and marked with `...` where text was cut off.
pub(crate) fn excerpt(source: &str, position: usize, max: usize) -> String {
    let mut start = position.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let rest = &source[start..];
    let lead = if start > 0 { "..." } else { "" };
    match rest.char_indices().nth(max) {
        Some((cut, _)) => format!("{}[{}]...", lead, &rest[..cut]),
        None => format!("{}[{}]", lead, rest),
    }
}

impl Default for TextView<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextView")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("text", &self.as_str())
            .finish()
    }
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TextView<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for TextView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextView<'_> {}

impl Hash for TextView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl PartialEq<str> for TextView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TextView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<TextView<'_>> for &str {
    fn eq(&self, other: &TextView<'_>) -> bool {
        *self == other.as_str()
    }
}
