//! Packed Entry Encoding
//!
//! Every node of a parsed document is one `u64` in a flat buffer. Two record
//! shapes share the word, told apart by the low two kind bits:
//!
//! ```text
//! span record     | start:31 (bit 33) | end:31 (bit 2)              | kind:2 |
//! element record  | start:30 (bit 34) | end:30 (bit 4) | - | content:1 | kind:2 |
//! ```
//!
//! Span records index into the source text, element records index into the
//! entries buffer (their child range). The widths bound a document to
//! [`MAX_SOURCE_LEN`] bytes of text and [`MAX_ENTRIES`] buffer slots.

/// Largest source text a span record can address, in bytes.
pub const MAX_SOURCE_LEN: usize = SPAN_MASK as usize;

/// Largest number of entries an element record can address.
pub const MAX_ENTRIES: usize = ELEMENT_MASK as usize;

const SPAN_MASK: u64 = 0x7fff_ffff;
const ELEMENT_MASK: u64 = 0x3fff_ffff;
const KIND_MASK: u64 = 0b11;
const CONTENT_BIT: u64 = 0b100;

const SPAN_START_SHIFT: u32 = 33;
const SPAN_END_SHIFT: u32 = 2;
const ELEMENT_START_SHIFT: u32 = 34;
const ELEMENT_END_SHIFT: u32 = 4;

/// The two kind bits of a record.
///
/// `Name` and `Content` mark span records, `Attribute` and `Tag` element
/// records. All four bit patterns are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordKind {
    Name = 0,
    Attribute = 1,
    Tag = 2,
    Content = 3,
}

impl RecordKind {
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => RecordKind::Name,
            1 => RecordKind::Attribute,
            2 => RecordKind::Tag,
            _ => RecordKind::Content,
        }
    }

    /// True for the kinds stored as span records
    #[inline]
    pub const fn is_span(self) -> bool {
        matches!(self, RecordKind::Name | RecordKind::Content)
    }
}

#[inline]
pub const fn encode_span(start: usize, end: usize, kind: RecordKind) -> u64 {
    debug_assert!(start as u64 <= SPAN_MASK && end as u64 <= SPAN_MASK);
    ((start as u64 & SPAN_MASK) << SPAN_START_SHIFT)
        | ((end as u64 & SPAN_MASK) << SPAN_END_SHIFT)
        | (kind as u64 & KIND_MASK)
}

#[inline]
pub const fn encode_element(start: usize, end: usize, kind: RecordKind, has_content: bool) -> u64 {
    debug_assert!(start as u64 <= ELEMENT_MASK && end as u64 <= ELEMENT_MASK);
    let content = if has_content { CONTENT_BIT } else { 0 };
    ((start as u64 & ELEMENT_MASK) << ELEMENT_START_SHIFT)
        | ((end as u64 & ELEMENT_MASK) << ELEMENT_END_SHIFT)
        | content
        | (kind as u64 & KIND_MASK)
}

#[inline]
pub const fn raw_kind(raw: u64) -> RecordKind {
    RecordKind::from_bits((raw & KIND_MASK) as u8)
}

#[inline]
pub const fn span_start(raw: u64) -> usize {
    ((raw >> SPAN_START_SHIFT) & SPAN_MASK) as usize
}

#[inline]
pub const fn span_end(raw: u64) -> usize {
    ((raw >> SPAN_END_SHIFT) & SPAN_MASK) as usize
}

#[inline]
pub const fn element_start(raw: u64) -> usize {
    ((raw >> ELEMENT_START_SHIFT) & ELEMENT_MASK) as usize
}

#[inline]
pub const fn element_end(raw: u64) -> usize {
    ((raw >> ELEMENT_END_SHIFT) & ELEMENT_MASK) as usize
}

#[inline]
pub const fn element_has_content(raw: u64) -> bool {
    raw & CONTENT_BIT != 0
}

/// `[start, end)` range of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanRecord {
    pub start: usize,
    pub end: usize,
    pub kind: RecordKind,
}

impl SpanRecord {
    #[inline]
    pub const fn name(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind: RecordKind::Name,
        }
    }

    #[inline]
    pub const fn content(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind: RecordKind::Content,
        }
    }
}

/// `[start, end)` range of child entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRecord {
    pub start: usize,
    pub end: usize,
    pub has_content: bool,
    pub kind: RecordKind,
}

impl ElementRecord {
    #[inline]
    pub const fn tag(start: usize, end: usize, has_content: bool) -> Self {
        Self {
            start,
            end,
            has_content,
            kind: RecordKind::Tag,
        }
    }

    /// Attribute records always carry their value as content
    #[inline]
    pub const fn attribute(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            has_content: true,
            kind: RecordKind::Attribute,
        }
    }

    /// Number of entries in the child range
    #[inline]
    pub const fn child_count(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// One decoded buffer record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Span(SpanRecord),
    Element(ElementRecord),
}

impl Entry {
    #[inline]
    pub const fn decode(raw: u64) -> Self {
        let kind = raw_kind(raw);
        if kind.is_span() {
            Entry::Span(SpanRecord {
                start: span_start(raw),
                end: span_end(raw),
                kind,
            })
        } else {
            Entry::Element(ElementRecord {
                start: element_start(raw),
                end: element_end(raw),
                has_content: element_has_content(raw),
                kind,
            })
        }
    }

    #[inline]
    pub const fn encode(self) -> u64 {
        match self {
            Entry::Span(s) => encode_span(s.start, s.end, s.kind),
            Entry::Element(e) => encode_element(e.start, e.end, e.kind, e.has_content),
        }
    }

    #[inline]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Entry::Span(s) => s.kind,
            Entry::Element(e) => e.kind,
        }
    }

    pub const fn as_span(&self) -> Option<SpanRecord> {
        match self {
            Entry::Span(s) => Some(*s),
            Entry::Element(_) => None,
        }
    }

    pub const fn as_element(&self) -> Option<ElementRecord> {
        match self {
            Entry::Element(e) => Some(*e),
            Entry::Span(_) => None,
        }
    }
}

impl From<SpanRecord> for Entry {
    fn from(record: SpanRecord) -> Self {
        Entry::Span(record)
    }
}

impl From<ElementRecord> for Entry {
    fn from(record: ElementRecord) -> Self {
        Entry::Element(record)
    }
}
