//! Element View
//!
//! Read-only cursor over `(text, entries, index)`. Nothing is decoded until
//! asked for, and each accessor decodes at most once per view.

use std::fmt;
use std::iter::FusedIterator;

use once_cell::sync::OnceCell;

use super::entry::{ElementRecord, Entry, RecordKind};
use super::span::TextView;
use crate::error::{Error, Result};

/// What an element view points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The slot holds neither a tag nor an attribute record
    Unknown,
    Attribute,
    Tag,
}

/// A tag or attribute in a parsed document.
///
/// Cheap to create: the three caches start empty and fill on first access.
/// Views never write to the buffer, so they can be shared across threads.
#[derive(Clone)]
pub struct Element<'a> {
    source: &'a str,
    entries: &'a [u64],
    index: usize,
    kind: OnceCell<ElementKind>,
    name: OnceCell<TextView<'a>>,
    content: OnceCell<Option<TextView<'a>>>,
}

impl<'a> Element<'a> {
    pub fn new(source: &'a str, entries: &'a [u64], index: usize) -> Self {
        Self {
            source,
            entries,
            index,
            kind: OnceCell::new(),
            name: OnceCell::new(),
            content: OnceCell::new(),
        }
    }

    /// Slot of this element's record in the entries buffer
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn kind(&self) -> ElementKind {
        *self.kind.get_or_init(|| match self.entries.get(self.index) {
            Some(&raw) => match Entry::decode(raw).kind() {
                RecordKind::Tag => ElementKind::Tag,
                RecordKind::Attribute => ElementKind::Attribute,
                _ => ElementKind::Unknown,
            },
            None => ElementKind::Unknown,
        })
    }

    #[inline]
    pub fn is_tag(&self) -> bool {
        self.kind() == ElementKind::Tag
    }

    #[inline]
    pub fn is_attribute(&self) -> bool {
        self.kind() == ElementKind::Attribute
    }

    fn record(&self) -> Result<ElementRecord> {
        match self.entries.get(self.index).map(|&raw| Entry::decode(raw)) {
            Some(Entry::Element(record)) => Ok(record),
            Some(other) => Err(Error::consistency(
                format!("expected element record, got {:?}", other.kind()),
                self.index,
            )),
            None => Err(Error::consistency("element index past end of buffer", self.index)),
        }
    }

    /// Decode the span record at `index`, which must be of `kind`
    fn span_at(&self, index: usize, kind: RecordKind) -> Result<TextView<'a>> {
        let span = match self.entries.get(index).map(|&raw| Entry::decode(raw)) {
            Some(Entry::Span(span)) if span.kind == kind => span,
            Some(other) => {
                return Err(Error::consistency(
                    format!("expected {:?}, got {:?}", kind, other.kind()),
                    index,
                ))
            }
            None => return Err(Error::consistency("span index past end of buffer", index)),
        };
        TextView::range(self.source, span.start, span.end)
            .map_err(|_| Error::consistency("span outside source text", index))
    }

    /// The tag or attribute name. Always the record right after this one.
    pub fn name(&self) -> Result<TextView<'a>> {
        self.name
            .get_or_try_init(|| self.span_at(self.index + 1, RecordKind::Name))
            .copied()
    }

    /// Text content of a text-only tag, or an attribute's value.
    ///
    /// `None` for tags that are empty or hold nested tags.
    pub fn content(&self) -> Result<Option<TextView<'a>>> {
        self.content
            .get_or_try_init(|| {
                let record = self.record()?;
                if !record.has_content {
                    return Ok(None);
                }
                match record.end.checked_sub(1) {
                    Some(last) => self.span_at(last, RecordKind::Content).map(Some),
                    None => Err(Error::consistency("content flag on empty range", self.index)),
                }
            })
            .copied()
    }

    /// Attributes, then nested tags, in document order.
    ///
    /// Text content is not a child; read it through [`Element::content`].
    /// Attributes and empty or text-only tags yield nothing.
    pub fn children(&self) -> Children<'a> {
        let (next, end) = match self.entries.get(self.index).map(|&raw| Entry::decode(raw)) {
            Some(Entry::Element(record)) if record.kind == RecordKind::Tag => {
                let end = if record.has_content {
                    record.end.saturating_sub(1)
                } else {
                    record.end
                };
                (record.start, end)
            }
            _ => (0, 0),
        };
        Children {
            source: self.source,
            entries: self.entries,
            next,
            end,
        }
    }

    /// Attribute children only
    pub fn attributes(&self) -> impl Iterator<Item = Result<Element<'a>>> {
        self.children()
            .filter(|child| !matches!(child, Ok(e) if !e.is_attribute()))
    }

    /// Nested tag children only
    pub fn tags(&self) -> impl Iterator<Item = Result<Element<'a>>> {
        self.children()
            .filter(|child| !matches!(child, Ok(e) if !e.is_tag()))
    }

    /// Value of the first attribute called `name`
    pub fn attribute(&self, name: &str) -> Result<Option<TextView<'a>>> {
        for attr in self.attributes() {
            let attr = attr?;
            if attr.name()? == name {
                return attr.content();
            }
        }
        Ok(None)
    }

    /// First nested tag called `name`
    pub fn child(&self, name: &str) -> Result<Option<Element<'a>>> {
        for tag in self.tags() {
            let tag = tag?;
            if tag.name()? == name {
                return Ok(Some(tag));
            }
        }
        Ok(None)
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Element");
        s.field("index", &self.index).field("kind", &self.kind());
        if let Ok(name) = self.name() {
            s.field("name", &name.as_str());
        }
        s.finish()
    }
}

/// `name="value"` for attributes, `<name>` or `<name>text</>` for tags
impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, content) = match (self.name(), self.content()) {
            (Ok(name), Ok(content)) => (name, content),
            _ => return f.write_str("Invalid element"),
        };
        match self.kind() {
            ElementKind::Attribute => {
                write!(f, "{}=\"{}\"", name, content.unwrap_or_default())
            }
            ElementKind::Tag => match content {
                Some(text) if !text.is_empty() => write!(f, "<{}>{}</>", name, text),
                _ => write!(f, "<{}>", name),
            },
            ElementKind::Unknown => f.write_str("Invalid element"),
        }
    }
}

/// Lazy iterator over an element's child range.
///
/// Steps from one child to the next by jumping to the end of the child's own
/// range, so nested content is skipped without being decoded.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    source: &'a str,
    entries: &'a [u64],
    next: usize,
    end: usize,
}

impl<'a> Children<'a> {
    fn stop(&mut self, err: Error) -> Option<Result<Element<'a>>> {
        self.next = self.end;
        Some(Err(err))
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Result<Element<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        match self.entries.get(index).map(|&raw| Entry::decode(raw)) {
            Some(Entry::Element(record)) if record.end > index => {
                self.next = record.end;
                Some(Ok(Element::new(self.source, self.entries, index)))
            }
            Some(Entry::Element(_)) => {
                self.stop(Error::consistency("child range does not advance", index))
            }
            Some(Entry::Span(span)) => self.stop(Error::consistency(
                format!("expected tag or attribute, got {:?}", span.kind),
                index,
            )),
            None => self.stop(Error::consistency("child index past end of buffer", index)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end.saturating_sub(self.next)))
    }
}

impl FusedIterator for Children<'_> {}
