//! Recursive-descent reader
//!
//! Single forward pass over the source that writes packed records into an
//! [`Entries`] buffer. Layout produced per construct:
//!
//! ```text
//! tag        [tag][name][attribute...][tag... | content]
//! attribute  [attribute][name][content]
//! ```
//!
//! A tag's slot is reserved before its children are read and patched once
//! the closing `>` (or `/>`) is seen. Any grammar violation aborts the whole
//! parse; the partially filled buffer is dropped.

use super::scanner::Scanner;
use crate::error::{Error, Result};
use crate::index::entries::Entries;
use crate::index::entry::{ElementRecord, SpanRecord, MAX_SOURCE_LEN};
use crate::index::span::excerpt;
use crate::options::ParseOptions;

pub struct Reader<'a> {
    source: &'a str,
    scanner: Scanner<'a>,
    entries: Entries,
    preview_len: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        // Reserve no more than the input could plausibly fill; growth covers the rest.
        let capacity = options.initial_capacity.min(source.len().saturating_add(2));
        Self {
            source,
            scanner: Scanner::new(source.as_bytes()),
            entries: Entries::with_capacity(capacity),
            preview_len: options.preview_len,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Read the whole document. Index 0 of the result is the root tag.
    pub fn read(mut self) -> Result<Entries> {
        if self.source.len() > MAX_SOURCE_LEN {
            return Err(Error::structure(
                format!("document exceeds {} bytes", MAX_SOURCE_LEN),
                MAX_SOURCE_LEN,
                "",
            ));
        }

        loop {
            self.scanner.skip_whitespace();
            let pos = self.scanner.position();
            match (self.scanner.peek(), self.scanner.peek_at(1)) {
                (None, _) => break,
                (Some(b'<'), Some(b'!')) => self.skip_comment()?,
                (Some(b'<'), Some(b'?')) => self.skip_instruction()?,
                (Some(b'<'), _) => {
                    if !self.entries.is_empty() {
                        return Err(self.fail("xml must contain one root tag", pos));
                    }
                    self.read_tag()?;
                }
                _ => return Err(self.fail("expected '<'", pos)),
            }
        }

        if self.entries.is_empty() {
            return Err(self.fail("no root tag", self.source.len()));
        }

        self.entries.shrink_to_fit();
        log::debug!(
            target: "litexml::reader",
            "read {} bytes into {} entries",
            self.source.len(),
            self.entries.len()
        );
        Ok(self.entries)
    }

    fn fail(&self, message: impl Into<String>, position: usize) -> Error {
        Error::structure(
            message,
            position,
            excerpt(self.source, position, self.preview_len),
        )
    }

    fn unexpected_end(&self) -> Error {
        self.fail("unexpected end of input", self.source.len())
    }

    fn too_many_entries(&self) -> Error {
        self.fail("document exceeds entry limit", self.scanner.position())
    }

    fn reserve(&mut self) -> Result<usize> {
        match self.entries.reserve_slot() {
            Some(index) => Ok(index),
            None => Err(self.too_many_entries()),
        }
    }

    fn push_span(&mut self, record: SpanRecord) -> Result<usize> {
        match self.entries.push_span(record) {
            Some(index) => Ok(index),
            None => Err(self.too_many_entries()),
        }
    }

    fn patch(&mut self, index: usize, record: ElementRecord) -> Result<()> {
        if self.entries.set_element(index, record) {
            Ok(())
        } else {
            Err(Error::consistency("patched slot was never reserved", index))
        }
    }

    /// Skip `<!-- ... -->`. The end marker is the first `-->` after the
    /// opening, comments do not nest.
    fn skip_comment(&mut self) -> Result<()> {
        let start = self.scanner.position();
        if !self.scanner.starts_with(b"<!--") {
            return Err(self.fail("unexpected token", start));
        }
        self.scanner.advance(4);
        match self.scanner.find_seq(b"-->") {
            Some(end) => {
                self.scanner.set_position(end + 3);
                Ok(())
            }
            None => Err(self.fail("'-->' not found", start)),
        }
    }

    /// Skip `<? ... ?>`
    fn skip_instruction(&mut self) -> Result<()> {
        let start = self.scanner.position();
        self.scanner.advance(2);
        match self.scanner.find_seq(b"?>") {
            Some(end) => {
                self.scanner.set_position(end + 2);
                Ok(())
            }
            None => Err(self.fail("'?>' not found", start)),
        }
    }

    /// Read a tag starting at its `<`, leaving the cursor past its end.
    fn read_tag(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            let pos = self.scanner.position();
            return Err(self.fail("nesting too deep", pos));
        }
        self.depth += 1;
        let result = self.read_tag_body();
        self.depth -= 1;
        result
    }

    fn read_tag_body(&mut self) -> Result<()> {
        let tag_index = self.reserve()?;
        self.scanner.advance(1);
        let name_start = self.scanner.read_name();
        let name_end = self.scanner.position();
        self.push_span(SpanRecord::name(name_start, name_end))?;

        let mark = self.entries.len();

        loop {
            self.scanner.skip_whitespace();
            let pos = self.scanner.position();
            match self.scanner.peek() {
                None => return Err(self.unexpected_end()),
                Some(b'/') => {
                    if self.scanner.peek_at(1) != Some(b'>') {
                        return Err(self.fail("expected '/>'", pos));
                    }
                    self.patch(tag_index, ElementRecord::tag(mark, self.entries.len(), false))?;
                    self.scanner.advance(2);
                    return Ok(());
                }
                Some(b'>') => {
                    self.scanner.advance(1);
                    let content_mark = self.entries.len();
                    self.read_content()?;
                    self.read_closing_tag(name_start, name_end)?;
                    let has_text = self.entries.len() - content_mark == 1;
                    self.patch(
                        tag_index,
                        ElementRecord::tag(mark, self.entries.len(), has_text),
                    )?;
                    log::trace!(
                        target: "litexml::reader",
                        "tag {} [{}, {})",
                        tag_index,
                        mark,
                        self.entries.len()
                    );
                    return Ok(());
                }
                Some(_) => self.read_attribute()?,
            }
        }
    }

    /// Read what sits between `>` and the closing tag: either one text node
    /// or a run of nested tags, with comments and processing instructions
    /// allowed between the tags.
    fn read_content(&mut self) -> Result<()> {
        let start = self.scanner.position();
        self.scanner.skip_whitespace();

        match self.scanner.peek() {
            None => return Err(self.unexpected_end()),
            Some(b'<') => {}
            Some(_) => {
                let end = match self.scanner.find_byte(b'<') {
                    Some(end) => end,
                    None => return Err(self.fail("tag close not found", start)),
                };
                self.push_span(SpanRecord::content(start, end))?;
                self.scanner.set_position(end);
                return Ok(());
            }
        }

        loop {
            match self.scanner.peek_at(1) {
                None => return Err(self.unexpected_end()),
                Some(b'/') => return Ok(()),
                Some(b'!') => self.skip_comment()?,
                Some(b'?') => self.skip_instruction()?,
                Some(_) => self.read_tag()?,
            }

            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                None => return Err(self.unexpected_end()),
                Some(b'<') => {}
                Some(_) => {
                    let pos = self.scanner.position();
                    return Err(self.fail("expected '<'", pos));
                }
            }
        }
    }

    /// Match `</name>` against the opening name byte for byte
    fn read_closing_tag(&mut self, name_start: usize, name_end: usize) -> Result<()> {
        let pos = self.scanner.position();
        if !self.scanner.starts_with(b"</") {
            return Err(self.fail("expected '</'", pos));
        }
        self.scanner.advance(2);
        self.scanner.skip_whitespace();

        let pos = self.scanner.position();
        if !self.scanner.matches_range(name_start, name_end) {
            let name = &self.source[name_start..name_end];
            return Err(self.fail(format!("expected '</{}>'", name), pos));
        }
        self.scanner.advance(name_end - name_start);
        self.scanner.skip_whitespace();

        let pos = self.scanner.position();
        match self.scanner.peek() {
            Some(b'>') => {
                self.scanner.advance(1);
                Ok(())
            }
            None => Err(self.unexpected_end()),
            Some(_) => Err(self.fail("expected '>'", pos)),
        }
    }

    /// Read `name = "value"`. The value is raw text up to the next `"`.
    fn read_attribute(&mut self) -> Result<()> {
        let start = self.scanner.position();
        let attr_index = self.reserve()?;

        let eq = match self.scanner.find_byte2(b'=', b'>') {
            Some(i) if self.scanner.byte_at(i) == Some(b'=') => i,
            Some(i) => return Err(self.fail("expected '='", i)),
            None => return Err(self.fail("expected '='", start)),
        };

        let mut name_end = eq;
        while name_end > start && self.scanner.byte_at(name_end - 1).is_some_and(|b| b <= b' ') {
            name_end -= 1;
        }
        self.push_span(SpanRecord::name(start, name_end))?;

        self.scanner.set_position(eq + 1);
        self.scanner.skip_whitespace();
        let pos = self.scanner.position();
        match self.scanner.peek() {
            Some(b'"') => self.scanner.advance(1),
            None => return Err(self.unexpected_end()),
            Some(_) => return Err(self.fail("expected '\"'", pos)),
        }

        let value_start = self.scanner.position();
        let value_end = match self.scanner.find_byte(b'"') {
            Some(end) => end,
            None => return Err(self.fail("attribute value not terminated", value_start)),
        };
        let value_index = self.push_span(SpanRecord::content(value_start, value_end))?;
        self.patch(
            attr_index,
            ElementRecord::attribute(value_index, value_index + 1),
        )?;
        self.scanner.set_position(value_end + 1);
        Ok(())
    }
}

/// Parse `source` into a packed entries buffer
pub fn read_entries(source: &str, options: &ParseOptions) -> Result<Entries> {
    Reader::new(source, options).read()
}
