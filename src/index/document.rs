//! Parsed Document
//!
//! Owns the entries buffer and borrows the source text. The root tag always
//! sits at entry 0.

use std::fmt;

use super::element::Element;
use super::entries::Entries;
use crate::core::reader::read_entries;
use crate::error::Result;
use crate::options::ParseOptions;

#[derive(Clone)]
pub struct Document<'a> {
    source: &'a str,
    entries: Entries,
}

impl<'a> Document<'a> {
    /// Parse with default options
    pub fn parse(source: &'a str) -> Result<Self> {
        Self::parse_with(source, &ParseOptions::default())
    }

    pub fn parse_with(source: &'a str, options: &ParseOptions) -> Result<Self> {
        let entries = read_entries(source, options)?;
        Ok(Self { source, entries })
    }

    /// View of the root tag
    pub fn root(&self) -> Element<'_> {
        Element::new(self.source, self.entries.as_slice(), 0)
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("source_len", &self.source.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::element::ElementKind;

    #[test]
    fn test_parse_simple() {
        let doc = Document::parse("<root><child>text</child></root>").unwrap();
        assert_eq!(doc.entry_count(), 5);
        let root = doc.root();
        assert_eq!(root.index(), 0);
        assert_eq!(root.kind(), ElementKind::Tag);
        assert_eq!(root.name().unwrap(), "root");
    }

    #[test]
    fn test_parse_with_options() {
        let options = ParseOptions::default().with_initial_capacity(1);
        let doc = Document::parse_with("<a><b/><c/></a>", &options).unwrap();
        assert_eq!(doc.entry_count(), 6);
        assert_eq!(doc.root().children().count(), 2);
    }

    #[test]
    fn test_debug_is_compact() {
        let doc = Document::parse("<a/>").unwrap();
        assert_eq!(format!("{:?}", doc), "Document { source_len: 4, entries: 2 }");
    }

    #[test]
    fn test_document_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document<'static>>();
    }
}
