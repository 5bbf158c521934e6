//! litexml - allocation-light XML parsing into a packed, zero-copy tree
//!
//! A document is scanned once into a flat buffer of 64-bit records that
//! point back into the source text. Elements are views decoded on demand:
//!
//! ```
//! let doc = litexml::parse(r#"<a x="1"><b>hi</b></a>"#)?;
//! let root = doc.root();
//! assert_eq!(root.name()?, "a");
//! assert_eq!(root.attribute("x")?.unwrap(), "1");
//! let b = root.child("b")?.unwrap();
//! assert_eq!(b.content()?.unwrap(), "hi");
//! # Ok::<(), litexml::Error>(())
//! ```
//!
//! Deliberately small grammar: no DTD, namespaces, CDATA or entity decoding.
//! Attribute values and text come back exactly as written.
//!
//! Limits: sources up to [`MAX_SOURCE_LEN`] bytes and buffers up to
//! [`MAX_ENTRIES`] records, set by the packed record widths.

pub mod core;
pub mod error;
pub mod index;
pub mod options;
pub mod strategy;

pub use error::{Error, Result};
pub use index::{
    Children, Document, Element, ElementKind, Entries, Entry, TextSource, TextView, MAX_ENTRIES,
    MAX_SOURCE_LEN,
};
pub use options::ParseOptions;
pub use strategy::{map_roots, parse_many, parse_many_with};

/// Parse `source` with default options
pub fn parse(source: &str) -> Result<Document<'_>> {
    Document::parse(source)
}

/// Parse `source` with explicit options
pub fn parse_with<'a>(source: &'a str, options: &ParseOptions) -> Result<Document<'a>> {
    Document::parse_with(source, options)
}
