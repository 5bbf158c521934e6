//! Packed Index Module
//!
//! A parsed document is one flat buffer of 64-bit records plus the original
//! text. No per-node allocation happens:
//!
//! - **Zero-copy strings**: names, attribute values and text content are
//!   `[start, end)` ranges into the original input.
//! - **Flat structure**: each tag records the range of buffer slots holding
//!   its attributes and children, so navigation is index arithmetic.
//! - **Lazy views**: [`Element`] decodes records only when asked.
//!
//! ## Layout
//!
//! ```text
//! <a x="1"><b/></a>
//!
//! 0 tag   [2, 7)      a
//! 1 name  "a"
//! 2 attr  [4, 5)      x="1"
//! 3 name  "x"
//! 4 text  "1"
//! 5 tag   [7, 7)      b
//! 6 name  "b"
//! ```

pub mod document;
pub mod element;
pub mod entries;
pub mod entry;
pub mod span;

pub use document::Document;
pub use element::{Children, Element, ElementKind};
pub use entries::Entries;
pub use entry::{Entry, MAX_ENTRIES, MAX_SOURCE_LEN};
pub use span::{TextSource, TextView};
