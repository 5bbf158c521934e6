//! Parallel Batch Parsing
//!
//! Uses Rayon to parse independent documents at the same time. Each parse is
//! still a single-threaded pass; only whole documents are spread out.

use rayon::prelude::*;

use crate::error::Result;
use crate::index::{Document, Element};
use crate::options::ParseOptions;

/// Parse every source, keeping input order in the output
pub fn parse_many<'a>(sources: &[&'a str]) -> Vec<Result<Document<'a>>> {
    parse_many_with(sources, &ParseOptions::default())
}

pub fn parse_many_with<'a>(
    sources: &[&'a str],
    options: &ParseOptions,
) -> Vec<Result<Document<'a>>> {
    sources
        .par_iter()
        .map(|&source| Document::parse_with(source, options))
        .collect()
}

/// Run `mapper` on the root of every document in parallel
pub fn map_roots<F, T>(docs: &[Document<'_>], mapper: F) -> Vec<Result<T>>
where
    F: Fn(Element<'_>) -> Result<T> + Sync + Send,
    T: Send,
{
    docs.par_iter().map(|doc| mapper(doc.root())).collect()
}
