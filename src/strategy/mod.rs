//! Parsing Strategy Module
//!
//! - Single document: [`crate::parse`] / [`crate::Document::parse`]
//! - Batch: parse many independent documents on the Rayon pool

pub mod parallel;

pub use parallel::{map_roots, parse_many, parse_many_with};
