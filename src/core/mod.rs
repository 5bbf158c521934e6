//! Core parsing primitives
//!
//! - Scanner: byte cursor with memchr-accelerated delimiter search
//! - Reader: recursive-descent grammar writing packed entries

pub mod reader;
pub mod scanner;
