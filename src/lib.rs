//! High-throughput SIMD-accelerated JSON parser producing a compact tape
//! representation.
//!
//! ```
//! use jsontape::{Document, ParserOptions, TapeIterator};
//!
//! let mut doc = Document::new();
//! doc.parse(br#"{"name":"ferris","tags":["fast","safe"]}"#, &ParserOptions::default())
//!     .expect("valid JSON");
//!
//! let mut it = TapeIterator::new(&doc).unwrap();
//! it.move_to_key("name");
//! assert_eq!(it.get_string(), Some("ferris"));
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(feature = "snmalloc")]
#[global_allocator]
static GLOBAL: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

pub mod document;
pub mod error;
pub mod iterator;
pub mod number;
pub mod options;
pub mod pointer;
pub mod simd;
pub mod string;
pub mod structural;
pub mod tape;

pub use document::Document;
pub use error::{ErrorCode, ParseError, Result};
pub use iterator::{TapeIterator, ValueType};
pub use options::ParserOptions;
pub use simd::PADDING;

/// Parse `input` as a single JSON document, writing the result into `document`.
///
/// Equivalent to `document.parse(input, &ParserOptions::default())`; use
/// [`Document::parse`] directly to pass custom options.
pub fn parse(input: &[u8], document: &mut Document) -> Result<()> {
    document.parse(input, &ParserOptions::default())
}

/// Parse `input` as a single JSON document and return a freshly allocated
/// [`Document`] holding the result.
pub fn build(input: &[u8]) -> Result<Document> {
    let mut document = Document::new();
    document.parse(input, &ParserOptions::default())?;
    Ok(document)
}
