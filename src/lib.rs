//! # Wikidex
//!
//! A boolean full-text search engine for wiki-style HTML corpora.
//!
//! ## Features
//!
//! - HTML text and title extraction
//! - Byte-level UTF-8 tokenization with Cyrillic case-folding
//! - Snowball-style Russian stemming
//! - Compact single-file binary index (forward + inverted regions)
//! - Boolean query language (`&&`, `||`, `!`, parentheses, implicit AND)
//! - Ordered-set query evaluation with pagination

pub mod analysis;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod source;
pub mod web;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
