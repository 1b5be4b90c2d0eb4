//! Text analysis module for Wikidex.
//!
//! This module provides HTML text extraction, byte-level tokenization with
//! Cyrillic case-folding, and Russian stemming.

pub mod html;
pub mod stemmer;
pub mod tokenizer;

// Re-export commonly used types
pub use html::{extract_text, extract_title};
pub use stemmer::{RussianStemmer, Stemmer};
pub use tokenizer::{Tokenizer, TokenizerConfig};
