//! Index builder: drives extraction and tokenization over a document source
//! and emits the binary index file.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use ahash::AHashMap;
use log::{info, warn};

use crate::analysis::html;
use crate::analysis::stemmer::{RussianStemmer, Stemmer};
use crate::analysis::tokenizer::{Tokenizer, TokenizerConfig};
use crate::error::Result;
use crate::index::writer::{DocumentEntry, IndexWriter};
use crate::source::DocumentSource;

/// Statistics accumulated during an index build.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub total_documents: u64,
    pub unique_terms: u64,
    pub total_tokens: u64,
    pub total_postings: u64,
    pub total_text_bytes: u64,
    pub skipped_rows: u64,
    pub indexing_time_sec: f64,
    pub avg_term_length: f64,
}

impl IndexStats {
    /// Documents indexed per second.
    pub fn docs_per_second(&self) -> f64 {
        if self.indexing_time_sec <= 0.0 {
            return 0.0;
        }
        self.total_documents as f64 / self.indexing_time_sec
    }

    /// Kilobytes of extracted text processed per second.
    pub fn kb_per_second(&self) -> f64 {
        if self.indexing_time_sec <= 0.0 {
            return 0.0;
        }
        (self.total_text_bytes as f64 / 1024.0) / self.indexing_time_sec
    }
}

/// Builds an inverted index from a document source.
///
/// Tokenization keeps stop words (queries may legitimately search for them)
/// and every token is stemmed before being folded into the per-document term
/// set.
pub struct Indexer {
    tokenizer: Tokenizer,
    stemmer: RussianStemmer,
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexer {
    /// Create an indexer with the standard build-time analysis chain.
    pub fn new() -> Self {
        Indexer {
            tokenizer: Tokenizer::new(TokenizerConfig {
                min_length: 2,
                lowercase: true,
                remove_stopwords: false,
            }),
            stemmer: RussianStemmer::new(),
        }
    }

    /// Ingest documents from `source` and write the index to `output`.
    ///
    /// If `limit` is non-zero, at most `limit` documents are indexed. Rows
    /// with empty HTML and malformed rows are skipped; they consume a source
    /// row but not the limit.
    pub fn build<P: AsRef<Path>>(
        &self,
        source: &mut dyn DocumentSource,
        output: P,
        limit: u64,
    ) -> Result<IndexStats> {
        let start = Instant::now();
        let mut stats = IndexStats::default();

        let mut documents: Vec<DocumentEntry> = Vec::new();
        let mut inverted: AHashMap<String, Vec<u32>> = AHashMap::new();

        let mut doc_id: u32 = 0;

        loop {
            if limit > 0 && u64::from(doc_id) >= limit {
                break;
            }

            let row = match source.next_document() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(e) => {
                    warn!("skipping malformed source row: {e}");
                    stats.skipped_rows += 1;
                    continue;
                }
            };

            if row.html_content.is_empty() {
                stats.skipped_rows += 1;
                continue;
            }

            let title = html::extract_title(&row.html_content);
            let text = html::extract_text(&row.html_content);

            let tokens = self.tokenizer.tokenize(&text);

            stats.total_tokens += tokens.len() as u64;
            stats.total_text_bytes += text.len() as u64;

            let unique_terms: BTreeSet<String> = tokens
                .into_iter()
                .map(|token| self.stemmer.stem(&token))
                .filter(|stem| !stem.is_empty() && stem.len() <= u8::MAX as usize)
                .collect();

            for term in unique_terms {
                inverted.entry(term).or_default().push(doc_id);
            }

            documents.push(DocumentEntry {
                doc_id,
                title,
                url: row.url,
            });

            doc_id += 1;

            if doc_id % 500 == 0 {
                let elapsed = start.elapsed().as_secs_f64();
                info!(
                    "[{doc_id}] {:.0} docs/sec, terms: {}",
                    f64::from(doc_id) / elapsed,
                    inverted.len()
                );
            }
        }

        stats.total_documents = documents.len() as u64;
        stats.unique_terms = inverted.len() as u64;
        stats.total_postings = inverted.values().map(|p| p.len() as u64).sum();
        stats.avg_term_length = if inverted.is_empty() {
            0.0
        } else {
            inverted.keys().map(|t| t.len() as f64).sum::<f64>() / inverted.len() as f64
        };

        info!(
            "indexing complete: {} documents, {} terms",
            stats.total_documents, stats.unique_terms
        );

        let mut writer = IndexWriter::new(output)?;
        writer.write_inverted_index(&inverted)?;
        writer.write_forward_index(&documents)?;
        writer.finalize()?;

        stats.indexing_time_sec = start.elapsed().as_secs_f64();

        Ok(stats)
    }
}
