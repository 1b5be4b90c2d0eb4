//! Boolean query evaluation and the public search façade.

use std::path::Path;
use std::time::Instant;

use parking_lot::RwLock;
use serde::Serialize;

use crate::analysis::stemmer::{RussianStemmer, Stemmer};
use crate::analysis::tokenizer::{Tokenizer, TokenizerConfig};
use crate::error::Result;
use crate::index::reader::IndexReader;
use crate::query::ast::QueryNode;
use crate::query::parser::QueryParser;
use crate::search::set_ops;

/// Default number of results per page.
pub const DEFAULT_LIMIT: usize = 50;

/// One search hit, hydrated from the forward index.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchResult {
    pub doc_id: u32,
    pub title: String,
    pub url: String,
}

/// The response to a search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// The query string as submitted.
    pub query: String,
    /// The requested page of results, in ascending document-id order.
    pub results: Vec<SearchResult>,
    /// Total number of matching documents, independent of pagination.
    pub total_count: usize,
    /// Wall-clock time from parse to hydration, in milliseconds.
    pub query_time_ms: f64,
}

/// Evaluates boolean queries against an open index.
///
/// Query terms go through the same case-folding and stemming as indexed
/// text. Safe to share behind an `Arc` and call concurrently; the document
/// universe needed by `NOT` is materialized once on first use.
pub struct Searcher {
    reader: IndexReader,
    tokenizer: Tokenizer,
    stemmer: RussianStemmer,
    parser: QueryParser,
    all_doc_ids: RwLock<Option<Vec<u32>>>,
}

impl Searcher {
    /// Open the index at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = IndexReader::open(path)?;

        Ok(Searcher {
            reader,
            tokenizer: Tokenizer::new(TokenizerConfig {
                min_length: 2,
                lowercase: true,
                remove_stopwords: false,
            }),
            stemmer: RussianStemmer::new(),
            parser: QueryParser::new(),
            all_doc_ids: RwLock::new(None),
        })
    }

    /// Number of documents in the index.
    pub fn num_documents(&self) -> u32 {
        self.reader.num_documents()
    }

    /// Number of distinct terms in the index.
    pub fn num_terms(&self) -> u32 {
        self.reader.num_terms()
    }

    /// The sorted universe of document ids, materialized once.
    fn all_doc_ids(&self) -> Result<Vec<u32>> {
        if let Some(ids) = self.all_doc_ids.read().as_ref() {
            return Ok(ids.clone());
        }

        let mut guard = self.all_doc_ids.write();
        if let Some(ids) = guard.as_ref() {
            return Ok(ids.clone());
        }

        let ids = self.reader.get_all_doc_ids()?;
        *guard = Some(ids.clone());
        Ok(ids)
    }

    /// Evaluate an AST node to a sorted set of matching document ids.
    fn evaluate(&self, node: &QueryNode) -> Result<Vec<u32>> {
        match node {
            QueryNode::Term(term) => {
                let normalized = self.tokenizer.normalize(term);
                if normalized.is_empty() {
                    return Ok(Vec::new());
                }

                let stemmed = self.stemmer.stem(&normalized);
                self.reader.get_posting_list(&stemmed)
            }

            QueryNode::Not(operand) => {
                let matched = self.evaluate(operand)?;
                let universe = self.all_doc_ids()?;
                Ok(set_ops::difference(&universe, &matched))
            }

            QueryNode::And(operands) => {
                let mut iter = operands.iter();
                let mut result = match iter.next() {
                    Some(first) => self.evaluate(first)?,
                    None => return Ok(Vec::new()),
                };

                for operand in iter {
                    if result.is_empty() {
                        break;
                    }
                    let right = self.evaluate(operand)?;
                    result = set_ops::intersect(&result, &right);
                }

                Ok(result)
            }

            QueryNode::Or(operands) => {
                let mut result = Vec::new();
                for operand in operands {
                    let right = self.evaluate(operand)?;
                    result = set_ops::union(&result, &right);
                }
                Ok(result)
            }
        }
    }

    /// Execute `query` and return the page `[offset, offset + limit)`.
    pub fn search(&self, query: &str, limit: usize, offset: usize) -> Result<SearchResponse> {
        let start = Instant::now();

        let ast = match self.parser.parse(query) {
            Some(ast) => ast,
            None => {
                return Ok(SearchResponse {
                    query: query.to_string(),
                    results: Vec::new(),
                    total_count: 0,
                    query_time_ms: start.elapsed().as_secs_f64() * 1000.0,
                });
            }
        };

        let doc_ids = self.evaluate(&ast)?;
        let total_count = doc_ids.len();

        let start_idx = offset.min(total_count);
        let end_idx = offset.saturating_add(limit).min(total_count);

        let mut results = Vec::with_capacity(end_idx - start_idx);
        for &doc_id in &doc_ids[start_idx..end_idx] {
            if let Some(doc) = self.reader.get_document(doc_id)? {
                results.push(SearchResult {
                    doc_id,
                    title: doc.title,
                    url: doc.url,
                });
            }
        }

        Ok(SearchResponse {
            query: query.to_string(),
            results,
            total_count,
            query_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Execute `query` with the default page size and no offset.
    pub fn search_default(&self, query: &str) -> Result<SearchResponse> {
        self.search(query, DEFAULT_LIMIT, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::builder::Indexer;
    use crate::source::MemorySource;
    use tempfile::TempDir;

    fn build_searcher(docs: Vec<(&str, &str)>) -> (TempDir, Searcher) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");

        let mut source = MemorySource::new(
            docs.into_iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        );
        Indexer::new().build(&mut source, &path, 0).unwrap();

        let searcher = Searcher::open(&path).unwrap();
        (dir, searcher)
    }

    fn corpus() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                "u0",
                "<title>Mozart</title><p>Wolfgang Amadeus Mozart was a composer.</p>",
            ),
            (
                "u1",
                "<title>Bach</title><p>Johann Sebastian Bach was a composer.</p>",
            ),
            ("u2", "<title>Newton</title><p>Isaac Newton was a physicist.</p>"),
        ]
    }

    #[test]
    fn test_term_search() {
        let (_dir, searcher) = build_searcher(corpus());

        let response = searcher.search("mozart", 10, 0).unwrap();
        assert_eq!(response.total_count, 1);
        assert_eq!(response.results[0].title, "Mozart");
        assert_eq!(response.results[0].url, "u0");
    }

    #[test]
    fn test_and_search() {
        let (_dir, searcher) = build_searcher(corpus());

        let response = searcher.search("composer && mozart", 10, 0).unwrap();
        assert_eq!(response.total_count, 1);
        assert_eq!(response.results[0].url, "u0");
    }

    #[test]
    fn test_or_search_ordered_by_doc_id() {
        let (_dir, searcher) = build_searcher(corpus());

        let response = searcher.search("mozart || bach", 10, 0).unwrap();
        assert_eq!(response.total_count, 2);
        assert_eq!(response.results[0].title, "Mozart");
        assert_eq!(response.results[1].title, "Bach");
    }

    #[test]
    fn test_not_search() {
        let (_dir, searcher) = build_searcher(corpus());

        let response = searcher.search("composer && !mozart", 10, 0).unwrap();
        assert_eq!(response.total_count, 1);
        assert_eq!(response.results[0].title, "Bach");
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let (_dir, searcher) = build_searcher(corpus());

        let response = searcher.search("", 10, 0).unwrap();
        assert_eq!(response.total_count, 0);
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_unknown_term_matches_nothing() {
        let (_dir, searcher) = build_searcher(corpus());

        let response = searcher.search("beethoven", 10, 0).unwrap();
        assert_eq!(response.total_count, 0);
    }

    #[test]
    fn test_offset_past_end() {
        let (_dir, searcher) = build_searcher(corpus());

        let response = searcher.search("composer", 10, 100).unwrap();
        assert_eq!(response.total_count, 2);
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_pagination() {
        let (_dir, searcher) = build_searcher(corpus());

        let page1 = searcher.search("was", 1, 0).unwrap();
        let page2 = searcher.search("was", 1, 1).unwrap();
        let page3 = searcher.search("was", 1, 2).unwrap();

        assert_eq!(page1.total_count, 3);
        assert_eq!(page1.results[0].url, "u0");
        assert_eq!(page2.results[0].url, "u1");
        assert_eq!(page3.results[0].url, "u2");
    }

    #[test]
    fn test_de_morgan() {
        let (_dir, searcher) = build_searcher(corpus());

        let lhs = searcher.search("!(composer && mozart)", 10, 0).unwrap();
        let rhs = searcher.search("!composer || !mozart", 10, 0).unwrap();

        assert_eq!(lhs.results, rhs.results);
        assert_eq!(lhs.total_count, rhs.total_count);
    }

    #[test]
    fn test_query_terms_are_stemmed() {
        let (_dir, searcher) = build_searcher(vec![(
            "u0",
            "<title>Музыка</title>Музыкант играет музыку.",
        )]);

        assert_eq!(searcher.search("музыкант", 10, 0).unwrap().total_count, 1);
        assert_eq!(searcher.search("музыку", 10, 0).unwrap().total_count, 1);
        assert_eq!(searcher.search("МУЗЫКУ", 10, 0).unwrap().total_count, 1);
    }
}
