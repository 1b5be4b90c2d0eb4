//! Document sources for the index builder.
//!
//! A source is a pull interface yielding `(url, html_content)` rows in a
//! stable order; the builder assigns document ids by that order. Rows with
//! missing fields default to empty strings and are handled (skipped) by the
//! builder, not the source.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::vec;

use log::info;
use serde::Deserialize;

use crate::error::{Result, WikidexError};

/// One row from a document store.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SourceDocument {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub html_content: String,
}

/// Pull interface over a document store.
pub trait DocumentSource {
    /// Fetch the next row, or `None` when the source is exhausted.
    ///
    /// A malformed row yields `Err`; callers may skip it and keep pulling.
    fn next_document(&mut self) -> Result<Option<SourceDocument>>;
}

/// In-memory source over a vector of `(url, html_content)` pairs.
#[derive(Debug, Clone)]
pub struct MemorySource {
    docs: vec::IntoIter<(String, String)>,
}

impl MemorySource {
    /// Create a source over the given documents.
    pub fn new(docs: Vec<(String, String)>) -> Self {
        MemorySource {
            docs: docs.into_iter(),
        }
    }
}

impl DocumentSource for MemorySource {
    fn next_document(&mut self) -> Result<Option<SourceDocument>> {
        Ok(self.docs.next().map(|(url, html_content)| SourceDocument {
            url,
            html_content,
        }))
    }
}

/// Source reading a local JSONL file, one document object per line.
///
/// Empty lines are skipped; a line that fails to parse is reported as a
/// row error and does not stop iteration.
pub struct JsonlSource {
    reader: BufReader<File>,
}

impl JsonlSource {
    /// Open a JSONL corpus file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            WikidexError::source(format!("cannot open {}: {e}", path.as_ref().display()))
        })?;

        Ok(JsonlSource {
            reader: BufReader::new(file),
        })
    }
}

impl DocumentSource for JsonlSource {
    fn next_document(&mut self) -> Result<Option<SourceDocument>> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| WikidexError::source(format!("read failed: {e}")))?;

            if read == 0 {
                return Ok(None);
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return serde_json::from_str::<SourceDocument>(trimmed)
                .map(Some)
                .map_err(|e| WikidexError::source(format!("malformed row: {e}")));
        }
    }
}

/// Connection settings for a remote document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            host: "localhost".to_string(),
            port: 27017,
            database: "search_engine_db".to_string(),
            collection: "documents".to_string(),
        }
    }
}

/// Source pulling a collection from a remote document store over HTTP.
///
/// Expects `GET http://{host}:{port}/{database}/{collection}` to stream the
/// collection as JSONL, with an optional `limit` query parameter. The whole
/// response is fetched up front; a connection failure is fatal at build
/// start, while individual malformed lines surface as row errors.
pub struct HttpSource {
    lines: vec::IntoIter<String>,
}

impl HttpSource {
    /// Connect to the store and fetch the collection.
    pub fn connect(config: &StoreConfig, limit: u64) -> Result<Self> {
        let mut url = format!(
            "http://{}:{}/{}/{}",
            config.host, config.port, config.database, config.collection
        );
        if limit > 0 {
            url.push_str(&format!("?limit={limit}"));
        }

        info!("fetching corpus from {url}");

        let body = reqwest::blocking::get(&url)
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| WikidexError::source(format!("cannot reach document store: {e}")))?;

        let lines: Vec<String> = body.lines().map(|l| l.to_string()).collect();
        info!("fetched {} rows", lines.len());

        Ok(HttpSource {
            lines: lines.into_iter(),
        })
    }
}

impl DocumentSource for HttpSource {
    fn next_document(&mut self) -> Result<Option<SourceDocument>> {
        for line in self.lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return serde_json::from_str::<SourceDocument>(trimmed)
                .map(Some)
                .map_err(|e| WikidexError::source(format!("malformed row: {e}")));
        }

        Ok(None)
    }
}
