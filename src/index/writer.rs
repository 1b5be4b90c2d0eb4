//! Index file writer.
//!
//! The writer reserves space for the header, writes the inverted region
//! immediately after it, records the position where the forward region
//! begins, writes the forward region, and finally seeks back to offset 0 to
//! fill in the header. A file on which [`IndexWriter::finalize`] was never
//! called has an all-zero header and is rejected by the reader.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use ahash::AHashMap;
use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{Result, WikidexError};
use crate::index::format::{IndexHeader, HEADER_SIZE};

/// A forward-index entry: one document's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub doc_id: u32,
    pub title: String,
    pub url: String,
}

/// Writer for the single-file binary index.
pub struct IndexWriter {
    file: BufWriter<File>,
    header: IndexHeader,
}

/// Truncate `s` to at most `max` bytes on a character boundary.
fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

impl IndexWriter {
    /// Create a new index file at `path`, reserving space for the header.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        let mut file = BufWriter::new(file);

        file.write_all(&[0u8; HEADER_SIZE as usize])?;

        Ok(IndexWriter {
            file,
            header: IndexHeader::default(),
        })
    }

    /// Write the inverted region: terms in byte-lexicographic order, each
    /// followed by its document frequency and ascending posting list.
    ///
    /// Must be called before [`IndexWriter::write_forward_index`] so that the
    /// region lands directly after the header.
    pub fn write_inverted_index(&mut self, index: &AHashMap<String, Vec<u32>>) -> Result<()> {
        self.header.num_terms = index.len() as u32;

        let mut terms: Vec<&String> = index.keys().collect();
        terms.sort_unstable();

        self.file.write_u32::<LittleEndian>(terms.len() as u32)?;

        for term in terms {
            if term.is_empty() || term.len() > u8::MAX as usize {
                return Err(WikidexError::index(format!(
                    "term length {} out of range 1..=255",
                    term.len()
                )));
            }

            // Posting lists arrive sorted from the builder; sort and dedup
            // anyway so the on-disk invariant never depends on the caller.
            let mut postings = index[term.as_str()].clone();
            postings.sort_unstable();
            postings.dedup();

            self.file.write_u8(term.len() as u8)?;
            self.file.write_all(term.as_bytes())?;
            self.file.write_u32::<LittleEndian>(postings.len() as u32)?;

            for doc_id in postings {
                self.file.write_u32::<LittleEndian>(doc_id)?;
            }
        }

        Ok(())
    }

    /// Write the forward region and record its offset in the header.
    ///
    /// Titles and URLs longer than 65,535 bytes are truncated on a character
    /// boundary to fit the `u16` length prefix.
    pub fn write_forward_index(&mut self, docs: &[DocumentEntry]) -> Result<()> {
        self.header.forward_offset = self.file.stream_position()?;
        self.header.num_documents = docs.len() as u32;

        for doc in docs {
            self.file.write_u32::<LittleEndian>(doc.doc_id)?;

            let title = truncate_utf8(&doc.title, u16::MAX as usize);
            self.file.write_u16::<LittleEndian>(title.len() as u16)?;
            self.file.write_all(title.as_bytes())?;

            let url = truncate_utf8(&doc.url, u16::MAX as usize);
            self.file.write_u16::<LittleEndian>(url.len() as u16)?;
            self.file.write_all(url.as_bytes())?;
        }

        Ok(())
    }

    /// Seal the file: seek back to offset 0, write the header, and flush.
    pub fn finalize(mut self) -> Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.header.write(&mut self.file)?;
        self.file.flush()?;
        Ok(())
    }
}
