//! Index file reader with lazily populated, write-once caches.
//!
//! The inverted region always starts directly after the header, and the
//! forward region at `header.forward_offset`, so the two loads seek
//! explicitly and are independent of each other. Each cache is populated at
//! most once; concurrent callers either perform the population under the
//! write lock or observe the already-populated state, after which the caches
//! are only ever read.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use byteorder::{LittleEndian, ReadBytesExt};
use parking_lot::{Mutex, RwLock};

use crate::error::{Result, WikidexError};
use crate::index::format::{IndexHeader, HEADER_SIZE, MAGIC, VERSION_MAJOR};

/// A document's stored metadata, hydrated from the forward region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub doc_id: u32,
    pub title: String,
    pub url: String,
}

/// Reader for the single-file binary index.
///
/// Cheap to share behind an `Arc`; all accessors take `&self` and are safe
/// for concurrent use once a cache has been populated.
pub struct IndexReader {
    path: PathBuf,
    file: Mutex<BufReader<File>>,
    header: IndexHeader,
    documents: RwLock<Option<AHashMap<u32, StoredDocument>>>,
    inverted: RwLock<Option<AHashMap<String, Vec<u32>>>>,
}

impl IndexReader {
    /// Open an index file and validate its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .map_err(|e| WikidexError::index(format!("cannot open {}: {e}", path.display())))?;
        let mut file = BufReader::new(file);

        let header = IndexHeader::read(&mut file)?;

        if header.magic != MAGIC {
            return Err(WikidexError::index(format!(
                "bad magic in {}: expected {MAGIC:#x}, found {:#x}",
                path.display(),
                header.magic
            )));
        }

        if header.version_major != VERSION_MAJOR {
            return Err(WikidexError::index(format!(
                "unsupported index version {}.{}",
                header.version_major, header.version_minor
            )));
        }

        Ok(IndexReader {
            path,
            file: Mutex::new(file),
            header,
            documents: RwLock::new(None),
            inverted: RwLock::new(None),
        })
    }

    /// The validated file header.
    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of documents in the index.
    pub fn num_documents(&self) -> u32 {
        self.header.num_documents
    }

    /// Number of distinct terms in the index.
    pub fn num_terms(&self) -> u32 {
        self.header.num_terms
    }

    /// Populate the forward cache from disk if not yet loaded.
    fn ensure_documents(&self) -> Result<()> {
        if self.documents.read().is_some() {
            return Ok(());
        }

        let mut guard = self.documents.write();
        if guard.is_some() {
            return Ok(());
        }

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(self.header.forward_offset))?;

        let mut docs = AHashMap::with_capacity(self.header.num_documents as usize);

        for _ in 0..self.header.num_documents {
            let doc_id = file.read_u32::<LittleEndian>()?;

            let title_len = file.read_u16::<LittleEndian>()? as usize;
            let title = read_string(&mut *file, title_len)?;

            let url_len = file.read_u16::<LittleEndian>()? as usize;
            let url = read_string(&mut *file, url_len)?;

            docs.insert(doc_id, StoredDocument { doc_id, title, url });
        }

        *guard = Some(docs);
        Ok(())
    }

    /// Populate the inverted cache from disk if not yet loaded.
    fn ensure_inverted(&self) -> Result<()> {
        if self.inverted.read().is_some() {
            return Ok(());
        }

        let mut guard = self.inverted.write();
        if guard.is_some() {
            return Ok(());
        }

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(HEADER_SIZE))?;

        let num_terms = file.read_u32::<LittleEndian>()?;
        let mut inverted = AHashMap::with_capacity(num_terms as usize);

        for _ in 0..num_terms {
            let term_len = file.read_u8()? as usize;
            let term = read_string(&mut *file, term_len)?;

            let df = file.read_u32::<LittleEndian>()?;
            let mut postings = Vec::with_capacity(df as usize);
            for _ in 0..df {
                postings.push(file.read_u32::<LittleEndian>()?);
            }

            inverted.insert(term, postings);
        }

        *guard = Some(inverted);
        Ok(())
    }

    /// Get the posting list for `term`, or an empty list if absent.
    pub fn get_posting_list(&self, term: &str) -> Result<Vec<u32>> {
        self.ensure_inverted()?;

        let guard = self.inverted.read();
        let inverted = guard.as_ref().expect("inverted cache populated above");
        Ok(inverted.get(term).cloned().unwrap_or_default())
    }

    /// Get a document's stored metadata by id.
    pub fn get_document(&self, doc_id: u32) -> Result<Option<StoredDocument>> {
        self.ensure_documents()?;

        let guard = self.documents.read();
        let docs = guard.as_ref().expect("document cache populated above");
        Ok(docs.get(&doc_id).cloned())
    }

    /// All document ids in the index, ascending.
    pub fn get_all_doc_ids(&self) -> Result<Vec<u32>> {
        self.ensure_documents()?;

        let guard = self.documents.read();
        let docs = guard.as_ref().expect("document cache populated above");

        let mut ids: Vec<u32> = docs.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// All terms in the index, in byte-lexicographic order.
    pub fn get_all_terms(&self) -> Result<Vec<String>> {
        self.ensure_inverted()?;

        let guard = self.inverted.read();
        let inverted = guard.as_ref().expect("inverted cache populated above");

        let mut terms: Vec<String> = inverted.keys().cloned().collect();
        terms.sort_unstable();
        Ok(terms)
    }
}

fn read_string<R: Read>(input: &mut R, len: usize) -> Result<String> {
    let mut buf = vec![0u8; len];
    input.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| WikidexError::index(format!("invalid UTF-8 in index: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::writer::{DocumentEntry, IndexWriter};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_sample_index(path: &Path) {
        let docs = vec![
            DocumentEntry {
                doc_id: 0,
                title: "Mozart".to_string(),
                url: "u0".to_string(),
            },
            DocumentEntry {
                doc_id: 1,
                title: "Бах".to_string(),
                url: "u1".to_string(),
            },
        ];

        let mut inverted = AHashMap::new();
        inverted.insert("composer".to_string(), vec![0, 1]);
        inverted.insert("mozart".to_string(), vec![0]);
        inverted.insert("бах".to_string(), vec![1]);

        let mut writer = IndexWriter::new(path).unwrap();
        writer.write_inverted_index(&inverted).unwrap();
        writer.write_forward_index(&docs).unwrap();
        writer.finalize().unwrap();
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");
        write_sample_index(&path);

        let reader = IndexReader::open(&path).unwrap();
        assert_eq!(reader.num_documents(), 2);
        assert_eq!(reader.num_terms(), 3);

        assert_eq!(reader.get_posting_list("composer").unwrap(), vec![0, 1]);
        assert_eq!(reader.get_posting_list("mozart").unwrap(), vec![0]);
        assert_eq!(reader.get_posting_list("бах").unwrap(), vec![1]);
        assert!(reader.get_posting_list("absent").unwrap().is_empty());

        let doc = reader.get_document(1).unwrap().unwrap();
        assert_eq!(doc.title, "Бах");
        assert_eq!(doc.url, "u1");
        assert!(reader.get_document(7).unwrap().is_none());

        assert_eq!(reader.get_all_doc_ids().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_terms_lexicographic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");
        write_sample_index(&path);

        let reader = IndexReader::open(&path).unwrap();
        let terms = reader.get_all_terms().unwrap();

        let mut sorted = terms.clone();
        sorted.sort_unstable();
        assert_eq!(terms, sorted);
        // ASCII sorts before Cyrillic in byte order
        assert_eq!(terms, vec!["composer", "mozart", "бах"]);
    }

    #[test]
    fn test_load_order_independent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");
        write_sample_index(&path);

        // Forward first, then inverted
        let reader = IndexReader::open(&path).unwrap();
        assert!(reader.get_document(0).unwrap().is_some());
        assert_eq!(reader.get_posting_list("mozart").unwrap(), vec![0]);

        // Inverted first, then forward
        let reader = IndexReader::open(&path).unwrap();
        assert_eq!(reader.get_posting_list("mozart").unwrap(), vec![0]);
        assert!(reader.get_document(0).unwrap().is_some());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("not_an_index.bin");
        let mut file = File::create(&path).unwrap();
        file.write_all(&[0u8; 64]).unwrap();

        assert!(IndexReader::open(&path).is_err());
    }

    #[test]
    fn test_missing_file_rejected() {
        assert!(IndexReader::open("/nonexistent/index.bin").is_err());
    }

    #[test]
    fn test_truncated_file_fails_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.bin");
        write_sample_index(&path);

        // Chop off the tail of the forward region
        let data = std::fs::read(&path).unwrap();
        std::fs::write(&path, &data[..data.len() - 4]).unwrap();

        let reader = IndexReader::open(&path).unwrap();
        assert!(reader.get_document(1).is_err());
    }
}
