//! Binary format invariants: round-trips, on-disk ordering, and rejection
//! of unfinalized or foreign files.

use ahash::AHashMap;
use tempfile::TempDir;

use wikidex::index::reader::IndexReader;
use wikidex::index::writer::{DocumentEntry, IndexWriter};

fn sample_docs(n: u32) -> Vec<DocumentEntry> {
    (0..n)
        .map(|doc_id| DocumentEntry {
            doc_id,
            title: format!("Document {doc_id}"),
            url: format!("https://example.org/{doc_id}"),
        })
        .collect()
}

#[test]
fn test_write_read_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.bin");

    let docs = sample_docs(5);
    let mut inverted: AHashMap<String, Vec<u32>> = AHashMap::new();
    inverted.insert("alpha".to_string(), vec![0, 2, 4]);
    inverted.insert("beta".to_string(), vec![1, 3]);
    inverted.insert("гамма".to_string(), vec![0, 1, 2, 3, 4]);

    let mut writer = IndexWriter::new(&path).unwrap();
    writer.write_inverted_index(&inverted).unwrap();
    writer.write_forward_index(&docs).unwrap();
    writer.finalize().unwrap();

    let reader = IndexReader::open(&path).unwrap();
    assert_eq!(reader.num_documents(), 5);
    assert_eq!(reader.num_terms(), 3);

    for (term, postings) in &inverted {
        assert_eq!(&reader.get_posting_list(term).unwrap(), postings);
    }

    for doc in &docs {
        let read_back = reader.get_document(doc.doc_id).unwrap().unwrap();
        assert_eq!(read_back.title, doc.title);
        assert_eq!(read_back.url, doc.url);
    }
}

#[test]
fn test_postings_written_sorted_and_deduped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.bin");

    let mut inverted: AHashMap<String, Vec<u32>> = AHashMap::new();
    inverted.insert("shuffled".to_string(), vec![4, 1, 3, 1, 0, 4]);

    let mut writer = IndexWriter::new(&path).unwrap();
    writer.write_inverted_index(&inverted).unwrap();
    writer.write_forward_index(&sample_docs(5)).unwrap();
    writer.finalize().unwrap();

    let reader = IndexReader::open(&path).unwrap();
    assert_eq!(reader.get_posting_list("shuffled").unwrap(), vec![0, 1, 3, 4]);
}

#[test]
fn test_terms_enumerate_in_byte_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.bin");

    let mut inverted: AHashMap<String, Vec<u32>> = AHashMap::new();
    for term in ["zebra", "apple", "ёж", "бобр", "mango"] {
        inverted.insert(term.to_string(), vec![0]);
    }

    let mut writer = IndexWriter::new(&path).unwrap();
    writer.write_inverted_index(&inverted).unwrap();
    writer.write_forward_index(&sample_docs(1)).unwrap();
    writer.finalize().unwrap();

    let reader = IndexReader::open(&path).unwrap();
    let terms = reader.get_all_terms().unwrap();
    // ASCII first, then Cyrillic by UTF-8 byte order ("ё" sorts after "я")
    assert_eq!(terms, vec!["apple", "mango", "zebra", "бобр", "ёж"]);
}

#[test]
fn test_unfinalized_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.bin");

    let mut writer = IndexWriter::new(&path).unwrap();
    writer.write_inverted_index(&AHashMap::new()).unwrap();
    writer.write_forward_index(&[]).unwrap();
    drop(writer); // finalize never called: header stays zeroed

    assert!(IndexReader::open(&path).is_err());
}

#[test]
fn test_empty_index_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.bin");

    let mut writer = IndexWriter::new(&path).unwrap();
    writer.write_inverted_index(&AHashMap::new()).unwrap();
    writer.write_forward_index(&[]).unwrap();
    writer.finalize().unwrap();

    let reader = IndexReader::open(&path).unwrap();
    assert_eq!(reader.num_documents(), 0);
    assert_eq!(reader.num_terms(), 0);
    assert!(reader.get_all_doc_ids().unwrap().is_empty());
    assert!(reader.get_posting_list("anything").unwrap().is_empty());
}

#[test]
fn test_long_title_truncated_to_u16() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.bin");

    let docs = vec![DocumentEntry {
        doc_id: 0,
        title: "я".repeat(40_000), // 80,000 bytes
        url: "u0".to_string(),
    }];

    let mut writer = IndexWriter::new(&path).unwrap();
    writer.write_inverted_index(&AHashMap::new()).unwrap();
    writer.write_forward_index(&docs).unwrap();
    writer.finalize().unwrap();

    let reader = IndexReader::open(&path).unwrap();
    let doc = reader.get_document(0).unwrap().unwrap();
    assert!(doc.title.len() <= u16::MAX as usize);
    // Truncation lands on a character boundary: 65,534 bytes of "я"
    assert_eq!(doc.title.len(), 65_534);
    assert!(doc.title.chars().all(|c| c == 'я'));
}
