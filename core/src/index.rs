use crate::error::{IrError, Result};
use crate::stopwords::Stopwords;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense document id: the position of the document in insertion order.
pub type DocId = u32;

/// Per-term occurrence counts keyed by document. Zero counts are never stored.
pub type Postings = HashMap<DocId, u32>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    /// Where the text came from, e.g. a path relative to the corpus root.
    pub url: String,
    /// Number of tokens in the text, stopwords included.
    pub word_count: u32,
}

/// Document store plus term -> postings map.
///
/// Both halves are updated together in [`InvertedIndex::add_document`], so a
/// document id is visible exactly when its postings are. Documents are never
/// removed; ids are `0..num_docs()`.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Postings>,
    documents: Vec<Document>,
    total_len: u64,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Append a document and count its non-stopword tokens. Returns the new id.
    /// Fails without touching the index once every [`DocId`] is taken.
    pub fn add_document(&mut self, title: String, url: String, words: &[String], stopwords: &Stopwords) -> Result<DocId> {
        let doc_id = checked_u32(self.documents.len(), "document ids")?;
        let word_count = checked_u32(words.len(), "words per document")?;
        self.documents.push(Document { title, url, word_count });
        self.total_len += u64::from(word_count);

        for word in words {
            if stopwords.is_stopword(word) { continue; }
            *self.postings.entry(word.clone()).or_default().entry(doc_id).or_insert(0) += 1;
        }
        Ok(doc_id)
    }

    /// Fails if `additional` more documents would run out of ids.
    pub fn reserve_ids(&self, additional: usize) -> Result<()> {
        match self.documents.len().checked_add(additional) {
            Some(0) => Ok(()),
            Some(end) => checked_u32(end - 1, "document ids").map(|_| ()),
            None => Err(IrError::CapacityExceeded { what: "document ids" }),
        }
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> { self.postings.get(term) }

    pub fn contains_term(&self, term: &str) -> bool { self.postings.contains_key(term) }

    /// Occurrences of `term` in `doc`, 0 when either is unknown.
    pub fn term_freq(&self, term: &str, doc: DocId) -> u32 {
        self.postings
            .get(term)
            .and_then(|p| p.get(&doc))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents containing `term`.
    pub fn doc_freq(&self, term: &str) -> usize { self.postings.get(term).map_or(0, HashMap::len) }

    pub fn num_docs(&self) -> usize { self.documents.len() }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn terms(&self) -> impl Iterator<Item = &str> { self.postings.keys().map(String::as_str) }

    pub fn document(&self, doc: DocId) -> Option<&Document> { self.documents.get(doc as usize) }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn doc_len(&self, doc: DocId) -> Option<u32> { self.document(doc).map(|d| d.word_count) }

    /// Mean token count over every document indexed so far; 0.0 for an empty index.
    pub fn avg_doc_len(&self) -> f64 {
        if self.documents.is_empty() {
            return 0.0;
        }
        self.total_len as f64 / self.documents.len() as f64
    }
}

fn checked_u32(n: usize, what: &'static str) -> Result<u32> {
    u32::try_from(n).map_err(|_| IrError::CapacityExceeded { what })
}
