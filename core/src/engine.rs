//! Indexing and query entry points.

use crate::config::IrConfig;
use crate::error::{IrError, Result};
use crate::index::{DocId, Document, InvertedIndex};
use crate::scoring::{ScoreFn, Scoring, TermFrequency};
use crate::stopwords::Stopwords;
use crate::tokenizer::tokenize;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use tracing::{debug, info};

/// An inverted index plus the stopwords and scoring used to build and query it.
pub struct IrSystem {
    index: InvertedIndex,
    stopwords: Stopwords,
    scorer: Box<dyn ScoreFn>,
}

impl IrSystem {
    pub fn new(stopwords: Stopwords, scorer: Box<dyn ScoreFn>) -> Self {
        Self { index: InvertedIndex::new(), stopwords, scorer }
    }

    pub fn with_config(config: &IrConfig) -> Self {
        Self::new(Stopwords::new(&config.stopwords), config.scoring.scorer())
    }

    /// Man-page consultant: drops "how do i" along with the default stopwords.
    pub fn consultant(scoring: Scoring) -> Self { Self::with_config(&IrConfig::consultant(scoring)) }

    /// Index a document. The first line, trimmed, becomes its title; the whole
    /// text, title included, is tokenized. Nothing is recorded on error.
    pub fn index_document(&mut self, text: &str, url: &str) -> Result<DocId> {
        let (title, words) = analyze(text, url)?;
        self.commit(title, url, &words)
    }

    /// Index documents in order; ids follow iteration order. Stops at the first
    /// malformed document, keeping everything indexed before it.
    pub fn index_collection<I, T, U>(&mut self, docs: I) -> Result<()>
    where
        I: IntoIterator<Item = (T, U)>,
        T: AsRef<str>,
        U: AsRef<str>,
    {
        let before = self.index.num_docs();
        for (text, url) in docs {
            self.index_document(text.as_ref(), url.as_ref())?;
        }
        info!(
            added = self.index.num_docs() - before,
            num_docs = self.index.num_docs(),
            num_terms = self.index.num_terms(),
            "indexed collection"
        );
        Ok(())
    }

    /// Same result as [`IrSystem::index_collection`], but tokenizes on the rayon
    /// pool and then merges sequentially in input order. Every document is
    /// checked before the merge, so a malformed one leaves the index untouched
    /// and the error names the first malformed document in input order.
    pub fn index_collection_parallel<T, U>(&mut self, docs: &[(T, U)]) -> Result<()>
    where
        T: AsRef<str> + Sync,
        U: AsRef<str> + Sync,
    {
        self.index.reserve_ids(docs.len())?;
        let analyzed: Vec<Result<_>> = docs
            .par_iter()
            .map(|(text, url)| analyze(text.as_ref(), url.as_ref()))
            .collect();
        let analyzed = analyzed.into_iter().collect::<Result<Vec<_>>>()?;

        for ((title, words), (_, url)) in analyzed.into_iter().zip(docs) {
            self.commit(title, url.as_ref(), &words)?;
        }
        info!(
            added = docs.len(),
            num_docs = self.index.num_docs(),
            num_terms = self.index.num_terms(),
            "indexed collection in parallel"
        );
        Ok(())
    }

    fn commit(&mut self, title: String, url: &str, words: &[String]) -> Result<DocId> {
        let doc_id = self.index.add_document(title, url.to_string(), words, &self.stopwords)?;
        debug!(doc_id, url, words = words.len(), "indexed document");
        Ok(doc_id)
    }

    /// Tokenized query with stopwords removed. Repeated terms are kept and count twice.
    pub fn query_terms(&self, text: &str) -> Vec<String> {
        tokenize(text).into_iter().filter(|w| !self.stopwords.is_stopword(w)).collect()
    }

    /// Up to `n` `(score, doc_id)` pairs, best first. Equal scores rank the
    /// higher doc id first.
    pub fn query(&self, text: &str, n: usize) -> Vec<(f64, DocId)> {
        self.query_with_total(text, n).0
    }

    /// Like [`IrSystem::query`], also returning how many documents matched at least one term.
    pub fn query_with_total(&self, text: &str, n: usize) -> (Vec<(f64, DocId)>, usize) {
        let qterms = self.query_terms(text);
        if qterms.is_empty() {
            return (Vec::new(), 0);
        }
        let candidates: HashSet<DocId> = qterms
            .iter()
            .filter_map(|t| self.index.postings(t))
            .flat_map(|p| p.keys().copied())
            .collect();
        let total = candidates.len();
        let scored = candidates.into_iter().map(|doc| (self.total_score(&qterms, doc), doc));
        (top_n(scored, n), total)
    }

    pub fn score(&self, term: &str, doc: DocId) -> f64 { self.scorer.score(&self.index, term, doc) }

    /// Sum of per-term scores. Terms no document contains are skipped.
    pub fn total_score<S: AsRef<str>>(&self, terms: &[S], doc: DocId) -> f64 {
        terms
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| self.index.contains_term(t))
            .map(|t| self.score(t, doc))
            .sum()
    }

    /// Sum of per-term scores, failing on the first term no document contains.
    pub fn total_score_strict<S: AsRef<str>>(&self, terms: &[S], doc: DocId) -> Result<f64> {
        let mut total = 0.0;
        for term in terms.iter().map(|t| t.as_ref()) {
            if !self.index.contains_term(term) {
                return Err(IrError::UnknownTerm { term: term.to_string() });
            }
            total += self.score(term, doc);
        }
        Ok(total)
    }

    pub fn document(&self, doc: DocId) -> Option<&Document> { self.index.document(doc) }

    pub fn documents(&self) -> &[Document] { self.index.documents() }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn stopwords(&self) -> &Stopwords { &self.stopwords }

    pub fn scorer_name(&self) -> &'static str { self.scorer.name() }

    pub fn len(&self) -> usize { self.index.num_docs() }

    pub fn is_empty(&self) -> bool { self.index.num_docs() == 0 }
}

impl Default for IrSystem {
    fn default() -> Self { Self::new(Stopwords::default(), Box::new(TermFrequency)) }
}

impl fmt::Debug for IrSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IrSystem")
            .field("num_docs", &self.index.num_docs())
            .field("num_terms", &self.index.num_terms())
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

/// Title line and tokens of a document.
fn analyze(text: &str, url: &str) -> Result<(String, Vec<String>)> {
    let Some(end) = text.find('\n') else {
        return Err(IrError::MalformedDocument { url: url.to_string() });
    };
    Ok((text[..end].trim().to_string(), tokenize(text)))
}

/// The `n` largest pairs by `(score, doc_id)`, largest first.
fn top_n(scored: impl Iterator<Item = (f64, DocId)>, n: usize) -> Vec<(f64, DocId)> {
    if n == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, DocId)>> = BinaryHeap::new();
    for (score, doc) in scored {
        heap.push(Reverse((OrderedFloat(score), doc)));
        if heap.len() > n {
            heap.pop();
        }
    }
    heap.into_sorted_vec().into_iter().map(|Reverse((s, doc))| (s.0, doc)).collect()
}
