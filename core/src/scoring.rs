//! Relevance scoring for a single (term, document) pair.
//!
//! The query engine only sees [`ScoreFn`]; which implementation it gets is
//! decided once, when the [`crate::IrSystem`] is built.

use crate::config::{BM25_B, BM25_K1};
use crate::index::{DocId, InvertedIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait ScoreFn: Send + Sync {
    fn name(&self) -> &'static str;

    /// Score of `term` for `doc` given the current corpus statistics.
    fn score(&self, index: &InvertedIndex, term: &str, doc: DocId) -> f64;
}

/// Raw occurrence count.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFrequency;

impl ScoreFn for TermFrequency {
    fn name(&self) -> &'static str { "tf" }

    fn score(&self, index: &InvertedIndex, term: &str, doc: DocId) -> f64 {
        f64::from(index.term_freq(term, doc))
    }
}

/// Okapi BM25 with `k1 = BM25_K1` and `b = BM25_B`.
///
/// The IDF factor is `ln((N - df + 0.5) / (df + 0.5))` without the `+ 1`
/// smoothing, so a term found in more than half of the corpus scores below
/// zero. Such terms then push documents down the ranking rather than up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bm25;

impl Bm25 {
    pub fn idf(num_docs: usize, df: usize) -> f64 {
        let n = num_docs as f64;
        let df = df as f64;
        ((n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Saturated, length-normalized term frequency.
    pub fn tf_weight(tf: u32, doc_len: u32, avg_doc_len: f64) -> f64 {
        let tf = f64::from(tf);
        let norm = 1.0 - BM25_B + BM25_B * (f64::from(doc_len) / avg_doc_len);
        tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * norm)
    }
}

impl ScoreFn for Bm25 {
    fn name(&self) -> &'static str { "bm25" }

    fn score(&self, index: &InvertedIndex, term: &str, doc: DocId) -> f64 {
        let df = index.doc_freq(term);
        let tf = index.term_freq(term, doc);
        // tf > 0 implies the document exists and the average length is positive.
        if df == 0 || tf == 0 {
            return 0.0;
        }
        let doc_len = index.doc_len(doc).unwrap_or(0);
        Self::tf_weight(tf, doc_len, index.avg_doc_len()) * Self::idf(index.num_docs(), df)
    }
}

/// Selects a [`ScoreFn`] from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scoring {
    #[default]
    #[serde(alias = "tf")]
    TermFrequency,
    Bm25,
}

impl Scoring {
    pub fn scorer(self) -> Box<dyn ScoreFn> {
        match self {
            Scoring::TermFrequency => Box::new(TermFrequency),
            Scoring::Bm25 => Box::new(Bm25),
        }
    }
}

impl FromStr for Scoring {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tf" | "term_frequency" => Ok(Scoring::TermFrequency),
            "bm25" => Ok(Scoring::Bm25),
            other => Err(format!("unknown scoring '{other}', expected 'tf' or 'bm25'")),
        }
    }
}

impl fmt::Display for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scoring::TermFrequency => f.write_str("tf"),
            Scoring::Bm25 => f.write_str("bm25"),
        }
    }
}
