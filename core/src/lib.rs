//! In-memory inverted index with pluggable ranking.
//!
//! Text flows through [`tokenizer::tokenize`], loses its [`stopwords`], and is
//! counted into an [`index::InvertedIndex`]. [`engine::IrSystem`] answers
//! free-text queries by scoring the candidate documents with a
//! [`scoring::ScoreFn`] chosen at construction time.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod present;
pub mod scoring;
pub mod shared;
pub mod stopwords;
pub mod tokenizer;

pub use config::IrConfig;
pub use engine::IrSystem;
pub use error::{IrError, Result};
pub use index::{DocId, Document, InvertedIndex};
pub use scoring::{Bm25, ScoreFn, Scoring, TermFrequency};
pub use shared::SharedIrSystem;
pub use stopwords::Stopwords;
