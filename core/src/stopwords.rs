use crate::config::{CONSULTANT_STOPWORDS, DEFAULT_STOPWORDS};
use crate::tokenizer::tokenize;
use std::collections::HashSet;

/// Terms left out of both the index and query term sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Build the set from a whitespace-separated list, normalized by the tokenizer.
    pub fn new(config: &str) -> Self {
        Self { words: tokenize(config).into_iter().collect() }
    }

    pub fn consultant() -> Self { Self::new(CONSULTANT_STOPWORDS) }

    pub fn none() -> Self { Self { words: HashSet::new() } }

    pub fn is_stopword(&self, term: &str) -> bool { self.words.contains(term) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.words.iter().map(String::as_str) }
}

impl Default for Stopwords {
    fn default() -> Self { Self::new(DEFAULT_STOPWORDS) }
}
