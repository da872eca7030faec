use thiserror::Error;

/// Errors raised by indexing and strict scoring.
///
/// An empty query after stopword filtering is not an error; it simply
/// produces no hits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    /// The text has no line break, so there is no title line.
    #[error("malformed document {url}: missing title delimiter")]
    MalformedDocument { url: String },

    /// Strict scoring was asked about a term that no document contains.
    #[error("unknown term: {term}")]
    UnknownTerm { term: String },

    /// A count no longer fits in 32 bits.
    #[error("index capacity exceeded: too many {what}")]
    CapacityExceeded { what: &'static str },
}

pub type Result<T> = std::result::Result<T, IrError>;
