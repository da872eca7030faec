//! Tuning constants and construction-time configuration.

use crate::scoring::Scoring;
use serde::{Deserialize, Serialize};

/// BM25 term frequency saturation.
pub const BM25_K1: f64 = 1.5;

/// BM25 document length normalization. 0.0 disables it, 1.0 normalizes fully.
pub const BM25_B: f64 = 0.75;

/// Number of hits returned when the caller does not ask for a specific count.
pub const DEFAULT_TOP_N: usize = 10;

/// Upper bound on hits per request for callers exposed to untrusted input.
pub const MAX_TOP_N: usize = 100;

pub const DEFAULT_STOPWORDS: &str = "the a of";

/// Stopwords for the man-page consultant, which mostly sees "how do i ..." questions.
pub const CONSULTANT_STOPWORDS: &str = "how do i the a of";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrConfig {
    /// Whitespace-separated stopword list.
    #[serde(default = "default_stopwords")]
    pub stopwords: String,
    #[serde(default)]
    pub scoring: Scoring,
}

fn default_stopwords() -> String { DEFAULT_STOPWORDS.to_string() }

impl Default for IrConfig {
    fn default() -> Self {
        Self { stopwords: default_stopwords(), scoring: Scoring::default() }
    }
}

impl IrConfig {
    pub fn consultant(scoring: Scoring) -> Self {
        Self { stopwords: CONSULTANT_STOPWORDS.to_string(), scoring }
    }
}
