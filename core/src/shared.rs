//! Thread-safe handle for serving queries while documents keep arriving.
//!
//! Writers are serialized behind the write lock, which is what keeps doc id
//! assignment and the running average length consistent. Each indexing call
//! holds the lock for its whole duration, so readers see a document with all of
//! its postings or not at all.

use crate::engine::IrSystem;
use crate::error::Result;
use crate::index::{DocId, Document};
use parking_lot::{RwLock, RwLockReadGuard};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub num_terms: usize,
    pub avg_doc_len: f64,
    pub scoring: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct SharedIrSystem {
    inner: Arc<RwLock<IrSystem>>,
}

impl SharedIrSystem {
    pub fn new(system: IrSystem) -> Self {
        Self { inner: Arc::new(RwLock::new(system)) }
    }

    pub fn index_document(&self, text: &str, url: &str) -> Result<DocId> {
        self.inner.write().index_document(text, url)
    }

    pub fn index_collection<I, T, U>(&self, docs: I) -> Result<()>
    where
        I: IntoIterator<Item = (T, U)>,
        T: AsRef<str>,
        U: AsRef<str>,
    {
        self.inner.write().index_collection(docs)
    }

    pub fn query(&self, text: &str, n: usize) -> Vec<(f64, DocId)> { self.inner.read().query(text, n) }

    pub fn query_with_total(&self, text: &str, n: usize) -> (Vec<(f64, DocId)>, usize) {
        self.inner.read().query_with_total(text, n)
    }

    pub fn document(&self, doc: DocId) -> Option<Document> { self.inner.read().document(doc).cloned() }

    pub fn len(&self) -> usize { self.inner.read().len() }

    pub fn is_empty(&self) -> bool { self.inner.read().is_empty() }

    pub fn stats(&self) -> IndexStats {
        let sys = self.inner.read();
        let index = sys.index();
        IndexStats {
            num_docs: index.num_docs(),
            num_terms: index.num_terms(),
            avg_doc_len: index.avg_doc_len(),
            scoring: sys.scorer_name(),
        }
    }

    /// Hold a read lock across several lookups, e.g. a query and the documents it returned.
    pub fn read(&self) -> RwLockReadGuard<'_, IrSystem> { self.inner.read() }
}
