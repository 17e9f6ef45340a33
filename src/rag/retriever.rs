//! Retrieval: one semantic query against the index, returning a
//! fixed-size candidate set.

use std::sync::Arc;

use super::store::{QueryCandidate, VectorStore};
use crate::core::errors::ApiError;

/// Default candidate set size; generous so the assembler has enough
/// material to cover several restaurants per query.
pub const DEFAULT_K: usize = 20;

#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn VectorStore>,
    k: usize,
}

impl Retriever {
    pub fn new(store: Arc<dyn VectorStore>, k: usize) -> Self {
        Self { store, k }
    }

    /// Query the index for up to `k` candidates.
    ///
    /// Store failures propagate; retry policy belongs to the caller. An
    /// empty candidate set is a valid result, not an error.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<QueryCandidate>, ApiError> {
        let response = self.store.query(query, self.k).await?;

        let candidates: Vec<QueryCandidate> = response
            .documents
            .into_iter()
            .zip(response.metadatas)
            .zip(response.distances)
            .map(|((document, metadata), distance)| QueryCandidate {
                document,
                metadata,
                distance,
            })
            .collect();

        tracing::debug!("retrieved {} candidates", candidates.len());
        Ok(candidates)
    }
}
