//! Index loader: synthesizes documents for a record batch and writes them
//! to the vector store in fixed-size batches.
//!
//! Restaurant indices come from an [`IdAllocator`] so that ids stay
//! collision-free when a second, independently-sourced batch is merged
//! later: the allocator hands out the next free index instead of relying
//! on a fixed numeric offset.

use std::sync::Arc;

use thiserror::Error;

use super::documents::{synthesize, SearchDocument};
use super::store::VectorStore;
use crate::catalog::RestaurantRecord;
use crate::core::errors::ApiError;

/// Hands out restaurant indices, never reusing one.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_index: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a known high-water mark (e.g. when merging into an
    /// index built by an earlier process).
    pub fn starting_at(next_index: usize) -> Self {
        Self { next_index }
    }

    pub fn next_free(&self) -> usize {
        self.next_index
    }

    fn allocate(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        index
    }
}

/// A load run that stopped early. `committed` documents were already
/// written and remain in the store; the remaining batches were not
/// attempted.
#[derive(Debug, Error)]
#[error("index load aborted after {committed} documents: {source}")]
pub struct LoadAborted {
    pub committed: usize,
    #[source]
    pub source: ApiError,
}

pub struct IndexLoader {
    store: Arc<dyn VectorStore>,
    batch_size: usize,
}

impl IndexLoader {
    pub fn new(store: Arc<dyn VectorStore>, batch_size: usize) -> Self {
        Self { store, batch_size }
    }

    /// One-time bootstrap: load `records` only if the store is empty.
    ///
    /// Returns the number of documents added (0 when the store already had
    /// data). This is a deliberate bootstrap-once policy; a data refresh is
    /// expected to rebuild the collection from scratch.
    pub async fn bootstrap(
        &self,
        records: &[RestaurantRecord],
        allocator: &mut IdAllocator,
    ) -> Result<usize, LoadAborted> {
        let existing = self.store.count().await.map_err(|source| LoadAborted {
            committed: 0,
            source,
        })?;

        if existing > 0 {
            tracing::info!("index already holds {} documents, skipping bootstrap", existing);
            return Ok(0);
        }

        self.load(records, allocator).await
    }

    /// Synthesize and write all documents for `records`.
    pub async fn load(
        &self,
        records: &[RestaurantRecord],
        allocator: &mut IdAllocator,
    ) -> Result<usize, LoadAborted> {
        let mut documents: Vec<SearchDocument> = Vec::new();
        for record in records {
            let index = allocator.allocate();
            documents.extend(synthesize(record, index));
        }

        tracing::info!(
            "loading {} documents for {} restaurants",
            documents.len(),
            records.len()
        );

        let mut committed = 0;
        for batch in documents.chunks(self.batch_size) {
            let ids = batch.iter().map(|d| d.id.clone()).collect();
            let texts = batch.iter().map(|d| d.text.clone()).collect();
            let metadatas = batch.iter().map(|d| d.metadata.clone()).collect();

            self.store
                .add(ids, texts, metadatas)
                .await
                .map_err(|source| LoadAborted { committed, source })?;

            committed += batch.len();
        }

        tracing::info!("index load complete: {} documents committed", committed);
        Ok(committed)
    }
}
