//! Vector store and embedding boundaries.
//!
//! The index is the sole source of truth at query time: a store returns
//! document text, typed metadata, and a distance per hit, and nothing in
//! the pipeline goes back to the source records. Distances are
//! dissimilarities — lower is more relevant — and the store is not trusted
//! to order results; consumers sort where order matters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::documents::DocumentMetadata;
use crate::core::errors::ApiError;

/// One retrieval hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryCandidate {
    pub document: String,
    pub metadata: DocumentMetadata,
    /// Dissimilarity to the query; non-negative, lower = more relevant.
    pub distance: f32,
}

/// Raw columnar query response, mirroring the store wire shape.
///
/// The three vectors are parallel; [`crate::rag::Retriever`] zips them into
/// [`QueryCandidate`]s.
#[derive(Debug, Clone, Default)]
pub struct QueryResponse {
    pub documents: Vec<String>,
    pub metadatas: Vec<DocumentMetadata>,
    pub distances: Vec<f32>,
}

/// Abstract vector store holding the synthesized restaurant documents.
///
/// Implementations embed internally (via an injected [`Embedder`]), so
/// callers only ever pass text. Adds accumulate, never edit: re-indexing
/// replaces or appends documents.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Add a batch of documents. The three vectors are parallel.
    async fn add(
        &self,
        ids: Vec<String>,
        documents: Vec<String>,
        metadatas: Vec<DocumentMetadata>,
    ) -> Result<(), ApiError>;

    /// Nearest-neighbor query for up to `k` hits.
    async fn query(&self, text: &str, k: usize) -> Result<QueryResponse, ApiError>;

    /// Total number of stored documents.
    async fn count(&self) -> Result<usize, ApiError>;
}

/// Text-to-vector boundary. Deterministic for identical input.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ApiError>;
}
