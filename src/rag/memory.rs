//! In-process vector store using brute-force cosine similarity.
//!
//! Backed by a `HashMap` behind a `tokio::sync::RwLock`; suitable for
//! tests and local runs without a Chroma server. Distance is reported as
//! `1 - cosine`, so it lines up with the dissimilarity contract of
//! [`VectorStore`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::documents::DocumentMetadata;
use super::store::{Embedder, QueryResponse, VectorStore};
use crate::core::errors::ApiError;

struct StoredDocument {
    text: String,
    metadata: DocumentMetadata,
    embedding: Vec<f32>,
}

pub struct MemoryVectorStore {
    embedder: Arc<dyn Embedder>,
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl MemoryVectorStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            documents: RwLock::new(HashMap::new()),
        }
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;

    if denom <= f32::EPSILON {
        0.0
    } else {
        dot / denom
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn add(
        &self,
        ids: Vec<String>,
        documents: Vec<String>,
        metadatas: Vec<DocumentMetadata>,
    ) -> Result<(), ApiError> {
        if ids.len() != documents.len() || ids.len() != metadatas.len() {
            return Err(ApiError::BadRequest(
                "ids, documents and metadatas must have equal length".to_string(),
            ));
        }

        let embeddings = self.embedder.embed(&documents).await?;

        let mut stored = self.documents.write().await;
        for (((id, text), metadata), embedding) in ids
            .into_iter()
            .zip(documents)
            .zip(metadatas)
            .zip(embeddings)
        {
            stored.insert(
                id,
                StoredDocument {
                    text,
                    metadata,
                    embedding,
                },
            );
        }
        Ok(())
    }

    async fn query(&self, text: &str, k: usize) -> Result<QueryResponse, ApiError> {
        let query_embedding = self
            .embedder
            .embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal("embedder returned no vector".to_string()))?;

        let stored = self.documents.read().await;
        let mut scored: Vec<(f32, &StoredDocument)> = stored
            .values()
            .map(|doc| (1.0 - cosine_similarity(&doc.embedding, &query_embedding), doc))
            .collect();

        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        let mut response = QueryResponse::default();
        for (distance, doc) in scored {
            response.documents.push(doc.text.clone());
            response.metadatas.push(doc.metadata.clone());
            response.distances.push(distance.max(0.0));
        }
        Ok(response)
    }

    async fn count(&self) -> Result<usize, ApiError> {
        Ok(self.documents.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::documents::DocumentMetadata;

    /// Deterministic toy embedder: counts occurrences of a fixed vocabulary.
    struct VocabEmbedder;

    #[async_trait]
    impl Embedder for VocabEmbedder {
        async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ApiError> {
            let vocab = ["pizza", "sushi", "curry"];
            Ok(inputs
                .iter()
                .map(|text| {
                    let lower = text.to_lowercase();
                    vocab
                        .iter()
                        .map(|word| lower.matches(word).count() as f32)
                        .collect()
                })
                .collect())
        }
    }

    fn meta(name: &str) -> DocumentMetadata {
        DocumentMetadata::RestaurantInfo {
            name: name.to_string(),
            location: "Unknown".to_string(),
            rating: "Unknown".to_string(),
            cuisines: String::new(),
            cost: "Unknown".to_string(),
            url: "Unknown".to_string(),
            contact: "Unknown".to_string(),
            address: "Unknown".to_string(),
        }
    }

    #[tokio::test]
    async fn query_ranks_by_similarity() {
        let store = MemoryVectorStore::new(Arc::new(VocabEmbedder));
        store
            .add(
                vec!["a".to_string(), "b".to_string()],
                vec![
                    "pizza pizza pizza".to_string(),
                    "sushi and curry".to_string(),
                ],
                vec![meta("Pizza Place"), meta("Sushi Bar")],
            )
            .await
            .unwrap();

        let response = store.query("best pizza in town", 2).await.unwrap();
        assert_eq!(response.documents.len(), 2);
        assert!(response.documents[0].contains("pizza"));
        assert!(response.distances[0] < response.distances[1]);
    }

    #[tokio::test]
    async fn count_tracks_adds() {
        let store = MemoryVectorStore::new(Arc::new(VocabEmbedder));
        assert_eq!(store.count().await.unwrap(), 0);
        store
            .add(
                vec!["a".to_string()],
                vec!["pizza".to_string()],
                vec![meta("A")],
            )
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn mismatched_batch_lengths_are_rejected() {
        let store = MemoryVectorStore::new(Arc::new(VocabEmbedder));
        let err = store
            .add(vec!["a".to_string()], vec![], vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
