//! Chroma-backed vector store.
//!
//! Thin REST client for a Chroma server. The collection is resolved (or
//! created) once at connect time and the resulting handle is reused for
//! every call; embedding happens client-side through the injected
//! [`Embedder`], matching Chroma's add/query wire shape.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::documents::DocumentMetadata;
use super::store::{Embedder, QueryResponse, VectorStore};
use crate::core::errors::ApiError;

#[derive(Clone)]
pub struct ChromaStore {
    base_url: String,
    collection_id: String,
    embedder: Arc<dyn Embedder>,
    client: Client,
}

#[derive(Deserialize)]
struct CollectionInfo {
    id: String,
}

impl ChromaStore {
    /// Connect to a Chroma server and get-or-create the named collection.
    pub async fn connect(
        base_url: &str,
        collection: &str,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::new();

        let url = format!("{}/api/v1/collections", base_url);
        let res = client
            .post(&url)
            .json(&json!({ "name": collection, "get_or_create": true }))
            .send()
            .await
            .map_err(ApiError::unavailable)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::ServiceUnavailable(format!(
                "Chroma collection setup failed: {}",
                text
            )));
        }

        let info: CollectionInfo = res.json().await.map_err(ApiError::internal)?;

        Ok(Self {
            base_url,
            collection_id: info.id,
            embedder,
            client,
        })
    }
}

#[async_trait]
impl VectorStore for ChromaStore {
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

        let url = format!(
            "{}/api/v1/collections/{}/add",
            self.base_url, self.collection_id
        );
        let body = json!({
            "ids": ids,
            "embeddings": embeddings,
            "documents": documents,
            "metadatas": metadatas,
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::unavailable)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!("Chroma add error: {}", text)));
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

        let url = format!(
            "{}/api/v1/collections/{}/query",
            self.base_url, self.collection_id
        );
        let body = json!({
            "query_embeddings": [query_embedding],
            "n_results": k,
            "include": ["documents", "metadatas", "distances"],
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::unavailable)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!("Chroma query error: {}", text)));
        }

        let payload: Value = res.json().await.map_err(ApiError::internal)?;

        // Chroma nests results one level per query; we always send one.
        let mut response = QueryResponse::default();
        let documents = payload["documents"][0].as_array().cloned().unwrap_or_default();
        let metadatas = payload["metadatas"][0].as_array().cloned().unwrap_or_default();
        let distances = payload["distances"][0].as_array().cloned().unwrap_or_default();

        for ((doc, meta), distance) in documents.iter().zip(&metadatas).zip(&distances) {
            let Some(doc) = doc.as_str() else { continue };
            let Ok(metadata) = serde_json::from_value::<DocumentMetadata>(meta.clone()) else {
                tracing::warn!("skipping hit with malformed metadata: {}", meta);
                continue;
            };
            let distance = distance.as_f64().unwrap_or(f64::MAX) as f32;

            response.documents.push(doc.to_string());
            response.metadatas.push(metadata);
            response.distances.push(distance);
        }

        Ok(response)
    }

    async fn count(&self) -> Result<usize, ApiError> {
        let url = format!(
            "{}/api/v1/collections/{}/count",
            self.base_url, self.collection_id
        );
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::unavailable)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!("Chroma count error: {}", text)));
        }

        let count: usize = res.json().await.map_err(ApiError::internal)?;
        Ok(count)
    }
}
