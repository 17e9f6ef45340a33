//! Retrieval-augmented grounding for restaurant queries.
//!
//! This module owns the whole retrieval side of the pipeline:
//! - `documents`: turns one restaurant record into typed search documents
//! - `loader`: batches documents into the vector store with stable ids
//! - `store`: the vector-store and embedding boundaries
//! - `retriever`: semantic query → candidate set
//! - `context_builder`: candidate set → bounded context block

pub mod chroma;
pub mod context_builder;
pub mod documents;
pub mod embedding;
pub mod loader;
pub mod memory;
pub mod retriever;
pub mod store;

pub use context_builder::{ContextBuilder, ContextBuilderConfig};
pub use documents::{synthesize, DocumentKind, DocumentMetadata, SearchDocument};
pub use loader::{IdAllocator, IndexLoader, LoadAborted};
pub use retriever::Retriever;
pub use store::{Embedder, QueryCandidate, QueryResponse, VectorStore};
