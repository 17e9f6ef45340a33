use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to load restaurant catalog: {0}")]
    Catalog(#[source] anyhow::Error),

    #[error("Failed to connect to vector store: {0}")]
    VectorStore(#[source] anyhow::Error),

    #[error("Failed to bootstrap index: {0}")]
    Bootstrap(#[source] anyhow::Error),

    #[error("Failed to initialize LLM provider: {0}")]
    Llm(String),
}
